//! Study notes core
//!
//! Loads topic notes (sections, worked examples, key points and exam tips),
//! validates their structure once, and serves them from an immutable
//! in-memory store.

pub mod error;
pub mod notes;
pub mod shared;
pub mod source;
pub mod store;
pub mod validate;

pub use error::{FieldPath, LoadError, NotFoundError, ValidationError, Violation};
pub use notes::{Section, TopicNotes, WorkedExample};
pub use shared::SharedStore;
pub use source::{ContentSource, JsonSource, StaticSource};
pub use store::{ContentStore, CorpusStats};

/// JSON Schema describing a content document: an object mapping topic keys to
/// topic notes.
pub fn document_schema() -> schemars::Schema {
    schemars::schema_for!(std::collections::BTreeMap<String, TopicNotes>)
}
