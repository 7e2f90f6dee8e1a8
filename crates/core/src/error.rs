//! Error types for loading and reading the content store.

use std::fmt;
use std::path::PathBuf;

/// Where inside a topic record a violation was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// A top-level field of the topic (or `key` for the topic key itself).
    Topic { field: &'static str },
    WorkedExample {
        section_index: usize,
        section_title: String,
        example_index: usize,
        field: &'static str,
    },
}

impl FieldPath {
    /// The name of the offending field, without its position.
    pub fn field(&self) -> &'static str {
        match self {
            FieldPath::Topic { field } | FieldPath::WorkedExample { field, .. } => *field,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Topic { field } => write!(f, "{}", field),
            FieldPath::WorkedExample {
                section_index,
                section_title,
                example_index,
                field,
            } => write!(
                f,
                "sections[{}] ('{}').worked_examples[{}].{}",
                section_index, section_title, example_index, field
            ),
        }
    }
}

/// The kind of structural problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A required string is blank or a required sequence has no elements.
    Empty,
    /// The topic key was already used by an earlier record.
    DuplicateKey,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Empty => write!(f, "must not be empty"),
            Violation::DuplicateKey => write!(f, "is a duplicate topic key"),
        }
    }
}

/// A record broke one of the structural invariants of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid topic '{topic}': {path} {violation}")]
pub struct ValidationError {
    pub topic: String,
    pub path: FieldPath,
    pub violation: Violation,
}

impl ValidationError {
    pub fn new(topic: impl Into<String>, path: FieldPath, violation: Violation) -> Self {
        Self {
            topic: topic.into(),
            path,
            violation,
        }
    }

    pub fn field(&self) -> &'static str {
        self.path.field()
    }
}

/// A topic lookup missed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Topic '{key}' not found")]
pub struct NotFoundError {
    pub key: String,
}

/// Failures while reading records from a source and building a store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed content document '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
