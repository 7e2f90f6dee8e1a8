//! The validated, read-only topic store.
//!
//! A `ContentStore` is built once from raw records and never mutated. Lookups
//! hand out shared references, so any number of readers can use one store
//! (directly or behind an `Arc`) without coordination.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{FieldPath, LoadError, NotFoundError, ValidationError, Violation};
use crate::notes::TopicNotes;
use crate::source::ContentSource;
use crate::validate::validate_topic;

/// A loaded topic plus case-folded copies of its searchable text.
#[derive(Debug)]
struct Entry {
    key: String,
    notes: TopicNotes,
    folded_topic: String,
    folded_summary: String,
}

/// Counts over a loaded corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub topics: usize,
    pub sections: usize,
    pub worked_examples: usize,
    pub steps: usize,
    pub sections_with_video: usize,
}

#[derive(Debug, Default)]
pub struct ContentStore {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ContentStore {
    /// Validates `records` and builds a store keeping their order.
    ///
    /// Fails on the first invalid record or repeated key; nothing is kept on
    /// failure.
    pub fn load<I, K>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, TopicNotes)>,
        K: Into<String>,
    {
        let mut store = Self::default();

        for (key, notes) in records {
            let key = key.into();
            if store.index.contains_key(&key) {
                return Err(ValidationError::new(
                    key,
                    FieldPath::Topic { field: "key" },
                    Violation::DuplicateKey,
                ));
            }
            validate_topic(&key, &notes)?;
            debug!(topic = %key, sections = notes.sections.len(), "Topic accepted");

            store.index.insert(key.clone(), store.entries.len());
            store.entries.push(Entry {
                folded_topic: notes.topic.to_lowercase(),
                folded_summary: notes.summary.to_lowercase(),
                key,
                notes,
            });
        }

        info!(topics = store.entries.len(), "Content store loaded");
        Ok(store)
    }

    /// Reads every record from `source` and loads them.
    pub async fn from_source(source: &dyn ContentSource) -> Result<Self, LoadError> {
        let records = source.load_records().await?;
        Ok(Self::load(records)?)
    }

    /// Looks up one topic by its key.
    ///
    /// # Arguments
    ///
    /// * `key` - The exact key the topic was loaded under (e.g. "F3 Bearings").
    ///
    /// # Returns
    ///
    /// The stored record, or a `NotFoundError` carrying `key` when no topic was
    /// loaded under it. A miss is an ordinary outcome for callers to handle.
    pub fn get_topic(&self, key: &str) -> Result<&TopicNotes, NotFoundError> {
        self.index
            .get(key)
            .map(|&i| &self.entries[i].notes)
            .ok_or_else(|| NotFoundError {
                key: key.to_string(),
            })
    }

    /// Topic keys in load order. Each call starts a fresh iteration.
    pub fn list_topics(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Topics whose name or summary contains `needle`, ignoring case, in load
    /// order. An empty needle matches everything.
    pub fn search(&self, needle: &str) -> Vec<&TopicNotes> {
        self.search_entries(needle)
            .into_iter()
            .map(|(_, notes)| notes)
            .collect()
    }

    /// Like [`search`](Self::search), paired with the key each match was
    /// loaded under.
    pub fn search_entries(&self, needle: &str) -> Vec<(&str, &TopicNotes)> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.folded_topic.contains(&needle) || entry.folded_summary.contains(&needle)
            })
            .map(|entry| (entry.key.as_str(), &entry.notes))
            .collect()
    }

    /// `(key, notes)` pairs in load order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &TopicNotes)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.notes))
    }

    /// Number of topics in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no topics at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a topic was loaded under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys of topics whose `subject` equals `subject`, ignoring case.
    pub fn topics_for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.notes.subject.eq_ignore_ascii_case(subject))
            .map(|entry| entry.key.as_str())
    }

    /// Up to `limit` keys resembling `key`, best match first.
    ///
    /// Ties keep load order.
    pub fn suggest(&self, key: &str, limit: usize) -> Vec<&str> {
        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| matcher.fuzzy_match(&entry.key, key).map(|score| (score, i)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, i)| self.entries[i].key.as_str())
            .collect()
    }

    /// Counts topics, sections, worked examples, steps and video links.
    ///
    /// # Returns
    ///
    /// A `CorpusStats` snapshot; hosts print it after a successful load.
    pub fn stats(&self) -> CorpusStats {
        let mut stats = CorpusStats {
            topics: self.entries.len(),
            ..Default::default()
        };
        for section in self.entries.iter().flat_map(|entry| &entry.notes.sections) {
            stats.sections += 1;
            if section.video_url.is_some() {
                stats.sections_with_video += 1;
            }
            for example in section.worked_examples.iter().flatten() {
                stats.worked_examples += 1;
                stats.steps += example.steps.len();
            }
        }
        stats
    }
}
