//! Content sources
//!
//! A `ContentSource` produces raw `(key, TopicNotes)` records in a stable
//! order. Sources do not validate; `ContentStore::load` does. Repeated keys are
//! passed through untouched so the store can report them.

use async_trait::async_trait;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::notes::TopicNotes;

/// Anything that can supply the raw records of a corpus.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn load_records(&self) -> Result<Vec<(String, TopicNotes)>, LoadError>;
}

/// A JSON object of topic key to notes, read in document order.
///
/// Unlike a map type, this keeps repeated keys instead of silently keeping
/// the last one.
#[derive(Debug, Default)]
pub struct TopicDocument(pub Vec<(String, TopicNotes)>);

impl<'de> Deserialize<'de> for TopicDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = TopicDocument;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping topic keys to topic notes")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, TopicNotes>()? {
                    records.push(entry);
                }
                Ok(TopicDocument(records))
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Parses one JSON content document.
pub fn parse_document(path: &Path, text: &str) -> Result<Vec<(String, TopicNotes)>, LoadError> {
    serde_json::from_str::<TopicDocument>(text)
        .map(|doc| doc.0)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads JSON content from a single file or from every `*.json` file in a
/// directory.
///
/// Directory entries are read in file-name order and their records
/// concatenated.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn document_paths(&self) -> Result<Vec<PathBuf>, LoadError> {
        let io_err = |source| LoadError::Io {
            path: self.path.clone(),
            source,
        };

        let metadata = tokio::fs::metadata(&self.path).await.map_err(io_err)?;
        if !metadata.is_dir() {
            return Ok(vec![self.path.clone()]);
        }

        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.path).await.map_err(io_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if entry.file_type().await.map_err(io_err)?.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl ContentSource for JsonSource {
    async fn load_records(&self) -> Result<Vec<(String, TopicNotes)>, LoadError> {
        let mut records = Vec::new();
        let paths = self.document_paths().await?;

        for path in &paths {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;
            let document = parse_document(path, &text)?;
            debug!(path = %path.display(), topics = document.len(), "Parsed content document");
            records.extend(document);
        }

        info!(
            root = %self.path.display(),
            documents = paths.len(),
            topics = records.len(),
            "Content records read"
        );
        Ok(records)
    }
}

/// Records held in memory, handed out as-is.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<(String, TopicNotes)>,
}

impl StaticSource {
    pub fn new<K: Into<String>>(records: impl IntoIterator<Item = (K, TopicNotes)>) -> Self {
        Self {
            records: records.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn load_records(&self) -> Result<Vec<(String, TopicNotes)>, LoadError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContentStore;
    use std::fs;

    const ALGEBRA: &str = r#"{
        "Algebra": {
            "topic": "F3 Algebra",
            "subject": "Mathematics",
            "grade_level": "O-Level Form 3",
            "summary": "Expressions, factorisation and equations.",
            "sections": [
                {"title": "Expressions", "videoUrl": "https://example.com/algebra", "content": "Like terms."},
                {"title": "Factorisation", "content": "Common factors.", "worked_examples": [
                    {"question": "Factorise $6x + 9$", "steps": ["HCF is 3", "$3(2x + 3)$"], "final_answer": "$3(2x+3)$"}
                ]},
                {"title": "Equations", "content": "Balance both sides."}
            ],
            "key_points": ["Collect like terms", "Check by expanding"],
            "exam_tips": [],
            "visual_descriptions": []
        }
    }"#;

    #[test]
    fn test_document_keeps_key_order() {
        let records = parse_document(
            Path::new("doc.json"),
            r#"{"Zeta": {"topic": "z"}, "Alpha": {"topic": "a"}, "Mu": {"topic": "m"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = records.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_document_keeps_repeated_keys() {
        let records = parse_document(
            Path::new("doc.json"),
            r#"{"A": {"topic": "first"}, "A": {"topic": "second"}}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].1.topic, "second");
    }

    #[test]
    fn test_malformed_document_reports_path() {
        let err = parse_document(Path::new("broken.json"), "[1, 2]").unwrap_err();
        match err {
            LoadError::Parse { path, .. } => assert_eq!(path, PathBuf::from("broken.json")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_json_file_source_round_trips_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("algebra.json");
        fs::write(&file, ALGEBRA).unwrap();

        let store = ContentStore::from_source(&JsonSource::new(&file)).await.unwrap();
        let algebra = store.get_topic("Algebra").unwrap();

        let titles: Vec<_> = algebra.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Expressions", "Factorisation", "Equations"]);
        assert_eq!(
            algebra.sections[0].video_url.as_deref(),
            Some("https://example.com/algebra")
        );
        assert_eq!(
            algebra.sections[1].worked_examples.as_ref().unwrap()[0].steps,
            ["HCF is 3", "$3(2x + 3)$"]
        );
        assert_eq!(algebra.key_points, ["Collect like terms", "Check by expanding"]);
    }

    #[tokio::test]
    async fn test_json_directory_reads_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let topic = |name: &str| {
            format!(
                r#"{{"{name}": {{"topic": "{name}", "subject": "Mathematics", "grade_level": "O-Level Form 3",
                    "summary": "s", "sections": [{{"title": "t", "content": "c"}}]}}}}"#
            )
        };
        fs::write(dir.path().join("b.json"), topic("Second")).unwrap();
        fs::write(dir.path().join("a.json"), topic("First")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = ContentStore::from_source(&JsonSource::new(dir.path()))
            .await
            .unwrap();
        assert_eq!(store.list_topics().collect::<Vec<_>>(), ["First", "Second"]);
    }

    #[tokio::test]
    async fn test_duplicate_key_across_documents_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), ALGEBRA).unwrap();
        fs::write(dir.path().join("b.json"), ALGEBRA).unwrap();

        let err = ContentStore::from_source(&JsonSource::new(dir.path()))
            .await
            .unwrap_err();
        match err {
            LoadError::Validation(e) => {
                assert_eq!(e.topic, "Algebra");
                assert_eq!(e.field(), "key");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_final_answer_reported_as_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, ALGEBRA.replace(r#""final_answer": "$3(2x+3)$""#, r#""final_answer": """#))
            .unwrap();

        let err = ContentStore::from_source(&JsonSource::new(&file))
            .await
            .unwrap_err();
        match err {
            LoadError::Validation(e) => {
                assert_eq!(e.topic, "Algebra");
                assert_eq!(e.field(), "final_answer");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_absent_required_fields_reported_by_name() {
        let cases = [
            (
                ALGEBRA.replace(r#""summary": "Expressions, factorisation and equations.","#, ""),
                "summary",
            ),
            (ALGEBRA.replace(r#", "final_answer": "$3(2x+3)$""#, ""), "final_answer"),
        ];
        for (document, field) in cases {
            assert!(!document.contains(&format!("\"{field}\"")));
            let dir = tempfile::tempdir().unwrap();
            let file = dir.path().join("absent.json");
            fs::write(&file, &document).unwrap();

            let err = ContentStore::from_source(&JsonSource::new(&file))
                .await
                .unwrap_err();
            match err {
                LoadError::Validation(e) => {
                    assert_eq!(e.topic, "Algebra");
                    assert_eq!(e.field(), field);
                }
                other => panic!("Expected Validation error for {field}, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");

        let err = JsonSource::new(&missing).load_records().await.unwrap_err();
        match err {
            LoadError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_static_source_hands_back_records() {
        let source = StaticSource::new([("A", TopicNotes::default())]);
        let records = source.load_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "A");
    }
}
