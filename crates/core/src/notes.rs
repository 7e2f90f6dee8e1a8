use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One topic's complete study package.
///
/// Required fields default to their empty value when missing from the input so
/// that validation can report them by name instead of failing at parse time.
/// Markdown and LaTeX in string fields are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TopicNotes {
    /// Human-readable topic name (e.g. "F3 Bearings").
    #[serde(default)]
    pub topic: String,
    /// Subject the topic belongs to (e.g. "Mathematics").
    #[serde(default)]
    pub subject: String,
    /// Curriculum level (e.g. "O-Level Form 3").
    #[serde(default)]
    pub grade_level: String,
    /// Overview of the topic.
    #[serde(default)]
    pub summary: String,
    /// Lesson sections in presentation order.
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub exam_tips: Vec<String>,
    /// Textual descriptions of diagrams.
    #[serde(default)]
    pub visual_descriptions: Vec<String>,
}

impl TopicNotes {
    /// Iterates over every worked example of the topic, section by section.
    pub fn worked_examples(&self) -> impl Iterator<Item = &WorkedExample> {
        self.sections
            .iter()
            .flat_map(|section| section.worked_examples.iter().flatten())
    }

    /// Video links attached to sections, in section order.
    pub fn video_urls(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .filter_map(|section| section.video_url.as_deref())
    }
}

/// One instructional unit within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Section {
    #[serde(default)]
    pub title: String,
    #[serde(
        rename = "videoUrl",
        alias = "video_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub video_url: Option<String>,
    #[serde(default)]
    pub content: String,
    /// `None` and `Some(vec![])` are kept distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worked_examples: Option<Vec<WorkedExample>>,
}

impl Section {
    /// Creates a section with a title and body and nothing else.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Attaches a video link to the section.
    ///
    /// # Arguments
    ///
    /// * `url` - Embed or watch URL, stored verbatim.
    pub fn with_video(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// Sets the section's worked examples, replacing any already present.
    ///
    /// Passing an empty `Vec` records an explicitly empty list, which is kept
    /// distinct from a section without worked examples.
    pub fn with_examples(mut self, examples: Vec<WorkedExample>) -> Self {
        self.worked_examples = Some(examples);
        self
    }
}

/// A fully solved problem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WorkedExample {
    #[serde(default)]
    pub question: String,
    /// Derivation steps in order.
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub final_answer: String,
}

impl WorkedExample {
    /// Creates a worked example from a question, its ordered steps and the
    /// final answer.
    pub fn new<S: Into<String>>(
        question: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
        final_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            steps: steps.into_iter().map(Into::into).collect(),
            final_answer: final_answer.into(),
        }
    }
}
