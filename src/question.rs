use serde::Serialize;

/// Marks shown when a question has no `@plusmarks` line.
pub const DEFAULT_MARKS: &str = "1";

/// A single parsed question block.
///
/// Every field except `question` stays `None` unless its tag appeared in the
/// block, so an empty tag value (`Some("")`) is distinguishable from a
/// missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Question {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<String>,
}

impl Question {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    /// Marks text, falling back to [`DEFAULT_MARKS`].
    pub fn marks_or_default(&self) -> &str {
        self.marks.as_deref().unwrap_or(DEFAULT_MARKS)
    }

    /// Whether `option` is the correct answer. Compared by trimmed value, not
    /// position, so duplicate options are all marked.
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct
            .as_deref()
            .is_some_and(|correct| correct.trim() == option.trim())
    }
}
