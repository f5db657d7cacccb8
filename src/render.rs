use std::fmt;
use std::str::FromStr;

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::question::Question;

const CHECK_MARK: &str = "✔ ";
const BULLET: &str = "• ";
const NO_EXPLANATION: &str = "No explanation provided.";

/// Semantic style of a paragraph handed to a [`DocumentSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Normal,
    ListNumber,
    ListBullet,
    Quote,
}

/// Receives the write operations produced by [`render`]. The renderer never
/// calls `save`; the caller does once rendering is done.
pub trait DocumentSink {
    fn add_heading(&mut self, text: &str, level: u8);
    fn add_paragraph(&mut self, text: &str, style: ParagraphStyle);
    fn save(&self, path: &Path) -> Result<()>;
}

/// Page layout for rendered questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Question, options and explanation only.
    Simple,
    /// Adds difficulty, unit/topic, instruction and a quoted explanation label.
    #[default]
    Professional,
}

impl Layout {
    pub fn default_title(self) -> &'static str {
        match self {
            Layout::Simple => "HighScore.ai Assignment – AI-Generated Math Questions",
            Layout::Professional => "HighScore.ai Assignment – AI-Generated Mathematics Questions",
        }
    }

    pub fn default_intro(self) -> Vec<String> {
        match self {
            Layout::Simple => vec!["Each question carries 1 mark.".to_string()],
            Layout::Professional => vec![
                "Total Marks: {total_marks}".to_string(),
                "Instructions: Answer the following questions. Each question carries 1 mark."
                    .to_string(),
            ],
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Simple => f.write_str("simple"),
            Layout::Professional => f.write_str("professional"),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Layout::Simple),
            "professional" => Ok(Layout::Professional),
            other => Err(format!(
                "unknown layout '{other}' (expected 'simple' or 'professional')"
            )),
        }
    }
}

/// Everything the renderer needs besides the questions themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout: Layout,
    pub title: String,
    /// Paragraphs after the title. `{total_marks}` and `{count}` are filled in.
    pub intro: Vec<String>,
}

impl RenderOptions {
    pub fn for_layout(layout: Layout) -> Self {
        Self {
            layout,
            title: layout.default_title().to_string(),
            intro: layout.default_intro(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_layout(Layout::default())
    }
}

/// Write the front matter followed by every question into `sink`.
pub fn render(questions: &[Question], options: &RenderOptions, sink: &mut impl DocumentSink) {
    sink.add_heading(&options.title, 1);
    let total = total_marks(questions).to_string();
    let count = questions.len().to_string();
    for line in &options.intro {
        let line = line
            .replace("{total_marks}", &total)
            .replace("{count}", &count);
        sink.add_paragraph(&line, ParagraphStyle::Normal);
    }

    for (index, question) in questions.iter().enumerate() {
        let order = display_order(question, index);
        match options.layout {
            Layout::Simple => render_simple(question, &order, sink),
            Layout::Professional => render_professional(question, &order, sink),
        }
    }
}

fn render_simple(question: &Question, order: &str, sink: &mut impl DocumentSink) {
    sink.add_paragraph(
        &format!(
            "Q{order}. {} ({} mark)",
            question.question,
            question.marks_or_default()
        ),
        ParagraphStyle::ListNumber,
    );
    render_options(question, sink);
    sink.add_paragraph(
        &format!(
            "Explanation: {}",
            question.explanation.as_deref().unwrap_or_default()
        ),
        ParagraphStyle::Normal,
    );
    sink.add_paragraph("", ParagraphStyle::Normal);
}

fn render_professional(question: &Question, order: &str, sink: &mut impl DocumentSink) {
    let marks = question.marks_or_default();
    let plural = if marks == "1" { "" } else { "s" };

    let mut header = format!("Q{order}. ");
    if let Some(difficulty) = &question.difficulty {
        header.push_str(&format!("({}) ", capitalize(difficulty)));
    }
    let location = match (&question.unit, &question.topic) {
        (Some(unit), Some(topic)) => format!("{unit} – {topic} "),
        (Some(only), None) | (None, Some(only)) => format!("{only} "),
        (None, None) => String::new(),
    };
    header.push_str(&location);
    header.push_str(&format!("({marks} mark{plural})"));

    sink.add_paragraph(&header, ParagraphStyle::ListNumber);
    sink.add_paragraph(&question.question, ParagraphStyle::Normal);
    if let Some(instruction) = &question.instruction {
        sink.add_paragraph(&format!("Instruction: {instruction}"), ParagraphStyle::Normal);
    }
    render_options(question, sink);
    sink.add_paragraph("Explanation:", ParagraphStyle::Quote);
    sink.add_paragraph(
        question.explanation.as_deref().unwrap_or(NO_EXPLANATION),
        ParagraphStyle::Normal,
    );
    sink.add_paragraph("", ParagraphStyle::Normal);
}

fn render_options(question: &Question, sink: &mut impl DocumentSink) {
    for option in &question.options {
        let prefix = if question.is_correct(option) {
            CHECK_MARK
        } else {
            BULLET
        };
        sink.add_paragraph(&format!("{prefix}{option}"), ParagraphStyle::ListBullet);
    }
}

/// `@Order` when given, otherwise the 1-based position in the parsed list.
fn display_order(question: &Question, index: usize) -> String {
    question
        .order
        .clone()
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Sum of numeric marks. Missing marks count as one, unparseable ones as zero.
/// Saturates at `u64::MAX`.
fn total_marks(questions: &[Question]) -> u64 {
    questions
        .iter()
        .map(|q| q.marks_or_default().trim().parse::<u64>().unwrap_or(0))
        .fold(0, u64::saturating_add)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
