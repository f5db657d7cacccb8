use crate::question::Question;

/// Token that starts every question block.
const QUESTION_TAG: &str = "@question";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    Instruction,
    Difficulty,
    Order,
    Correct,
    Option,
    Explanation,
    Subject,
    Unit,
    Topic,
    Marks,
}

// Checked in order. `@@option` must come before `@option` so the correct
// answer never lands in the options list.
const TAGS: &[(&str, Tag)] = &[
    ("@instruction", Tag::Instruction),
    ("@difficulty", Tag::Difficulty),
    ("@Order", Tag::Order),
    ("@@option", Tag::Correct),
    ("@option", Tag::Option),
    ("@explanation", Tag::Explanation),
    ("@subject", Tag::Subject),
    ("@unit", Tag::Unit),
    ("@topic", Tag::Topic),
    ("@plusmarks", Tag::Marks),
];

/// Parse tagged question markup into a list of questions.
///
/// Anything before the first `@question` is dropped, and lines that carry no
/// known tag are ignored. Parsing never fails.
pub fn parse(text: &str) -> Vec<Question> {
    text.trim()
        .split(QUESTION_TAG)
        .skip(1)
        .map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Question {
    let mut lines = block.trim().lines();
    let mut question = Question::new(lines.next().unwrap_or_default().trim());

    for line in lines {
        if let Some((tag, value)) = classify(line) {
            apply(&mut question, tag, value);
        }
    }

    question
}

/// Match a line against the known tags, returning the tag and its trimmed value.
fn classify(line: &str) -> Option<(Tag, &str)> {
    TAGS.iter()
        .find_map(|(token, tag)| line.strip_prefix(*token).map(|value| (*tag, value.trim())))
}

fn apply(question: &mut Question, tag: Tag, value: &str) {
    let value = value.to_string();
    match tag {
        Tag::Option => question.options.push(value),
        Tag::Instruction => question.instruction = Some(value),
        Tag::Difficulty => question.difficulty = Some(value),
        Tag::Order => question.order = Some(value),
        Tag::Correct => question.correct = Some(value),
        Tag::Explanation => question.explanation = Some(value),
        Tag::Subject => question.subject = Some(value),
        Tag::Unit => question.unit = Some(value),
        Tag::Topic => question.topic = Some(value),
        Tag::Marks => question.marks = Some(value),
    }
}
