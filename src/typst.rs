use std::path::Path;

use tracing::info;

use crate::block::Block;
use crate::error::Result;
use crate::render::{DocumentSink, ParagraphStyle};

/// Bullet runs up to this length are kept on one page.
const UNBREAKABLE_LIST_LEN: usize = 5;

/// Document builder that lowers rendered questions to Typst and compiles them
/// to PDF.
#[derive(Debug, Default, Clone)]
pub struct TypstDocument {
    blocks: Vec<Block>,
}

impl TypstDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Typst markup for the collected blocks.
    pub fn to_typst(&self) -> String {
        blocks_to_typst(&self.blocks)
    }

    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        crate::typst_to_pdf(self.to_typst())
    }

    /// Write the Typst markup instead of compiling it.
    pub fn save_typst(&self, path: &Path) -> Result<()> {
        crate::export::write_bytes(path, self.to_typst().as_bytes())
    }
}

impl DocumentSink for TypstDocument {
    fn add_heading(&mut self, text: &str, level: u8) {
        self.blocks.push(Block::Heading {
            level: level.max(1),
            text: text.to_string(),
        });
    }

    fn add_paragraph(&mut self, text: &str, style: ParagraphStyle) {
        self.blocks.push(Block::Paragraph {
            style,
            text: text.to_string(),
        });
    }

    /// Compile to PDF and write it to `path`, creating parent directories.
    fn save(&self, path: &Path) -> Result<()> {
        let pdf = self.to_pdf()?;
        crate::export::write_bytes(path, &pdf)?;
        info!(path = %path.display(), bytes = pdf.len(), "saved document");
        Ok(())
    }
}

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block]) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");

    let mut numbered = 0;
    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } => {
                // Keep heading with following content
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, &mut numbered, &mut out);

                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], &mut numbered, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ if block.is_bullet() => {
                let run = blocks[i..].iter().take_while(|b| b.is_bullet()).count();
                let keep_together = run <= UNBREAKABLE_LIST_LEN;
                if keep_together {
                    out.push_str("#block(breakable: false)[\n");
                }
                for bullet in &blocks[i..i + run] {
                    emit_block(bullet, &mut numbered, &mut out);
                }
                if keep_together {
                    out.push_str("]\n");
                }
                out.push('\n');
                i += run - 1;
            }
            _ => {
                emit_block(block, &mut numbered, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn emit_block(block: &Block, numbered: &mut usize, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            escape_into(text, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { style, text } => match style {
            ParagraphStyle::Normal if text.is_empty() => {
                out.push_str("#v(0.6em)\n\n");
            }
            ParagraphStyle::Normal => {
                escape_into(text, out);
                out.push_str("\n\n");
            }
            ParagraphStyle::ListNumber => {
                *numbered += 1;
                out.push_str(&format!("#enum(start: {})[", numbered));
                escape_into(text, out);
                out.push_str("]\n\n");
            }
            ParagraphStyle::ListBullet => {
                out.push_str("#pad(left: 1.2em)[");
                escape_into(text, out);
                out.push_str("]\n");
            }
            ParagraphStyle::Quote => {
                out.push_str("#quote(block: true)[");
                escape_into(text, out);
                out.push_str("]\n\n");
            }
        },
    }
}

/// Escape `text` so it renders literally, turning newlines into line breaks.
fn escape_into(text: &str, out: &mut String) {
    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            out.push_str(" \\\n");
        }
        escape_line(line, out);
    }
}

fn escape_line(line: &str, out: &mut String) {
    let trimmed = line.trim_start();
    out.push_str(&line[..line.len() - trimmed.len()]);

    // Markers that only mean something at the start of a line
    let mut rest = trimmed;
    if ["- ", "+ ", "= ", "=="].iter().any(|m| trimmed.starts_with(*m)) || trimmed == "-" {
        out.push('\\');
    } else {
        let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let after = &trimmed[digits..];
        if digits > 0 && (after == "." || after.starts_with(". ")) {
            out.push_str(&trimmed[..digits]);
            out.push('\\');
            rest = after;
        }
    }

    for ch in rest.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Layout, RenderOptions, render};
    use crate::parse;

    const PREAMBLE: &str = "#set par(linebreaks: \"optimized\")\n\n";

    fn typst(blocks: impl FnOnce(&mut TypstDocument)) -> String {
        let mut doc = TypstDocument::new();
        blocks(&mut doc);
        doc.to_typst()
    }

    #[test]
    fn heading_with_following_content() {
        let result = typst(|doc| {
            doc.add_heading("Title", 1);
            doc.add_paragraph("Some text.", ParagraphStyle::Normal);
        });
        assert_eq!(
            result,
            format!("{PREAMBLE}#block(breakable: false)[\n= Title\n\nSome text.\n\n]\n\n")
        );
    }

    #[test]
    fn paragraph() {
        let result = typst(|doc| doc.add_paragraph("Hello world", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}Hello world\n\n"));
    }

    #[test]
    fn blank_paragraph_is_spacing() {
        let result = typst(|doc| doc.add_paragraph("", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}#v(0.6em)\n\n"));
    }

    #[test]
    fn numbered_paragraphs_continue_numbering() {
        let result = typst(|doc| {
            doc.add_paragraph("Q1. one", ParagraphStyle::ListNumber);
            doc.add_paragraph("between", ParagraphStyle::Normal);
            doc.add_paragraph("Q2. two", ParagraphStyle::ListNumber);
        });
        assert_eq!(
            result,
            format!(
                "{PREAMBLE}#enum(start: 1)[Q1. one]\n\nbetween\n\n#enum(start: 2)[Q2. two]\n\n"
            )
        );
    }

    #[test]
    fn short_bullet_run_kept_together() {
        let result = typst(|doc| {
            doc.add_paragraph("• 3", ParagraphStyle::ListBullet);
            doc.add_paragraph("✔ 4", ParagraphStyle::ListBullet);
            doc.add_paragraph("after", ParagraphStyle::Normal);
        });
        assert_eq!(
            result,
            format!(
                "{PREAMBLE}#block(breakable: false)[\n#pad(left: 1.2em)[• 3]\n#pad(left: 1.2em)[✔ 4]\n]\n\nafter\n\n"
            )
        );
    }

    #[test]
    fn long_bullet_run_may_break() {
        let result = typst(|doc| {
            for n in 0..6 {
                doc.add_paragraph(&format!("• {n}"), ParagraphStyle::ListBullet);
            }
        });
        assert!(!result.contains("#block(breakable: false)"));
        assert_eq!(result.matches("#pad(left: 1.2em)[").count(), 6);
    }

    #[test]
    fn quote() {
        let result = typst(|doc| doc.add_paragraph("Explanation:", ParagraphStyle::Quote));
        assert_eq!(
            result,
            format!("{PREAMBLE}#quote(block: true)[Explanation:]\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        let result = typst(|doc| {
            doc.add_paragraph("If $10x - 5 = 5x + 15$, find x_1 #1 @a [b]", ParagraphStyle::Normal)
        });
        assert_eq!(
            result,
            format!("{PREAMBLE}If \\$10x - 5 = 5x + 15\\$, find x\\_1 \\#1 \\@a \\[b\\]\n\n")
        );

        let result = typst(|doc| doc.add_paragraph("\\(\\frac{2}{3}\\)", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}\\\\(\\\\frac{{2}}{{3}}\\\\)\n\n"));

        let result = typst(|doc| doc.add_paragraph("see http://x", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}see http:\\/\\/x\n\n"));
    }

    #[test]
    fn escapes_line_start_markers() {
        let result = typst(|doc| doc.add_paragraph("- 5 is negative", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}\\- 5 is negative\n\n"));

        let result = typst(|doc| doc.add_paragraph("12. item", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}12\\. item\n\n"));

        let result = typst(|doc| doc.add_paragraph("12.5 is a number", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}12.5 is a number\n\n"));
    }

    #[test]
    fn newline_becomes_line_break() {
        let result = typst(|doc| doc.add_paragraph("one\ntwo", ParagraphStyle::Normal));
        assert_eq!(result, format!("{PREAMBLE}one \\\ntwo\n\n"));
    }

    #[test]
    fn rendered_question() {
        let mut doc = TypstDocument::new();
        let options = RenderOptions {
            layout: Layout::Simple,
            title: "Quiz".to_string(),
            intro: vec![],
        };
        render(
            &parse("@question What is 2+2?\n@Order 1\n@option 3\n@@option 4\n@explanation Add."),
            &options,
            &mut doc,
        );

        assert_eq!(doc.blocks().len(), 6);
        assert_eq!(
            doc.to_typst(),
            format!(
                "{PREAMBLE}#block(breakable: false)[\n= Quiz\n\n#enum(start: 1)[Q1. What is 2+2? (1 mark)]\n\n]\n\n\
                 #block(breakable: false)[\n#pad(left: 1.2em)[• 3]\n#pad(left: 1.2em)[✔ 4]\n]\n\n\
                 Explanation: Add.\n\n#v(0.6em)\n\n"
            )
        );
    }

    #[test]
    fn saves_through_sink_trait() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quiz.pdf");

        let mut doc = TypstDocument::new();
        render(&parse("@question 2+2?\n@option 4"), &RenderOptions::default(), &mut doc);
        let sink: &dyn DocumentSink = &doc;
        sink.save(&path).unwrap();

        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn compiles_to_pdf() {
        let mut doc = TypstDocument::new();
        render(
            &parse(crate::sample::SAMPLE_TEXT),
            &RenderOptions::default(),
            &mut doc,
        );
        let pdf = doc.to_pdf().unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
