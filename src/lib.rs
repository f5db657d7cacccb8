mod block;
mod config;
mod error;
pub mod export;
pub mod generate;
mod parser;
mod question;
mod render;
pub mod sample;
mod typst;

use std::path::Path;

pub use block::Block;
pub use config::{Config, DocumentConfig, GeneratorConfig, LogConfig, OutputConfig};
pub use error::{Error, Result};
pub use question::{DEFAULT_MARKS, Question};
pub use render::{DocumentSink, Layout, ParagraphStyle, RenderOptions, render};
pub use typst::TypstDocument;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse tagged question markup into questions.
pub fn parse(text: &str) -> Vec<Question> {
    parser::parse(text)
}

/// Parse and render question markup into a document builder.
pub fn text_to_document(text: &str, options: &RenderOptions) -> TypstDocument {
    let mut doc = TypstDocument::new();
    render(&parse(text), options, &mut doc);
    doc
}

/// Convert question markup to Typst markup.
pub fn text_to_typst(text: &str, options: &RenderOptions) -> String {
    text_to_document(text, options).to_typst()
}

/// Convert question markup to PDF bytes.
pub fn text_to_pdf(text: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    text_to_document(text, options).to_pdf()
}

/// Render question markup and save the PDF at `path`.
pub fn write_document(text: &str, path: &Path, options: &RenderOptions) -> Result<()> {
    text_to_document(text, options).save(path)
}

/// Compile Typst markup to PDF bytes.
pub fn typst_to_pdf(source: String) -> Result<Vec<u8>> {
    use typst_library::layout::PagedDocument;

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(source)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_to_typst_renders_every_question() {
        let typst = text_to_typst(sample::SAMPLE_TEXT, &RenderOptions::for_layout(Layout::Simple));

        assert!(typst.contains("= HighScore.ai Assignment – AI-Generated Math Questions"));
        assert!(typst.contains("#enum(start: 1)[Q1. If \\$10x - 5 = 5x + 15\\$, what is the value of x? (1 mark)]"));
        assert!(typst.contains("#enum(start: 2)[Q2. A right triangle"));
        assert!(!typst.contains("Algebra & Geometry Mini Assessment"));
    }

    #[test]
    fn professional_is_the_default_layout() {
        let typst = text_to_typst(sample::SAMPLE_TEXT, &RenderOptions::default());

        assert!(typst.contains("Total Marks: 2"));
        assert!(typst.contains("(Easy) Algebra – Interpreting Variables (1 mark)"));
        assert!(typst.contains("#quote(block: true)[Explanation:]"));
    }

    #[test]
    fn write_document_creates_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("questions.pdf");

        write_document("@question 1+1?\n@option 2", &path, &RenderOptions::default()).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
