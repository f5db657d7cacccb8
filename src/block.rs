use crate::render::ParagraphStyle;

/// Block-level elements collected by a [`crate::TypstDocument`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { style: ParagraphStyle, text: String },
}

impl Block {
    pub fn is_bullet(&self) -> bool {
        matches!(
            self,
            Block::Paragraph {
                style: ParagraphStyle::ListBullet,
                ..
            }
        )
    }
}
