//! Paginated binary encoder.
//!
//! # Architecture
//! - `layout_blocks` is the pure projection: sections become an ordered list
//!   of styled [`PdfBlock`]s in document order. Unit-testable without font
//!   assets.
//! - `encode` maps blocks to `genpdf` elements and renders. Pagination and
//!   line wrapping happen inside `genpdf`; this encoder never computes page
//!   breaks itself.
//!
//! The output writer receives bytes during `render` and is finalized exactly
//! once on every exit path (`render` consumes the document). A mid-render
//! failure leaves the already-written prefix in the stream; callers must not
//! assume atomicity here. The dispatcher's plain-text fallback covers the
//! caller-visible behavior.

use std::io::Write;

use genpdf::elements::{Break, Paragraph, UnorderedList};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, SimplePageDecorator};
use tracing::warn;

use crate::export::sections::SectionView;
use crate::export::EncodeError;

const BODY_SIZE: u8 = 11;
const HEADING_SIZE: u8 = 14;
const TITLE_SIZE: u8 = 20;

/// One styled block in document order. The renderer decides where pages
/// break; blocks only carry content and emphasis.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfBlock {
    Title(String),
    Heading(String),
    SubHeading(String),
    Meta(String),
    Body(String),
    Bullets(Vec<String>),
    Gap,
}

/// Projects the selected sections into ordered styled blocks.
pub fn layout_blocks(sections: &[SectionView]) -> Vec<PdfBlock> {
    let mut blocks = Vec::new();

    for section in sections {
        match section {
            SectionView::Header {
                title,
                contact_line,
            } => {
                blocks.push(PdfBlock::Title(title.clone()));
                if !contact_line.is_empty() {
                    blocks.push(PdfBlock::Meta(contact_line.clone()));
                }
                blocks.push(PdfBlock::Gap);
            }

            SectionView::Summary { text } => {
                blocks.push(PdfBlock::Heading("Summary".to_string()));
                blocks.push(PdfBlock::Body(text.clone()));
                blocks.push(PdfBlock::Gap);
            }

            SectionView::Experience { entries } => {
                blocks.push(PdfBlock::Heading("Experience".to_string()));
                for entry in entries {
                    blocks.push(PdfBlock::SubHeading(entry.position.clone()));
                    if !entry.company.is_empty() {
                        blocks.push(PdfBlock::Meta(entry.company.clone()));
                    }
                    if let Some(date_range) = &entry.date_range {
                        blocks.push(PdfBlock::Meta(date_range.clone()));
                    }
                    if let Some(description) = &entry.description {
                        blocks.push(PdfBlock::Body(description.clone()));
                    }
                    if !entry.achievements.is_empty() {
                        blocks.push(PdfBlock::Bullets(entry.achievements.clone()));
                    }
                    blocks.push(PdfBlock::Gap);
                }
            }

            SectionView::Education { entries } => {
                blocks.push(PdfBlock::Heading("Education".to_string()));
                for entry in entries {
                    blocks.push(PdfBlock::SubHeading(entry.degree_line.clone()));
                    if !entry.institution.is_empty() {
                        blocks.push(PdfBlock::Meta(entry.institution.clone()));
                    }
                    if let Some(date_range) = &entry.date_range {
                        blocks.push(PdfBlock::Meta(date_range.clone()));
                    }
                    if let Some(description) = &entry.description {
                        blocks.push(PdfBlock::Body(description.clone()));
                    }
                    blocks.push(PdfBlock::Gap);
                }
            }

            SectionView::Skills { entries } => {
                blocks.push(PdfBlock::Heading("Skills".to_string()));
                let joined = entries
                    .iter()
                    .map(|s| s.display())
                    .collect::<Vec<_>>()
                    .join(", ");
                blocks.push(PdfBlock::Body(joined));
                blocks.push(PdfBlock::Gap);
            }

            SectionView::Projects { entries } => {
                blocks.push(PdfBlock::Heading("Projects".to_string()));
                for entry in entries {
                    blocks.push(PdfBlock::SubHeading(entry.name.clone()));
                    if let Some(date_range) = &entry.date_range {
                        blocks.push(PdfBlock::Meta(date_range.clone()));
                    }
                    if let Some(description) = &entry.description {
                        blocks.push(PdfBlock::Body(description.clone()));
                    }
                    if !entry.technologies.is_empty() {
                        blocks.push(PdfBlock::Meta(format!(
                            "Technologies: {}",
                            entry.technologies.join(", ")
                        )));
                    }
                    if let Some(url) = &entry.url {
                        blocks.push(PdfBlock::Meta(url.clone()));
                    }
                    blocks.push(PdfBlock::Gap);
                }
            }

            SectionView::Certifications { entries } => {
                blocks.push(PdfBlock::Heading("Certifications".to_string()));
                for entry in entries {
                    blocks.push(PdfBlock::SubHeading(entry.name.clone()));
                    if !entry.issuer.is_empty() {
                        blocks.push(PdfBlock::Meta(entry.issuer.clone()));
                    }
                    if let Some(date) = &entry.date {
                        blocks.push(PdfBlock::Meta(date.clone()));
                    }
                    if let Some(url) = &entry.url {
                        blocks.push(PdfBlock::Meta(url.clone()));
                    }
                    blocks.push(PdfBlock::Gap);
                }
            }

            SectionView::Custom { title, content } => {
                blocks.push(PdfBlock::Heading(title.clone()));
                blocks.push(PdfBlock::Body(content.clone()));
                blocks.push(PdfBlock::Gap);
            }
        }
    }

    blocks
}

/// Renders the selected sections as a PDF into `out`.
///
/// Emits blocks in document order; `genpdf` performs pagination.
pub fn encode<W: Write>(
    sections: &[SectionView],
    fonts: FontFamily<FontData>,
    out: W,
) -> Result<(), EncodeError> {
    let mut doc = Document::new(fonts);
    doc.set_font_size(BODY_SIZE);
    if let Some(SectionView::Header { title, .. }) = sections.first() {
        doc.set_title(title.clone());
    }

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    for block in layout_blocks(sections) {
        match block {
            PdfBlock::Title(text) => doc.push(
                Paragraph::new(text)
                    .aligned(Alignment::Center)
                    .styled(Style::new().bold().with_font_size(TITLE_SIZE)),
            ),
            PdfBlock::Heading(text) => doc.push(
                Paragraph::new(text).styled(Style::new().bold().with_font_size(HEADING_SIZE)),
            ),
            PdfBlock::SubHeading(text) => {
                doc.push(Paragraph::new(text).styled(Style::new().bold()))
            }
            PdfBlock::Meta(text) => doc.push(Paragraph::new(text).styled(Style::new().italic())),
            PdfBlock::Body(text) => doc.push(Paragraph::new(text)),
            PdfBlock::Bullets(items) => {
                let mut list = UnorderedList::new();
                for item in items {
                    list.push(Paragraph::new(item));
                }
                doc.push(list);
            }
            PdfBlock::Gap => doc.push(Break::new(1.0)),
        }
    }

    doc.render(out).map_err(|e| EncodeError::Pdf(e.to_string()))
}

/// Loads the four-variant font family the renderer needs. Called once at
/// startup; a missing directory downgrades PDF export to the text fallback.
pub fn load_font_family(dir: &str, name: &str) -> Option<FontFamily<FontData>> {
    match genpdf::fonts::from_files(dir, name, None) {
        Ok(fonts) => Some(fonts),
        Err(e) => {
            warn!("Font family '{name}' not loadable from {dir}: {e}. PDF export will fall back to plain text");
            None
        }
    }
}
