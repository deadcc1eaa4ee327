//! Multi-format résumé export engine.
//!
//! One sanitized résumé flows through the section selector into one of three
//! encoders (PDF, DOCX, plain text). The dispatcher owns format metadata,
//! filename derivation, and the fallback policy: once a résumé has loaded and
//! the caller is authorized, an export request never fails outright; a rich
//! encoder error downgrades to the plain-text rendering with HTTP success.

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod sanitize;
pub mod sections;
pub mod text;

use bytes::Bytes;
use genpdf::fonts::{FontData, FontFamily};
use thiserror::Error;
use tracing::warn;

use crate::models::resume::ResumeDocument;

/// Internal encoder failure. Always recovered by [`export_resume`]'s
/// fallback; never crosses the HTTP boundary.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("font family unavailable: {0}")]
    FontsUnavailable(String),

    #[error("pdf render failed: {0}")]
    Pdf(String),

    #[error("docx packaging failed: {0}")]
    Package(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Text,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Text => "application/octet-stream",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Text => "odt",
        }
    }
}

/// A finished export: payload plus the response metadata it ships with.
#[derive(Debug, Clone)]
pub struct Exported {
    pub data: Bytes,
    pub content_type: &'static str,
    pub filename: String,
}

/// Renders one résumé in the requested format.
///
/// Sanitizes, selects sections, and runs the matching encoder. Any encoder
/// failure is logged and re-rendered through the plain-text encoder; the
/// fallback response carries plain-text metadata so headers always describe
/// the payload actually sent.
pub fn export_resume(
    format: ExportFormat,
    document: &ResumeDocument,
    fonts: Option<&FontFamily<FontData>>,
) -> Exported {
    let document = sanitize::sanitize(document.clone());
    let sections = sections::select_sections(&document);

    match encode_sections(format, &sections, fonts) {
        Ok(data) => Exported {
            data,
            content_type: format.content_type(),
            filename: export_filename(&document.title, format),
        },
        Err(err) => {
            warn!(
                requested = ?format,
                error = %err,
                "Encoder failed; serving plain-text fallback"
            );
            Exported {
                data: Bytes::from(text::encode(&sections).into_bytes()),
                content_type: ExportFormat::Text.content_type(),
                filename: export_filename(&document.title, ExportFormat::Text),
            }
        }
    }
}

fn encode_sections(
    format: ExportFormat,
    sections: &[sections::SectionView],
    fonts: Option<&FontFamily<FontData>>,
) -> Result<Bytes, EncodeError> {
    match format {
        ExportFormat::Text => Ok(Bytes::from(text::encode(sections).into_bytes())),
        ExportFormat::Docx => {
            let body = docx::encode_body(sections);
            docx::package(&body).map(Bytes::from)
        }
        ExportFormat::Pdf => {
            let fonts = fonts
                .ok_or_else(|| EncodeError::FontsUnavailable("no font family loaded".to_string()))?;
            let mut buf = Vec::new();
            pdf::encode(sections, fonts.clone(), &mut buf)?;
            Ok(Bytes::from(buf))
        }
    }
}

/// Derives the download filename: every character of the title outside
/// `[A-Za-z0-9_]` is replaced 1:1 with `_`, then the format extension is
/// appended. An all-replaced title falls back to `resume`.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    let mut base: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if base.chars().all(|c| c == '_') {
        base = "resume".to_string();
    }
    format!("{base}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_resume() -> ResumeDocument {
        serde_json::from_value(json!({
            "title": "Sample",
            "summary": "Engineer with <edge> & ampersand cases.",
            "experience": [{
                "company": "Acme",
                "position": "Dev",
                "startDate": "2020",
                "isCurrent": true,
                "achievements": ["", "  ", "Led team"]
            }],
            "skills": ["Rust", { "name": "Go", "level": "expert" }],
            "customSections": [{ "title": "Awards", "content": "First place" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_filename_replaces_every_special_character() {
        assert_eq!(
            export_filename("Jane O'Brien: Résumé #1!", ExportFormat::Pdf),
            "Jane_O_Brien__R_sum___1_.pdf"
        );
    }

    #[test]
    fn test_filename_keeps_allowed_characters() {
        assert_eq!(
            export_filename("My_Resume_2024", ExportFormat::Docx),
            "My_Resume_2024.docx"
        );
    }

    #[test]
    fn test_filename_falls_back_when_title_is_all_specials() {
        assert_eq!(export_filename("!!!", ExportFormat::Text), "resume.odt");
    }

    #[test]
    fn test_text_export_metadata() {
        let exported = export_resume(ExportFormat::Text, &sample_resume(), None);
        assert_eq!(exported.content_type, "application/octet-stream");
        assert_eq!(exported.filename, "Sample.odt");
        assert!(!exported.data.is_empty());
    }

    #[test]
    fn test_docx_export_metadata() {
        let exported = export_resume(ExportFormat::Docx, &sample_resume(), None);
        assert_eq!(
            exported.content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(exported.filename, "Sample.docx");
        // Zip local file header magic.
        assert_eq!(&exported.data[..2], b"PK");
    }

    #[test]
    fn test_pdf_without_fonts_falls_back_to_plain_text() {
        let resume = sample_resume();
        let exported = export_resume(ExportFormat::Pdf, &resume, None);

        let sanitized = sanitize::sanitize(resume);
        let expected = text::encode(&sections::select_sections(&sanitized));
        assert_eq!(exported.data, Bytes::from(expected.into_bytes()));
        assert_eq!(exported.content_type, ExportFormat::Text.content_type());
        assert_eq!(exported.filename, "Sample.odt");
    }

    #[test]
    fn test_section_labels_match_across_all_encoders() {
        let sanitized = sanitize::sanitize(sample_resume());
        let sections = sections::select_sections(&sanitized);

        let text_out = text::encode(&sections);
        let docx_body = docx::encode_body(&sections);
        let pdf_blocks = pdf::layout_blocks(&sections);

        for label in sections.iter().filter_map(|s| s.label()) {
            assert!(text_out.contains(label), "text output missing '{label}'");
            assert!(
                docx_body.contains(&format!(">{label}</w:t>")),
                "docx body missing '{label}'"
            );
            assert!(
                pdf_blocks
                    .iter()
                    .any(|b| *b == pdf::PdfBlock::Heading(label.to_string())),
                "pdf blocks missing '{label}'"
            );
        }
    }

    #[test]
    fn test_escaping_differs_between_markup_and_text() {
        let sanitized = sanitize::sanitize(sample_resume());
        let sections = sections::select_sections(&sanitized);

        let text_out = text::encode(&sections);
        let docx_body = docx::encode_body(&sections);

        assert!(text_out.contains("Engineer with <edge> & ampersand cases."));
        assert!(docx_body.contains("Engineer with &lt;edge&gt; &amp; ampersand cases."));
    }
}
