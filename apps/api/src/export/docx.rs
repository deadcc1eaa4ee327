//! Markup package encoder: WordprocessingML body plus the OOXML zip
//! container.
//!
//! Every user-supplied string is XML-escaped before insertion; résumé text
//! is user-controlled and raw insertion would corrupt the document or allow
//! markup injection. Spacing between blocks uses explicit empty paragraph
//! nodes rather than paragraph-spacing styles.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::sections::SectionView;
use crate::export::EncodeError;

// Run sizes are OOXML half-points: 40 = 20pt, 28 = 14pt.
const TITLE_SIZE: u32 = 40;
const HEADING_SIZE: u32 = 28;

/// Renders the selected sections into a deterministic `<w:body>` fragment.
///
/// The complete body is produced up front; the containing package needs full
/// entries, so there is no streaming variant of this encoder.
pub fn encode_body(sections: &[SectionView]) -> String {
    let mut body = String::new();

    for section in sections {
        match section {
            SectionView::Header {
                title,
                contact_line,
            } => {
                push_heading(&mut body, title, TITLE_SIZE);
                if !contact_line.is_empty() {
                    push_text(&mut body, contact_line);
                }
                push_spacer(&mut body);
            }

            SectionView::Summary { text } => {
                push_heading(&mut body, "Summary", HEADING_SIZE);
                push_text(&mut body, text);
                push_spacer(&mut body);
            }

            SectionView::Experience { entries } => {
                push_heading(&mut body, "Experience", HEADING_SIZE);
                for entry in entries {
                    push_strong(&mut body, &entry.position);
                    push_text(&mut body, &entry.company);
                    if let Some(date_range) = &entry.date_range {
                        push_text(&mut body, date_range);
                    }
                    if let Some(description) = &entry.description {
                        push_text(&mut body, description);
                    }
                    for achievement in &entry.achievements {
                        push_bullet(&mut body, achievement);
                    }
                    push_spacer(&mut body);
                }
            }

            SectionView::Education { entries } => {
                push_heading(&mut body, "Education", HEADING_SIZE);
                for entry in entries {
                    push_strong(&mut body, &entry.degree_line);
                    push_text(&mut body, &entry.institution);
                    if let Some(date_range) = &entry.date_range {
                        push_text(&mut body, date_range);
                    }
                    if let Some(description) = &entry.description {
                        push_text(&mut body, description);
                    }
                    push_spacer(&mut body);
                }
            }

            SectionView::Skills { entries } => {
                push_heading(&mut body, "Skills", HEADING_SIZE);
                let joined = entries
                    .iter()
                    .map(|s| s.display())
                    .collect::<Vec<_>>()
                    .join(", ");
                push_text(&mut body, &joined);
                push_spacer(&mut body);
            }

            SectionView::Projects { entries } => {
                push_heading(&mut body, "Projects", HEADING_SIZE);
                for entry in entries {
                    push_strong(&mut body, &entry.name);
                    if let Some(date_range) = &entry.date_range {
                        push_text(&mut body, date_range);
                    }
                    if let Some(description) = &entry.description {
                        push_text(&mut body, description);
                    }
                    if !entry.technologies.is_empty() {
                        push_text(
                            &mut body,
                            &format!("Technologies: {}", entry.technologies.join(", ")),
                        );
                    }
                    if let Some(url) = &entry.url {
                        push_text(&mut body, url);
                    }
                    push_spacer(&mut body);
                }
            }

            SectionView::Certifications { entries } => {
                push_heading(&mut body, "Certifications", HEADING_SIZE);
                for entry in entries {
                    push_strong(&mut body, &entry.name);
                    push_text(&mut body, &entry.issuer);
                    if let Some(date) = &entry.date {
                        push_text(&mut body, date);
                    }
                    if let Some(url) = &entry.url {
                        push_text(&mut body, url);
                    }
                    push_spacer(&mut body);
                }
            }

            SectionView::Custom { title, content } => {
                push_heading(&mut body, title, HEADING_SIZE);
                push_text(&mut body, content);
                push_spacer(&mut body);
            }
        }
    }

    body
}

/// Wraps a body fragment into a minimal OOXML package:
/// `[Content_Types].xml`, `_rels/.rels`, and `word/document.xml`.
pub fn package(body: &str) -> Result<Vec<u8>, EncodeError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", deflated)
        .map_err(package_err)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())
        .map_err(package_err)?;

    zip.start_file("_rels/.rels", deflated).map_err(package_err)?;
    zip.write_all(RELS_XML.as_bytes()).map_err(package_err)?;

    let document = format!(
        "{}<w:document xmlns:w=\"{}\"><w:body>{}</w:body></w:document>",
        XML_DECLARATION, WORDPROCESSINGML_NS, body
    );
    zip.start_file("word/document.xml", deflated)
        .map_err(package_err)?;
    zip.write_all(document.as_bytes()).map_err(package_err)?;

    let cursor = zip.finish().map_err(package_err)?;
    Ok(cursor.into_inner())
}

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

fn package_err(err: impl std::fmt::Display) -> EncodeError {
    EncodeError::Package(err.to_string())
}

fn push_heading(body: &mut String, text: &str, half_points: u32) {
    body.push_str(&format!(
        "<w:p><w:pPr><w:rPr><w:b/><w:sz w:val=\"{half_points}\"/></w:rPr></w:pPr>\
         <w:r><w:rPr><w:b/><w:sz w:val=\"{half_points}\"/></w:rPr>\
         <w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        escape(text)
    ));
}

fn push_strong(body: &mut String, text: &str) {
    body.push_str(&format!(
        "<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        escape(text)
    ));
}

fn push_text(body: &mut String, text: &str) {
    body.push_str(&format!(
        "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        escape(text)
    ));
}

fn push_bullet(body: &mut String, text: &str) {
    // Bullet glyph in the run keeps the package free of a numbering part.
    body.push_str(&format!(
        "<w:p><w:r><w:t xml:space=\"preserve\">\u{2022} {}</w:t></w:r></w:p>",
        escape(text)
    ));
}

/// Explicit line-break node between blocks; spacing is controlled by these
/// rather than paragraph-spacing styles.
fn push_spacer(body: &mut String) {
    body.push_str("<w:p/>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sanitize::sanitize;
    use crate::export::sections::select_sections;
    use crate::models::resume::ResumeDocument;
    use serde_json::json;
    use std::io::Read;

    fn body_for(value: serde_json::Value) -> String {
        let resume: ResumeDocument = serde_json::from_value(value).unwrap();
        encode_body(&select_sections(&sanitize(resume)))
    }

    #[test]
    fn test_user_text_is_escaped() {
        let body = body_for(json!({
            "title": "t",
            "summary": "Worked on <search> & friends"
        }));

        assert!(body.contains("Worked on &lt;search&gt; &amp; friends"));
        assert!(!body.contains("<search>"));
    }

    #[test]
    fn test_headings_carry_bold_and_size() {
        let body = body_for(json!({ "title": "t", "summary": "s" }));
        assert!(body.contains("<w:b/><w:sz w:val=\"28\"/>"));
        assert!(body.contains(">Summary</w:t>"));
    }

    #[test]
    fn test_spacer_nodes_separate_blocks() {
        let body = body_for(json!({ "title": "t", "summary": "s" }));
        assert!(body.contains("<w:p/>"));
    }

    #[test]
    fn test_body_is_deterministic() {
        let value = json!({
            "title": "t",
            "skills": ["Rust", { "name": "Go", "level": "expert" }],
            "experience": [{ "company": "Acme", "position": "Dev" }]
        });
        assert_eq!(body_for(value.clone()), body_for(value));
    }

    #[test]
    fn test_achievements_render_as_bullets() {
        let body = body_for(json!({
            "title": "t",
            "experience": [{
                "company": "Acme",
                "position": "Dev",
                "achievements": ["Led team"]
            }]
        }));
        assert!(body.contains("\u{2022} Led team"));
    }

    #[test]
    fn test_package_contains_required_entries() {
        let body = body_for(json!({ "title": "Doc", "summary": "s" }));
        let bytes = package(&body).unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"[Content_Types].xml".to_string()));
        assert!(names.contains(&"_rels/.rels".to_string()));
        assert!(names.contains(&"word/document.xml".to_string()));

        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert!(document.starts_with(XML_DECLARATION));
        assert!(document.contains("<w:body>"));
        assert!(document.contains(">Summary</w:t>"));
    }
}
