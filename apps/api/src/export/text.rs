//! Plain-text encoder.
//!
//! Flat, human-readable rendering: a label line per section, one
//! blank-line-separated paragraph per entry, fields joined with single
//! newlines, absent optional fields omitted. No escaping. This encoder is
//! also the universal fallback when the PDF or DOCX encoder fails.

use crate::export::sections::SectionView;

pub fn encode(sections: &[SectionView]) -> String {
    let mut paragraphs: Vec<String> = Vec::new();

    for section in sections {
        match section {
            SectionView::Header {
                title,
                contact_line,
            } => {
                let mut lines = vec![title.as_str()];
                if !contact_line.is_empty() {
                    lines.push(contact_line.as_str());
                }
                paragraphs.push(lines.join("\n"));
            }

            SectionView::Summary { text } => {
                paragraphs.push("Summary".to_string());
                paragraphs.push(text.clone());
            }

            SectionView::Experience { entries } => {
                paragraphs.push("Experience".to_string());
                for entry in entries {
                    let mut lines = vec![entry.position.clone(), entry.company.clone()];
                    if let Some(date_range) = &entry.date_range {
                        lines.push(date_range.clone());
                    }
                    if let Some(description) = &entry.description {
                        lines.push(description.clone());
                    }
                    for achievement in &entry.achievements {
                        lines.push(format!("- {achievement}"));
                    }
                    paragraphs.push(lines.join("\n"));
                }
            }

            SectionView::Education { entries } => {
                paragraphs.push("Education".to_string());
                for entry in entries {
                    let mut lines = vec![entry.degree_line.clone(), entry.institution.clone()];
                    if let Some(date_range) = &entry.date_range {
                        lines.push(date_range.clone());
                    }
                    if let Some(description) = &entry.description {
                        lines.push(description.clone());
                    }
                    paragraphs.push(lines.join("\n"));
                }
            }

            SectionView::Skills { entries } => {
                paragraphs.push("Skills".to_string());
                let joined = entries
                    .iter()
                    .map(|s| s.display())
                    .collect::<Vec<_>>()
                    .join(", ");
                paragraphs.push(joined);
            }

            SectionView::Projects { entries } => {
                paragraphs.push("Projects".to_string());
                for entry in entries {
                    let mut lines = vec![entry.name.clone()];
                    if let Some(date_range) = &entry.date_range {
                        lines.push(date_range.clone());
                    }
                    if let Some(description) = &entry.description {
                        lines.push(description.clone());
                    }
                    if !entry.technologies.is_empty() {
                        lines.push(format!("Technologies: {}", entry.technologies.join(", ")));
                    }
                    if let Some(url) = &entry.url {
                        lines.push(url.clone());
                    }
                    paragraphs.push(lines.join("\n"));
                }
            }

            SectionView::Certifications { entries } => {
                paragraphs.push("Certifications".to_string());
                for entry in entries {
                    let mut lines = vec![entry.name.clone(), entry.issuer.clone()];
                    if let Some(date) = &entry.date {
                        lines.push(date.clone());
                    }
                    if let Some(url) = &entry.url {
                        lines.push(url.clone());
                    }
                    paragraphs.push(lines.join("\n"));
                }
            }

            SectionView::Custom { title, content } => {
                paragraphs.push(title.clone());
                paragraphs.push(content.clone());
            }
        }
    }

    let mut out = paragraphs.join("\n\n");
    out.push('\n');
    out
}
