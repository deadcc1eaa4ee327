//! Section selector: decides which résumé sections render and in what
//! order, independent of the target format.
//!
//! All three encoders consume the same `Vec<SectionView>`, so a section
//! present in one output is present in the others by construction. Date
//! ranges (including the `Present` rule for current roles) are resolved here
//! exactly once; encoders only ever see render-ready strings.

use crate::models::resume::ResumeDocument;

/// One renderable section, carrying only the fields needed to render it.
///
/// Canonical order: Header, Summary, Experience, Education, Skills,
/// Projects, Certifications, then custom sections in stored order.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    Header { title: String, contact_line: String },
    Summary { text: String },
    Experience { entries: Vec<ExperienceView> },
    Education { entries: Vec<EducationView> },
    Skills { entries: Vec<SkillView> },
    Projects { entries: Vec<ProjectView> },
    Certifications { entries: Vec<CertificationView> },
    Custom { title: String, content: String },
}

impl SectionView {
    /// The section's heading label. The header block has none; custom
    /// sections use their stored title.
    pub fn label(&self) -> Option<&str> {
        match self {
            SectionView::Header { .. } => None,
            SectionView::Summary { .. } => Some("Summary"),
            SectionView::Experience { .. } => Some("Experience"),
            SectionView::Education { .. } => Some("Education"),
            SectionView::Skills { .. } => Some("Skills"),
            SectionView::Projects { .. } => Some("Projects"),
            SectionView::Certifications { .. } => Some("Certifications"),
            SectionView::Custom { title, .. } => Some(title),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceView {
    pub position: String,
    pub company: String,
    pub date_range: Option<String>,
    pub description: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationView {
    /// `degree, field_of_study` when the field is present, else the degree.
    pub degree_line: String,
    pub institution: String,
    pub date_range: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillView {
    pub name: String,
    pub level: Option<String>,
}

impl SkillView {
    pub fn display(&self) -> String {
        match &self.level {
            Some(level) => format!("{} ({})", self.name, level),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub date_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificationView {
    pub name: String,
    pub issuer: String,
    pub date: Option<String>,
    pub url: Option<String>,
}

/// Projects a sanitized résumé into its renderable sections.
///
/// Inclusion rule: a section appears iff its backing collection is non-empty
/// (Summary: non-empty after trimming). The header is always included.
pub fn select_sections(resume: &ResumeDocument) -> Vec<SectionView> {
    let mut sections = Vec::new();

    sections.push(SectionView::Header {
        title: resume.title.clone(),
        contact_line: contact_line(resume),
    });

    if let Some(summary) = &resume.summary {
        let trimmed = summary.trim();
        if !trimmed.is_empty() {
            sections.push(SectionView::Summary {
                text: trimmed.to_string(),
            });
        }
    }

    if !resume.experience.is_empty() {
        let entries = resume
            .experience
            .iter()
            .map(|e| ExperienceView {
                position: e.position.clone(),
                company: e.company.clone(),
                date_range: date_range(
                    e.start_date.as_deref(),
                    e.end_date.as_deref(),
                    e.is_current,
                ),
                description: non_blank(e.description.as_deref()),
                achievements: e.achievements.clone(),
            })
            .collect();
        sections.push(SectionView::Experience { entries });
    }

    if !resume.education.is_empty() {
        let entries = resume
            .education
            .iter()
            .map(|e| EducationView {
                degree_line: match non_blank(e.field_of_study.as_deref()) {
                    Some(field) => format!("{}, {}", e.degree, field),
                    None => e.degree.clone(),
                },
                institution: e.institution.clone(),
                date_range: date_range(e.start_date.as_deref(), e.end_date.as_deref(), false),
                description: non_blank(e.description.as_deref()),
            })
            .collect();
        sections.push(SectionView::Education { entries });
    }

    if !resume.skills.is_empty() {
        let entries = resume
            .skills
            .iter()
            .map(|s| SkillView {
                name: s.name().to_string(),
                level: s.level().map(str::to_string),
            })
            .collect();
        sections.push(SectionView::Skills { entries });
    }

    if !resume.projects.is_empty() {
        let entries = resume
            .projects
            .iter()
            .map(|p| ProjectView {
                name: p.name.clone(),
                description: non_blank(p.description.as_deref()),
                technologies: p.technologies.as_slice().to_vec(),
                url: non_blank(p.url.as_deref()),
                date_range: date_range(p.start_date.as_deref(), p.end_date.as_deref(), false),
            })
            .collect();
        sections.push(SectionView::Projects { entries });
    }

    if !resume.certifications.is_empty() {
        let entries = resume
            .certifications
            .iter()
            .map(|c| CertificationView {
                name: c.name.clone(),
                issuer: c.issuer.clone(),
                date: non_blank(c.date.as_deref()),
                url: non_blank(c.url.as_deref()),
            })
            .collect();
        sections.push(SectionView::Certifications { entries });
    }

    for custom in &resume.custom_sections {
        sections.push(SectionView::Custom {
            title: custom.title.clone(),
            content: custom.content.clone(),
        });
    }

    sections
}

/// Joins the non-empty contact fields with `" | "`, in fixed order, without
/// stray separators. The full name counts as one component.
fn contact_line(resume: &ResumeDocument) -> String {
    let info = &resume.personal_info;

    let full_name = [info.first_name.as_deref(), info.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut components = Vec::new();
    if !full_name.is_empty() {
        components.push(full_name);
    }
    for field in [
        info.email.as_deref(),
        info.phone.as_deref(),
        info.address.as_deref(),
        info.linkedin.as_deref(),
        info.website.as_deref(),
    ] {
        if let Some(value) = non_blank(field) {
            components.push(value);
        }
    }

    components.join(" | ")
}

/// Resolves a start/end pair into one display string.
///
/// A current role always ends in the literal `Present`, regardless of any
/// stored end date. Returns `None` when there is nothing to show.
fn date_range(start: Option<&str>, end: Option<&str>, is_current: bool) -> Option<String> {
    let start = non_blank(start);
    let end = if is_current {
        Some("Present".to_string())
    } else {
        non_blank(end)
    };

    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(start),
        (None, Some(end)) => Some(end),
        (None, None) => None,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sanitize::sanitize;
    use serde_json::json;

    fn resume_from(value: serde_json::Value) -> ResumeDocument {
        sanitize(serde_json::from_value(value).unwrap())
    }

    fn labels(sections: &[SectionView]) -> Vec<&str> {
        sections.iter().filter_map(|s| s.label()).collect()
    }

    #[test]
    fn test_canonical_section_order() {
        let resume = resume_from(json!({
            "title": "Full Resume",
            "summary": "Engineer.",
            "experience": [{ "company": "Acme", "position": "Dev" }],
            "education": [{ "institution": "MIT", "degree": "BSc" }],
            "skills": ["Rust"],
            "projects": [{ "name": "cli" }],
            "certifications": [{ "name": "CKA", "issuer": "CNCF" }],
            "customSections": [
                { "title": "Awards", "content": "First place" },
                { "title": "Talks", "content": "RustConf" }
            ]
        }));

        let sections = select_sections(&resume);
        assert!(matches!(sections[0], SectionView::Header { .. }));
        assert_eq!(
            labels(&sections),
            vec![
                "Summary",
                "Experience",
                "Education",
                "Skills",
                "Projects",
                "Certifications",
                "Awards",
                "Talks"
            ]
        );
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let resume = resume_from(json!({
            "title": "Sparse",
            "experience": [{ "company": "Acme", "position": "Dev" }]
        }));

        let sections = select_sections(&resume);
        assert_eq!(labels(&sections), vec!["Experience"]);
    }

    #[test]
    fn test_whitespace_summary_is_omitted() {
        let resume = resume_from(json!({ "title": "t", "summary": "   " }));
        let sections = select_sections(&resume);
        assert_eq!(labels(&sections), Vec::<&str>::new());
    }

    #[test]
    fn test_header_is_always_present() {
        let resume = resume_from(json!({ "title": "Empty" }));
        let sections = select_sections(&resume);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0],
            SectionView::Header {
                title: "Empty".to_string(),
                contact_line: String::new()
            }
        );
    }

    #[test]
    fn test_contact_line_skips_empty_fields() {
        let resume = resume_from(json!({
            "title": "t",
            "personalInfo": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "",
                "website": "ada.dev"
            }
        }));

        let sections = select_sections(&resume);
        let SectionView::Header { contact_line, .. } = &sections[0] else {
            panic!("first section must be the header");
        };
        assert_eq!(contact_line, "Ada Lovelace | ada@example.com | ada.dev");
    }

    #[test]
    fn test_current_role_renders_present_over_stored_end_date() {
        let resume = resume_from(json!({
            "title": "t",
            "experience": [{
                "company": "Acme",
                "position": "Dev",
                "startDate": "2021",
                "endDate": "2023",
                "isCurrent": true
            }]
        }));

        let sections = select_sections(&resume);
        let SectionView::Experience { entries } = &sections[1] else {
            panic!("expected experience section");
        };
        assert_eq!(entries[0].date_range.as_deref(), Some("2021 - Present"));
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(
            date_range(Some("2020"), Some("2022"), false).as_deref(),
            Some("2020 - 2022")
        );
        assert_eq!(date_range(Some("2020"), None, false).as_deref(), Some("2020"));
        assert_eq!(date_range(None, Some("2022"), false).as_deref(), Some("2022"));
        assert_eq!(date_range(None, None, false), None);
        assert_eq!(date_range(None, None, true).as_deref(), Some("Present"));
    }

    #[test]
    fn test_experience_order_is_preserved() {
        let resume = resume_from(json!({
            "title": "t",
            "experience": [
                { "company": "First", "position": "A" },
                { "company": "Second", "position": "B" },
                { "company": "Third", "position": "C" }
            ]
        }));

        let sections = select_sections(&resume);
        let SectionView::Experience { entries } = &sections[1] else {
            panic!("expected experience section");
        };
        let companies: Vec<&str> = entries.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_education_degree_line_includes_field_of_study() {
        let resume = resume_from(json!({
            "title": "t",
            "education": [
                { "institution": "MIT", "degree": "BSc", "fieldOfStudy": "Computer Science" },
                { "institution": "ETH", "degree": "MSc" }
            ]
        }));

        let sections = select_sections(&resume);
        let SectionView::Education { entries } = &sections[1] else {
            panic!("expected education section");
        };
        assert_eq!(entries[0].degree_line, "BSc, Computer Science");
        assert_eq!(entries[1].degree_line, "MSc");
    }

    #[test]
    fn test_skill_display_includes_level_when_present() {
        let view = SkillView {
            name: "Rust".to_string(),
            level: Some("expert".to_string()),
        };
        assert_eq!(view.display(), "Rust (expert)");

        let bare = SkillView {
            name: "SQL".to_string(),
            level: None,
        };
        assert_eq!(bare.display(), "SQL");
    }
}
