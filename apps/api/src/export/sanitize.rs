//! Field sanitizer: normalizes optional and legacy-shaped fields before any
//! encoder runs.
//!
//! Pure and total: malformed optional input degrades to empty, never errors.
//! Encoders rely on this having run and do not re-check blank entries.

use crate::models::resume::{ResumeDocument, Skill, Technologies};

/// Normalizes a résumé document for export.
///
/// - Blank `achievements` entries are removed; survivor order is preserved.
/// - `technologies` is unified to a list: a legacy single string wraps into a
///   one-element list, blank entries are dropped, absent becomes empty.
/// - `skills` is unified to the `Rated` shape; skills with blank names are
///   dropped so downstream consumers never branch on the legacy variant.
///
/// Idempotent: applying it twice yields the same document.
pub fn sanitize(mut resume: ResumeDocument) -> ResumeDocument {
    for entry in &mut resume.experience {
        entry.achievements.retain(|a| !a.trim().is_empty());
    }

    for project in &mut resume.projects {
        let technologies: Vec<String> = project
            .technologies
            .as_slice()
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect();
        project.technologies = Technologies::List(technologies);
    }

    resume.skills = resume
        .skills
        .into_iter()
        .filter(|skill| !skill.name().trim().is_empty())
        .map(|skill| match skill {
            Skill::PlainName(name) => Skill::Rated { name, level: None },
            rated => rated,
        })
        .collect();

    resume
}
