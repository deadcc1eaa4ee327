#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for a stored résumé. The document itself lives in the JSONB
/// `data` column and deserializes into [`ResumeDocument`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A normalized résumé record as stored by the client.
///
/// Field names are camelCase on the wire (records originate from a JS-era
/// frontend). Every field defaults: absent or malformed-optional input
/// degrades to empty rather than failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub title: String,
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<Skill>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub custom_sections: Vec<CustomSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

/// A single skill. Legacy records store bare strings; newer records store
/// `{ name, level }` objects. The field sanitizer resolves everything to the
/// `Rated` shape so downstream consumers never branch on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skill {
    Rated {
        name: String,
        #[serde(default)]
        level: Option<String>,
    },
    PlainName(String),
}

impl Skill {
    pub fn name(&self) -> &str {
        match self {
            Skill::Rated { name, .. } => name,
            Skill::PlainName(name) => name,
        }
    }

    pub fn level(&self) -> Option<&str> {
        match self {
            Skill::Rated { level, .. } => level.as_deref(),
            Skill::PlainName(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: Option<String>,
    pub technologies: Technologies,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Technologies on a project. Legacy records store a single string where the
/// list belongs; the field sanitizer unifies both shapes into `List`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Technologies {
    List(Vec<String>),
    Single(String),
}

impl Default for Technologies {
    fn default() -> Self {
        Technologies::List(Vec::new())
    }
}

impl Technologies {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Technologies::List(items) => items,
            Technologies::Single(item) => std::slice::from_ref(item),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub title: String,
    pub content: String,
}
