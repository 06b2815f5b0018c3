use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvExperience {
    pub company: String,
    pub role: String,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvEducation {
    pub institution: String,
    pub degree: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub result: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvSkill {
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
}

/// Free-form CV sections. Every section is optional on input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CvDocument {
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<CvExperience>,
    #[serde(default)]
    pub education: Vec<CvEducation>,
    #[serde(default)]
    pub projects: Vec<CvProject>,
    #[serde(default)]
    pub skills: Vec<CvSkill>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CvRow {
    pub user_id: Uuid,
    pub document: Json<CvDocument>,
    pub updated_at: DateTime<Utc>,
}
