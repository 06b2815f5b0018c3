use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("Unknown difficulty '{other}'")),
        }
    }
}

/// A multiple-choice question. `correct_index` points into `options`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Question as shown to learners, without the answer.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionView {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub skill_tag: String,
    pub difficulty: String,
    pub video_url: Option<String>,
    pub quiz: Json<Vec<QuizQuestion>>,
    pub xp_reward: i32,
    pub wallet_reward: i32,
    pub instructor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub skill_tag: String,
    pub difficulty: String,
    pub video_url: Option<String>,
    pub quiz: Vec<QuizQuestionView>,
    pub xp_reward: i32,
    pub wallet_reward: i32,
    pub instructor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CourseRow> for CourseView {
    fn from(row: CourseRow) -> Self {
        let quiz = row
            .quiz
            .0
            .into_iter()
            .map(|q| QuizQuestionView {
                question: q.question,
                options: q.options,
            })
            .collect();
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            skill_tag: row.skill_tag,
            difficulty: row.difficulty,
            video_url: row.video_url,
            quiz,
            xp_reward: row.xp_reward,
            wallet_reward: row.wallet_reward,
            instructor_id: row.instructor_id,
            created_at: row.created_at,
        }
    }
}

/// Compact course record used in recommendations.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub skill_tag: String,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub skill_tag: String,
    pub difficulty: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub xp_reward: i32,
    #[serde(default)]
    pub wallet_reward: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    pub category: Option<String>,
    pub skill: Option<String>,
    pub search: Option<String>,
    pub difficulty: Option<String>,
}
