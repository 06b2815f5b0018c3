use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub category: String,
    pub description: String,
    pub location: Option<String>,
    /// Required skills, lower-cased on write.
    pub skills: Vec<String>,
    pub deadline: Option<NaiveDate>,
    pub suggested_course_id: Option<Uuid>,
    pub posted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    /// A job with no deadline is always open.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.deadline.map_or(true, |d| today <= d)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub deadline: Option<NaiveDate>,
    pub suggested_course_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub skill: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_with_deadline(deadline: Option<NaiveDate>) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Frontend Engineer".to_string(),
            company: "Pathao".to_string(),
            category: "engineering".to_string(),
            description: String::new(),
            location: None,
            skills: vec!["react".to_string()],
            deadline,
            suggested_course_id: None,
            posted_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_deadline_day_is_still_open() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let job = job_with_deadline(Some(day));
        assert!(job.is_open_on(day));
        assert!(!job.is_open_on(day.succ_opt().unwrap()));
    }

    #[test]
    fn test_no_deadline_is_open() {
        let job = job_with_deadline(None);
        assert!(job.is_open_on(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()));
    }
}
