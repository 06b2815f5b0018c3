//! Axum route handlers for resume analysis and bulk job matching.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::repo as jobs_repo;
use crate::matching::recommend::recommend_courses;
use crate::matching::resume_text::extract_resume_text;
use crate::matching::scorer::{rank_by_score, score_match, MatchReport, MatchTier};
use crate::matching::skills::{normalize_skills, SkillExtractor};
use crate::models::course::CourseSummary;
use crate::models::job::JobRow;
use crate::state::AppState;
use crate::users::repo as users_repo;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub score: u32,
    pub tier: MatchTier,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub advice: String,
    pub recommended_courses: Vec<CourseSummary>,
    /// Tags newly added to the caller's profile. Present only when signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_added: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    pub category: String,
    pub score: u32,
    pub tier: MatchTier,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Skills found in the resume and the job description, and how they compare.
#[derive(Debug, Clone)]
pub struct TextAnalysis {
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub report: MatchReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Core logic
// ────────────────────────────────────────────────────────────────────────────

pub fn analyze_text(extractor: &SkillExtractor, resume_text: &str, job_text: &str) -> TextAnalysis {
    let resume_skills = extractor.extract(resume_text);
    let job_skills = extractor.extract(job_text);
    let report = score_match(&job_skills, &resume_skills);
    TextAnalysis {
        resume_skills,
        job_skills,
        report,
    }
}

/// Scores every job against `candidate`, best first. Jobs with equal scores
/// keep their incoming order.
pub fn rank_jobs(jobs: Vec<JobRow>, candidate: &[String]) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs
        .into_iter()
        .map(|job| {
            let required = normalize_skills(&job.skills);
            let report = score_match(&required, candidate);
            JobMatch {
                job_id: job.id,
                title: job.title,
                company: job.company,
                category: job.category,
                score: report.score,
                tier: report.tier,
                matched_skills: report.matched,
                missing_skills: report.missing,
            }
        })
        .collect();
    rank_by_score(&mut matches, |m| m.score);
    matches
}

struct ResumeUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart body: a `resume` file and a `job_description` text field.
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<ResumeUpload> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await?;
                resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            "job_description" | "jobDescription" => {
                job_description = field.text().await?;
            }
            _ => {}
        }
    }

    let resume =
        resume.ok_or_else(|| AppError::Validation("A resume file is required".to_string()))?;
    let resume_text = extract_resume_text(
        resume.file_name.as_deref(),
        resume.content_type.as_deref(),
        resume.data,
    )
    .await?;

    let analysis = analyze_text(&state.skills, &resume_text, &job_description);
    let recommended_courses = recommend_courses(&state.db, &analysis.report.missing).await?;

    let skills_added = match &user {
        Some(user) if !analysis.resume_skills.is_empty() => {
            let existing = users_repo::find_by_id(&state.db, user.user_id)
                .await?
                .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?
                .skills;
            let added = users_repo::new_skills(&existing, &analysis.resume_skills);
            if !added.is_empty() {
                users_repo::union_skills(&state.db, user.user_id, &added).await?;
                info!("Added {} skills to user {} from resume", added.len(), user.user_id);
            }
            Some(added)
        }
        Some(_) => Some(Vec::new()),
        None => None,
    };

    let TextAnalysis {
        resume_skills,
        job_skills,
        report,
    } = analysis;

    Ok(Json(AnalyzeResponse {
        score: report.score,
        tier: report.tier,
        matched_skills: report.matched,
        missing_skills: report.missing,
        resume_skills,
        job_skills,
        advice: report.advice,
        recommended_courses,
        skills_added,
    }))
}

/// POST /api/match-jobs
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(req): Json<MatchJobsRequest>,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    let candidate = normalize_skills(&req.skills);
    let jobs = jobs_repo::all_jobs(&state.db).await?;

    let mut matches = rank_jobs(jobs, &candidate);
    if let Some(limit) = req.limit {
        matches.truncate(limit);
    }
    Ok(Json(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn extractor() -> SkillExtractor {
        SkillExtractor::with_default_vocabulary().unwrap()
    }

    fn job(title: &str, skills: &[&str]) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            category: "engineering".to_string(),
            description: String::new(),
            location: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            deadline: None,
            suggested_course_id: None,
            posted_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_analyze_react_node_against_react_docker() {
        let analysis = analyze_text(
            &extractor(),
            "Built SPAs with React and APIs with Node",
            "We need React and Docker experience",
        );
        assert_eq!(analysis.resume_skills, vec!["react", "node"]);
        assert_eq!(analysis.job_skills, vec!["react", "docker"]);
        assert_eq!(analysis.report.matched, vec!["react"]);
        assert_eq!(analysis.report.missing, vec!["docker"]);
        assert_eq!(analysis.report.score, 50);
    }

    #[test]
    fn test_analyze_empty_description_uses_fallback() {
        let analysis = analyze_text(
            &extractor(),
            "python, django, docker, git and sql",
            "",
        );
        assert_eq!(analysis.resume_skills.len(), 5);
        assert!(analysis.job_skills.is_empty());
        assert_eq!(analysis.report.score, 75);
    }

    #[test]
    fn test_rank_jobs_best_first_and_stable() {
        let jobs = vec![
            job("first", &["react", "docker"]),
            job("second", &["React"]),
            job("third", &["docker", "react"]),
            job("fourth", &["aws"]),
        ];
        let ranked = rank_jobs(jobs, &["react".to_string()]);
        let titles: Vec<&str> = ranked.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first", "third", "fourth"]);
        assert_eq!(ranked[0].score, 100);
        assert_eq!(ranked[1].score, 50);
        assert_eq!(ranked[3].score, 0);
        assert_eq!(ranked[3].missing_skills, vec!["aws"]);
    }

    #[test]
    fn test_rank_jobs_without_requirements_uses_fallback() {
        let ranked = rank_jobs(vec![job("open role", &[])], &["git".to_string(), "sql".to_string()]);
        assert_eq!(ranked[0].score, 30);
    }
}
