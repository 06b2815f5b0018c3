use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::courses::repo as courses_repo;
use crate::errors::AppError;
use crate::jobs::repo;
use crate::matching::skills::normalize_skills;
use crate::models::course::CourseSummary;
use crate::models::job::{JobFilter, JobRow, NewJob};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: JobRow,
    pub applicant_count: i64,
    pub suggested_course: Option<CourseSummary>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub job_id: Uuid,
    pub applied: bool,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub job_id: Uuid,
    pub bookmarked: bool,
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(repo::list_jobs(&state.db, &filter).await?))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job = repo::find_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let applicant_count = repo::applicant_count(&state.db, id).await?;
    let suggested_course = match job.suggested_course_id {
        Some(course_id) => courses_repo::find_summary(&state.db, course_id).await?,
        None => None,
    };

    Ok(Json(JobDetailResponse {
        job,
        applicant_count,
        suggested_course,
    }))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<NewJob>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    for (field, value) in [
        ("title", &req.title),
        ("company", &req.company),
        ("category", &req.category),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }

    if let Some(course_id) = req.suggested_course_id {
        if courses_repo::find_summary(&state.db, course_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Suggested course {course_id} does not exist"
            )));
        }
    }

    let skills = normalize_skills(&req.skills);
    let job = repo::insert_job(&state.db, &req, &skills, user.user_id).await?;
    info!("User {} posted job {} at {}", user.user_id, job.id, job.company);
    Ok((StatusCode::CREATED, Json(job)))
}

/// POST /api/jobs/apply/:id
pub async fn handle_apply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let job = repo::find_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    if !job.is_open_on(Utc::now().date_naive()) {
        return Err(AppError::Validation(
            "The application deadline has passed".to_string(),
        ));
    }

    if !repo::insert_application(&state.db, id, user.user_id).await? {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    info!("User {} applied to job {}", user.user_id, id);
    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            job_id: id,
            applied: true,
        }),
    ))
}

/// POST /api/jobs/:id/bookmark
pub async fn handle_toggle_bookmark(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BookmarkResponse>, AppError> {
    if repo::find_job(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    let bookmarked = repo::toggle_bookmark(&state.db, id, user.user_id).await?;
    Ok(Json(BookmarkResponse {
        job_id: id,
        bookmarked,
    }))
}
