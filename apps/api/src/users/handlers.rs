use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::skills::normalize_skills;
use crate::models::user::{LeaderboardEntry, UserProfile};
use crate::state::AppState;
use crate::users::repo;

const LEADERBOARD_SIZE: i64 = 10;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
    pub bookmarked_jobs: Vec<Uuid>,
    pub enrolled_courses: Vec<Uuid>,
    pub verified_courses: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AddSkillsRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AddSkillsResponse {
    pub skills: Vec<String>,
    pub added: Vec<String>,
}

/// GET /api/me
pub async fn handle_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let row = repo::find_by_id(&state.db, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(MeResponse {
        user: row.into(),
        bookmarked_jobs: repo::bookmarked_job_ids(&state.db, user.user_id).await?,
        enrolled_courses: repo::enrolled_course_ids(&state.db, user.user_id).await?,
        verified_courses: repo::verified_course_ids(&state.db, user.user_id).await?,
    }))
}

/// POST /api/me/skills
pub async fn handle_add_skills(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AddSkillsRequest>,
) -> Result<Json<AddSkillsResponse>, AppError> {
    let tags = normalize_skills(&req.skills);
    if tags.is_empty() {
        return Err(AppError::Validation("No skills provided".to_string()));
    }

    let existing = repo::find_by_id(&state.db, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
        .skills;
    let added = repo::new_skills(&existing, &tags);
    let skills = repo::union_skills(&state.db, user.user_id, &tags).await?;

    Ok(Json(AddSkillsResponse { skills, added }))
}

/// GET /api/leaderboard
pub async fn handle_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    Ok(Json(repo::leaderboard(&state.db, LEADERBOARD_SIZE).await?))
}
