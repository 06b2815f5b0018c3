use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::courses::quiz::{grade_quiz, QuizResult};
use crate::courses::repo;
use crate::courses::validation::validate_course;
use crate::errors::AppError;
use crate::models::course::{CourseFilter, CourseView, NewCourse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub answers: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    #[serde(flatten)]
    pub result: QuizResult,
    pub skill_tag: String,
    /// True only on the first successful verification.
    pub rewards_granted: bool,
    pub xp_awarded: i32,
    pub wallet_awarded: i32,
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub course_id: Uuid,
    pub newly_enrolled: bool,
}

/// GET /api/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Result<Json<Vec<CourseView>>, AppError> {
    let courses = repo::list_courses(&state.db, &filter).await?;
    Ok(Json(courses.into_iter().map(CourseView::from).collect()))
}

/// GET /api/courses/:id
pub async fn handle_get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseView>, AppError> {
    let course = repo::find_course(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {id} not found")))?;
    Ok(Json(course.into()))
}

/// POST /api/courses
pub async fn handle_create_course(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<NewCourse>,
) -> Result<(StatusCode, Json<CourseView>), AppError> {
    user.require_course_author()?;
    let valid = validate_course(&req)?;

    let course = repo::insert_course(&state.db, &req, &valid, user.user_id).await?;
    info!(
        "Instructor {} created course {} ({})",
        user.user_id, course.id, course.skill_tag
    );
    Ok((StatusCode::CREATED, Json(course.into())))
}

/// POST /api/courses/:id/enroll
pub async fn handle_enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollResponse>, AppError> {
    if repo::find_summary(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("Course {id} not found")));
    }
    let newly_enrolled = repo::enroll(&state.db, id, user.user_id).await?;
    Ok(Json(EnrollResponse {
        course_id: id,
        newly_enrolled,
    }))
}

/// POST /api/courses/:id/verify
///
/// Grades the quiz. The first pass credits the course rewards and adds the
/// skill tag to the user's profile, all in one transaction.
pub async fn handle_verify(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let course = repo::find_course(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {id} not found")))?;

    let result = grade_quiz(&course.quiz.0, &req.answers)?;

    let rewards_granted = if result.passed {
        repo::complete_and_reward(&state.db, &course, user.user_id, result.percent).await?
    } else {
        false
    };

    if rewards_granted {
        info!(
            "User {} verified '{}' via course {}",
            user.user_id, course.skill_tag, id
        );
    }

    let (xp_awarded, wallet_awarded) = if rewards_granted {
        (course.xp_reward, course.wallet_reward)
    } else {
        (0, 0)
    };

    Ok(Json(VerifyResponse {
        result,
        skill_tag: course.skill_tag,
        rewards_granted,
        xp_awarded,
        wallet_awarded,
    }))
}
