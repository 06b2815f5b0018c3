pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::courses::handlers as courses;
use crate::cv::handlers as cv;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/signup", post(auth::handle_signup))
        .route("/api/login", post(auth::handle_login))
        // Profile
        .route("/api/me", get(users::handle_me))
        .route("/api/me/skills", post(users::handle_add_skills))
        .route("/api/leaderboard", get(users::handle_leaderboard))
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/jobs/:id", get(jobs::handle_get_job))
        .route("/api/jobs/apply/:id", post(jobs::handle_apply))
        .route("/api/jobs/:id/bookmark", post(jobs::handle_toggle_bookmark))
        // Courses
        .route(
            "/api/courses",
            get(courses::handle_list_courses).post(courses::handle_create_course),
        )
        .route("/api/courses/:id", get(courses::handle_get_course))
        .route("/api/courses/:id/enroll", post(courses::handle_enroll))
        .route("/api/courses/:id/verify", post(courses::handle_verify))
        // Matching
        .route("/api/analyze", post(matching::handle_analyze))
        .route("/api/match-jobs", post(matching::handle_match_jobs))
        // CV
        .route("/api/cv/save", post(cv::handle_save_cv))
        .route("/api/cv/:user_id", get(cv::handle_get_cv))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
