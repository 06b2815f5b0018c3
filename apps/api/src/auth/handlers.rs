use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::errors::AppError;
use crate::models::user::{Role, UserProfile, UserRow};
use crate::state::AppState;
use crate::users::repo::{self, NewUserParams};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Checks a signup request and returns the normalized email and role.
pub fn validate_signup(req: &SignupRequest) -> Result<(String, Role), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let email = normalize_email(&req.email);
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }

    validate_password_strength(&req.password).map_err(AppError::Validation)?;

    let role = match req.role.as_deref() {
        None => Role::User,
        Some(raw) => raw.parse::<Role>().map_err(AppError::Validation)?,
    };
    if role == Role::Admin {
        return Err(AppError::Validation(
            "Admin accounts cannot be created through signup".to_string(),
        ));
    }

    Ok((email, role))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn issue_token(state: &AppState, user: UserRow) -> Result<AuthResponse, AppError> {
    let role = user
        .role
        .parse::<Role>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored role is invalid: {e}")))?;
    let token = generate_token(
        user.id,
        role,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {e}")))?;

    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

/// POST /api/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (email, role) = validate_signup(&req)?;

    if repo::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))?;

    let user = repo::insert_user(
        &state.db,
        NewUserParams {
            name: req.name.trim(),
            email: &email,
            password_hash: &password_hash,
            role: role.as_str(),
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Email is already registered".to_string())
        }
        other => AppError::Database(other),
    })?;

    info!("Registered user {} with role {}", user.id, role);
    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = repo::find_by_email(&state.db, &normalize_email(&req.email))
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored password hash is invalid: {e}")))?;
    if !valid {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(Json(issue_token(&state, user)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, role: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: "Karim".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.map(String::from),
        }
    }

    #[test]
    fn test_signup_defaults_to_user_and_lowercases_email() {
        let (email, role) = validate_signup(&request(" Karim@Example.COM ", "password1", None)).unwrap();
        assert_eq!(email, "karim@example.com");
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_signup_allows_instructor() {
        let (_, role) =
            validate_signup(&request("k@example.com", "password1", Some("instructor"))).unwrap();
        assert_eq!(role, Role::Instructor);
    }

    #[test]
    fn test_signup_rejects_admin_role() {
        let err = validate_signup(&request("k@example.com", "password1", Some("admin"))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_signup_rejects_bad_email_and_short_password() {
        assert!(validate_signup(&request("not-an-email", "password1", None)).is_err());
        assert!(validate_signup(&request("k@example.com", "short", None)).is_err());
    }

    #[test]
    fn test_signup_rejects_blank_name() {
        let mut req = request("k@example.com", "password1", None);
        req.name = "   ".to_string();
        assert!(validate_signup(&req).is_err());
    }
}
