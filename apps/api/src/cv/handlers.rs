use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cv::repo;
use crate::errors::AppError;
use crate::models::cv::{CvDocument, CvRow};
use crate::state::AppState;

/// Trims declared skill names and drops empty ones.
fn clean_document(mut doc: CvDocument) -> CvDocument {
    doc.skills.retain_mut(|s| {
        s.name = s.name.trim().to_string();
        !s.name.is_empty()
    });
    doc
}

/// POST /api/cv/save
pub async fn handle_save_cv(
    State(state): State<AppState>,
    user: AuthUser,
    Json(doc): Json<CvDocument>,
) -> Result<Json<CvRow>, AppError> {
    let doc = clean_document(doc);
    Ok(Json(repo::upsert_cv(&state.db, user.user_id, &doc).await?))
}

/// GET /api/cv/:user_id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<CvRow>, AppError> {
    let cv = repo::find_cv(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No CV saved for user {user_id}")))?;
    Ok(Json(cv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{CvSkill, SkillLevel};

    #[test]
    fn test_clean_document_drops_blank_skills() {
        let doc = CvDocument {
            skills: vec![
                CvSkill {
                    name: "  Rust ".to_string(),
                    level: SkillLevel::Advanced,
                },
                CvSkill {
                    name: "   ".to_string(),
                    level: SkillLevel::Beginner,
                },
            ],
            ..Default::default()
        };
        let cleaned = clean_document(doc);
        assert_eq!(cleaned.skills.len(), 1);
        assert_eq!(cleaned.skills[0].name, "Rust");
        assert_eq!(cleaned.skills[0].level, SkillLevel::Advanced);
    }
}
