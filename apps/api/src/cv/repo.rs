use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::cv::{CvDocument, CvRow};

/// Inserts or replaces the user's CV. Last write wins.
pub async fn upsert_cv(
    pool: &PgPool,
    user_id: Uuid,
    document: &CvDocument,
) -> Result<CvRow, sqlx::Error> {
    sqlx::query_as::<_, CvRow>(
        r#"
        INSERT INTO cvs (user_id, document, updated_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id)
        DO UPDATE SET document = EXCLUDED.document, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(Json(document))
    .fetch_one(pool)
    .await
}

pub async fn find_cv(pool: &PgPool, user_id: Uuid) -> Result<Option<CvRow>, sqlx::Error> {
    sqlx::query_as::<_, CvRow>("SELECT * FROM cvs WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
