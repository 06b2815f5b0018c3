//! Recommendation lookup — courses that teach skills a candidate is missing.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::course::CourseSummary;

/// Maximum number of courses returned per lookup.
pub const RECOMMENDATION_LIMIT: usize = 3;

/// Source of courses tagged with a skill. Carried as `PgPool` in production.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Courses whose skill tag is one of `skills`, newest first, at most `limit`.
    async fn courses_for_skills(
        &self,
        skills: &[String],
        limit: usize,
    ) -> Result<Vec<CourseSummary>, AppError>;
}

#[async_trait]
impl CourseCatalog for PgPool {
    async fn courses_for_skills(
        &self,
        skills: &[String],
        limit: usize,
    ) -> Result<Vec<CourseSummary>, AppError> {
        Ok(sqlx::query_as::<_, CourseSummary>(
            r#"
            SELECT id, title, category, skill_tag, difficulty, created_at
            FROM courses
            WHERE skill_tag = ANY($1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(skills)
        .bind(limit as i64)
        .fetch_all(self)
        .await?)
    }
}

/// Returns up to `RECOMMENDATION_LIMIT` courses covering `missing` skills.
/// An empty `missing` list never reaches the catalog.
pub async fn recommend_courses<C>(
    catalog: &C,
    missing: &[String],
) -> Result<Vec<CourseSummary>, AppError>
where
    C: CourseCatalog + ?Sized,
{
    if missing.is_empty() {
        return Ok(Vec::new());
    }
    let mut courses = catalog
        .courses_for_skills(missing, RECOMMENDATION_LIMIT)
        .await?;
    courses.truncate(RECOMMENDATION_LIMIT);
    Ok(courses)
}
