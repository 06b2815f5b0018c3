use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{like_pattern, non_blank};
use crate::models::job::{JobFilter, JobRow, NewJob};

pub async fn list_jobs(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobRow>, sqlx::Error> {
    let search = non_blank(&filter.search).map(|s| like_pattern(&s));
    let skill = non_blank(&filter.skill).map(|s| s.to_lowercase());

    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT * FROM jobs
        WHERE ($1::text IS NULL OR lower(category) = lower($1))
          AND ($2::text IS NULL
               OR title ILIKE $2 OR company ILIKE $2 OR description ILIKE $2)
          AND ($3::text IS NULL OR $3 = ANY(skills))
        ORDER BY created_at DESC
        "#,
    )
    .bind(non_blank(&filter.category))
    .bind(search)
    .bind(skill)
    .fetch_all(pool)
    .await
}

/// Every job, newest first. Used for bulk matching.
pub async fn all_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_job(pool: &PgPool, job_id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// `skills` must already be normalized.
pub async fn insert_job(
    pool: &PgPool,
    job: &NewJob,
    skills: &[String],
    posted_by: Uuid,
) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, title, company, category, description, location, skills,
             deadline, suggested_course_id, posted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(job.title.trim())
    .bind(job.company.trim())
    .bind(job.category.trim())
    .bind(&job.description)
    .bind(&job.location)
    .bind(skills)
    .bind(job.deadline)
    .bind(job.suggested_course_id)
    .bind(posted_by)
    .fetch_one(pool)
    .await
}

pub async fn applicant_count(pool: &PgPool, job_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM job_applications WHERE job_id = $1")
        .bind(job_id)
        .fetch_one(pool)
        .await
}

/// Returns false when the user had already applied.
pub async fn insert_application(
    pool: &PgPool,
    job_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO job_applications (job_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(job_id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Flips the bookmark and returns whether the job is now bookmarked.
pub async fn toggle_bookmark(pool: &PgPool, job_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let removed = sqlx::query("DELETE FROM job_bookmarks WHERE user_id = $1 AND job_id = $2")
        .bind(user_id)
        .bind(job_id)
        .execute(pool)
        .await?
        .rows_affected();
    if removed > 0 {
        return Ok(false);
    }

    sqlx::query(
        "INSERT INTO job_bookmarks (user_id, job_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(job_id)
    .execute(pool)
    .await?;
    Ok(true)
}
