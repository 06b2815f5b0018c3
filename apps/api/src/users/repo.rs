use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::user::{LeaderboardEntry, UserRow};

pub struct NewUserParams<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

pub async fn insert_user(pool: &PgPool, params: NewUserParams<'_>) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.name)
    .bind(params.email)
    .bind(params.password_hash)
    .bind(params.role)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

/// Set union of `tags` into the user's skills. Returns the resulting set.
pub async fn union_skills<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    tags: &[String],
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, Vec<String>>(
        r#"
        UPDATE users
        SET skills = ARRAY(
            SELECT DISTINCT s FROM unnest(skills || $2::text[]) AS s ORDER BY s
        )
        WHERE id = $1
        RETURNING skills
        "#,
    )
    .bind(user_id)
    .bind(tags)
    .fetch_one(executor)
    .await
}

pub async fn credit_rewards<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    xp: i64,
    wallet: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET xp = xp + $2, wallet_balance = wallet_balance + $3 WHERE id = $1")
        .bind(user_id)
        .bind(xp)
        .bind(wallet)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn bookmarked_job_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT job_id FROM job_bookmarks WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn enrolled_course_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT course_id FROM course_enrollments WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn verified_course_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT course_id FROM course_completions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn leaderboard(pool: &PgPool, limit: i64) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT u.id, u.name, u.xp, COUNT(c.course_id) AS verified_courses
        FROM users u
        LEFT JOIN course_completions c ON c.user_id = u.id
        GROUP BY u.id
        ORDER BY u.xp DESC, u.created_at ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Tags from `incoming` that are not already in `existing`.
pub fn new_skills(existing: &[String], incoming: &[String]) -> Vec<String> {
    incoming
        .iter()
        .filter(|tag| !existing.contains(tag))
        .cloned()
        .collect()
}
