use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::courses::validation::ValidCourse;
use crate::db::{like_pattern, non_blank};
use crate::models::course::{CourseFilter, CourseRow, CourseSummary, NewCourse};
use crate::users::repo as users_repo;

pub async fn list_courses(
    pool: &PgPool,
    filter: &CourseFilter,
) -> Result<Vec<CourseRow>, sqlx::Error> {
    let search = non_blank(&filter.search).map(|s| like_pattern(&s));

    sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT * FROM courses
        WHERE ($1::text IS NULL OR lower(category) = lower($1))
          AND ($2::text IS NULL OR skill_tag = lower($2))
          AND ($3::text IS NULL OR title ILIKE $3 OR description ILIKE $3)
          AND ($4::text IS NULL OR difficulty = lower($4))
        ORDER BY created_at DESC
        "#,
    )
    .bind(non_blank(&filter.category))
    .bind(non_blank(&filter.skill))
    .bind(search)
    .bind(non_blank(&filter.difficulty))
    .fetch_all(pool)
    .await
}

pub async fn find_course(pool: &PgPool, course_id: Uuid) -> Result<Option<CourseRow>, sqlx::Error> {
    sqlx::query_as::<_, CourseRow>("SELECT * FROM courses WHERE id = $1")
        .bind(course_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_summary(
    pool: &PgPool,
    course_id: Uuid,
) -> Result<Option<CourseSummary>, sqlx::Error> {
    sqlx::query_as::<_, CourseSummary>(
        "SELECT id, title, category, skill_tag, difficulty, created_at FROM courses WHERE id = $1",
    )
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_course(
    pool: &PgPool,
    course: &NewCourse,
    valid: &ValidCourse,
    instructor_id: Uuid,
) -> Result<CourseRow, sqlx::Error> {
    sqlx::query_as::<_, CourseRow>(
        r#"
        INSERT INTO courses
            (id, title, description, category, skill_tag, difficulty, video_url,
             quiz, xp_reward, wallet_reward, instructor_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(course.title.trim())
    .bind(&course.description)
    .bind(course.category.trim())
    .bind(&valid.skill_tag)
    .bind(valid.difficulty.as_str())
    .bind(&course.video_url)
    .bind(Json(&course.quiz))
    .bind(course.xp_reward)
    .bind(course.wallet_reward)
    .bind(instructor_id)
    .fetch_one(pool)
    .await
}

/// Idempotent. Returns true on the first enrollment.
pub async fn enroll(pool: &PgPool, course_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO course_enrollments (user_id, course_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(course_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Records a passed quiz. Returns false if the user had already verified
/// this course.
pub async fn record_completion<'e>(
    executor: impl PgExecutor<'e>,
    course_id: Uuid,
    user_id: Uuid,
    percent: u32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO course_completions (course_id, user_id, percent)
        VALUES ($1, $2, $3)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(course_id)
    .bind(user_id)
    .bind(percent as i32)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Records a passed quiz and, on the first pass only, credits the course
/// rewards and adds its skill tag to the user. Returns whether rewards were
/// granted.
pub async fn complete_and_reward(
    pool: &PgPool,
    course: &CourseRow,
    user_id: Uuid,
    percent: u32,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let first_pass = record_completion(&mut *tx, course.id, user_id, percent).await?;
    if first_pass {
        users_repo::credit_rewards(
            &mut *tx,
            user_id,
            i64::from(course.xp_reward),
            i64::from(course.wallet_reward),
        )
        .await?;
        users_repo::union_skills(&mut *tx, user_id, &[course.skill_tag.clone()]).await?;
    }
    tx.commit().await?;
    Ok(first_pass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{seed_course, seed_user};

    #[sqlx::test(migrations = "./migrations")]
    async fn test_record_completion_only_once(pool: PgPool) {
        let user_id = seed_user(&pool, &[]).await;
        let course_id = seed_course(&pool, "docker").await;

        assert!(record_completion(&pool, course_id, user_id, 80).await.unwrap());
        assert!(!record_completion(&pool, course_id, user_id, 100).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_second_pass_credits_nothing(pool: PgPool) {
        let user_id = seed_user(&pool, &["git"]).await;
        let course_id = seed_course(&pool, "docker").await;
        let course = find_course(&pool, course_id).await.unwrap().unwrap();

        assert!(complete_and_reward(&pool, &course, user_id, 80).await.unwrap());
        assert!(!complete_and_reward(&pool, &course, user_id, 100).await.unwrap());

        let user = users_repo::find_by_id(&pool, user_id).await.unwrap().unwrap();
        assert_eq!(user.xp, 50);
        assert_eq!(user.wallet_balance, 20);
        assert_eq!(user.skills, vec!["docker".to_string(), "git".to_string()]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_enroll_is_idempotent(pool: PgPool) {
        let user_id = seed_user(&pool, &[]).await;
        let course_id = seed_course(&pool, "docker").await;

        assert!(enroll(&pool, course_id, user_id).await.unwrap());
        assert!(!enroll(&pool, course_id, user_id).await.unwrap());
    }
}
