use crate::errors::AppError;
use crate::models::course::{Difficulty, NewCourse};

const MIN_OPTIONS: usize = 2;

/// Normalized fields of a course that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCourse {
    pub skill_tag: String,
    pub difficulty: Difficulty,
}

/// Checks the course invariants: required text fields, a case-folded skill
/// tag, quiz questions with at least two options and an in-range answer, and
/// non-negative rewards.
pub fn validate_course(course: &NewCourse) -> Result<ValidCourse, AppError> {
    for (field, value) in [
        ("title", &course.title),
        ("category", &course.category),
        ("skill_tag", &course.skill_tag),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }

    for (i, q) in course.quiz.iter().enumerate() {
        let n = i + 1;
        if q.question.trim().is_empty() {
            return Err(AppError::Validation(format!("Question {n} has no text")));
        }
        if q.options.len() < MIN_OPTIONS {
            return Err(AppError::Validation(format!(
                "Question {n} needs at least {MIN_OPTIONS} options"
            )));
        }
        if q.correct_index >= q.options.len() {
            return Err(AppError::Validation(format!(
                "Question {n} has correct_index {} but only {} options",
                q.correct_index,
                q.options.len()
            )));
        }
    }

    if course.xp_reward < 0 || course.wallet_reward < 0 {
        return Err(AppError::Validation(
            "Rewards must not be negative".to_string(),
        ));
    }

    let difficulty = match course.difficulty.as_deref() {
        None => Difficulty::Beginner,
        Some(raw) => raw.parse::<Difficulty>().map_err(AppError::Validation)?,
    };

    Ok(ValidCourse {
        skill_tag: course.skill_tag.trim().to_lowercase(),
        difficulty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::QuizQuestion;

    fn course() -> NewCourse {
        NewCourse {
            title: "Docker Fundamentals".to_string(),
            description: String::new(),
            category: "devops".to_string(),
            skill_tag: "  Docker ".to_string(),
            difficulty: Some("Intermediate".to_string()),
            video_url: None,
            quiz: vec![QuizQuestion {
                question: "What does a Dockerfile describe?".to_string(),
                options: vec!["An image".to_string(), "A VM".to_string()],
                correct_index: 0,
            }],
            xp_reward: 100,
            wallet_reward: 20,
        }
    }

    #[test]
    fn test_valid_course_normalizes_tag() {
        let valid = validate_course(&course()).unwrap();
        assert_eq!(valid.skill_tag, "docker");
        assert_eq!(valid.difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn test_single_option_question_rejected() {
        let mut c = course();
        c.quiz[0].options.truncate(1);
        assert!(validate_course(&c).is_err());
    }

    #[test]
    fn test_out_of_range_answer_rejected() {
        let mut c = course();
        c.quiz[0].correct_index = 2;
        assert!(validate_course(&c).is_err());
    }

    #[test]
    fn test_negative_reward_rejected() {
        let mut c = course();
        c.wallet_reward = -1;
        assert!(validate_course(&c).is_err());
    }

    #[test]
    fn test_missing_skill_tag_rejected() {
        let mut c = course();
        c.skill_tag = "   ".to_string();
        assert!(validate_course(&c).is_err());
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let mut c = course();
        c.difficulty = Some("impossible".to_string());
        assert!(validate_course(&c).is_err());
    }

    #[test]
    fn test_difficulty_defaults_to_beginner() {
        let mut c = course();
        c.difficulty = None;
        assert_eq!(validate_course(&c).unwrap().difficulty, Difficulty::Beginner);
    }
}
