//! Quiz grading for skill verification.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::course::QuizQuestion;

/// Minimum percentage of correct answers needed to verify a skill.
pub const PASS_MARK_PERCENT: u32 = 70;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    pub passed: bool,
}

/// Grades `answers` (one option index per question, in order).
pub fn grade_quiz(questions: &[QuizQuestion], answers: &[usize]) -> Result<QuizResult, AppError> {
    if questions.is_empty() {
        return Err(AppError::Validation(
            "This course has no quiz to verify".to_string(),
        ));
    }
    if answers.len() != questions.len() {
        return Err(AppError::Validation(format!(
            "Expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let total = questions.len();
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| q.correct_index == **a)
        .count();
    let percent = ((correct as f64 / total as f64) * 100.0).round() as u32;

    Ok(QuizResult {
        correct,
        total,
        percent,
        passed: percent >= PASS_MARK_PERCENT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(answers: &[usize]) -> Vec<QuizQuestion> {
        answers
            .iter()
            .enumerate()
            .map(|(i, &correct_index)| QuizQuestion {
                question: format!("Question {i}"),
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_index,
            })
            .collect()
    }

    #[test]
    fn test_all_correct_passes() {
        let result = grade_quiz(&quiz(&[0, 1, 2]), &[0, 1, 2]).unwrap();
        assert_eq!(result.correct, 3);
        assert_eq!(result.percent, 100);
        assert!(result.passed);
    }

    #[test]
    fn test_pass_mark_boundary() {
        let questions = quiz(&[0; 10]);
        let seven_right = [0, 0, 0, 0, 0, 0, 0, 1, 1, 1];
        let six_right = [0, 0, 0, 0, 0, 0, 1, 1, 1, 1];
        assert!(grade_quiz(&questions, &seven_right).unwrap().passed);
        assert!(!grade_quiz(&questions, &six_right).unwrap().passed);
    }

    #[test]
    fn test_two_of_three_fails() {
        let result = grade_quiz(&quiz(&[0, 0, 0]), &[0, 0, 2]).unwrap();
        assert_eq!(result.percent, 67);
        assert!(!result.passed);
    }

    #[test]
    fn test_answer_count_mismatch_is_rejected() {
        let err = grade_quiz(&quiz(&[0, 1]), &[0]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_course_without_quiz_cannot_be_verified() {
        let err = grade_quiz(&[], &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
