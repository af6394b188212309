// src/quiz/scoring.rs

use std::collections::HashMap;

use crate::models::exam::Exam;
use crate::models::result::{ExamResult, QuestionOutcome};

/// Scores one attempt. Pure: same inputs, same result, no hidden state.
///
/// Walks the exam's questions in exam order (not submission order), looks up
/// the submitted answer for each and compares the chosen index against the
/// correct one. Unanswered questions count as incorrect; out-of-range chosen
/// indices are kept as submitted and simply never match.
pub fn score_exam(exam: &Exam, answers: &HashMap<i64, u32>, time_spent_secs: u64) -> ExamResult {
    let mut correct_count: u32 = 0;
    let breakdown: Vec<QuestionOutcome> = exam
        .questions
        .iter()
        .map(|question| {
            let chosen_option = answers.get(&question.id).copied();
            let correct = chosen_option == Some(question.correct_option);
            if correct {
                correct_count += 1;
            }
            QuestionOutcome {
                question_id: question.id,
                subject: question.subject.clone(),
                correct,
                chosen_option,
                correct_option: question.correct_option,
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let total_questions = exam.questions.len() as u32;
    ExamResult {
        exam_id: exam.id,
        title: exam.title.clone(),
        total_questions,
        correct_count,
        percentage: percentage(correct_count, total_questions),
        time_spent_secs,
        breakdown,
    }
}

/// Integer percentage, rounded half-up. A zero-question exam scores 0
/// rather than dividing by zero.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::Question;
    use chrono::Utc;

    fn exam_with_questions(count: usize) -> Exam {
        let questions = (0..count)
            .map(|i| Question {
                id: i as i64 + 1,
                text: format!("Question {}", i + 1),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_option: 0,
                subject: "Português".to_string(),
                explanation: format!("Explanation {}", i + 1),
            })
            .collect();
        Exam {
            id: 1,
            title: "Fixture".to_string(),
            description: String::new(),
            subjects: vec!["Português".to_string()],
            duration_secs: 600,
            questions,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn correct_count_matches_matching_answers() {
        let exam = exam_with_questions(3);
        let mut answers = HashMap::new();
        answers.insert(1, 0); // correct
        answers.insert(2, 3); // wrong
        answers.insert(3, 0); // correct

        let result = score_exam(&exam, &answers, 120);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.percentage, 67); // 2/3 rounds half-up to 67
        assert_eq!(result.time_spent_secs, 120);
    }

    #[test]
    fn no_answers_means_zero_correct() {
        let exam = exam_with_questions(4);
        let result = score_exam(&exam, &HashMap::new(), 0);
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.percentage, 0);
        assert!(result.breakdown.iter().all(|o| !o.correct));
        assert!(result.breakdown.iter().all(|o| o.chosen_option.is_none()));
    }

    #[test]
    fn two_question_exam_with_one_correct_is_fifty_percent() {
        let exam = exam_with_questions(2);
        let mut answers = HashMap::new();
        answers.insert(1, 0);
        answers.insert(2, 1);

        let result = score_exam(&exam, &answers, 30);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn zero_question_exam_scores_zero_percent() {
        let exam = exam_with_questions(0);
        let result = score_exam(&exam, &HashMap::new(), 10);
        assert_eq!(result.total_questions, 0);
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn out_of_range_choice_is_never_correct() {
        let exam = exam_with_questions(1);
        let mut answers = HashMap::new();
        answers.insert(1, 99);

        let result = score_exam(&exam, &answers, 5);
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.breakdown[0].chosen_option, Some(99));
        assert!(!result.breakdown[0].correct);
    }

    #[test]
    fn breakdown_preserves_exam_order() {
        let exam = exam_with_questions(3);
        // Submission order is reversed relative to the exam.
        let mut answers = HashMap::new();
        answers.insert(3, 0);
        answers.insert(2, 0);
        answers.insert(1, 0);

        let result = score_exam(&exam, &answers, 1);
        let ids: Vec<i64> = result.breakdown.iter().map(|o| o.question_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 5), 100);
    }
}
