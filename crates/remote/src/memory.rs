use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::{
    AnswerSubmission, Question, QuestionId, QuestionResult, QuizSet, QuizStats, ResultSet, Score,
};

use crate::api::{QuizApi, RemoteError};

/// A question together with the answer only the service knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankEntry {
    pub question: Question,
    pub correct: usize,
}

#[derive(Debug, Default)]
struct FailurePlan {
    fetch: Option<RemoteError>,
    submit: Option<RemoteError>,
    stats: Option<RemoteError>,
}

/// In-process quiz service for tests and offline play.
///
/// Serves questions in bank order and scores submissions against the last
/// set it served. Failures can be queued per endpoint; each fires once.
#[derive(Clone, Default)]
pub struct InMemoryQuizApi {
    bank: Arc<Mutex<Vec<BankEntry>>>,
    served: Arc<Mutex<Vec<QuestionId>>>,
    submissions: Arc<Mutex<Vec<AnswerSubmission>>>,
    failures: Arc<Mutex<FailurePlan>>,
}

impl InMemoryQuizApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Vec<BankEntry>) -> Self {
        let api = Self::new();
        if let Ok(mut bank) = api.bank.lock() {
            *bank = entries;
        }
        api
    }

    /// A small general-knowledge bank for running without a backend.
    #[must_use]
    pub fn sample() -> Self {
        let raw: [(&str, &str, [&str; 4], usize); 6] = [
            (
                "Which planet is known as the Red Planet?",
                "science",
                ["Venus", "Mars", "Jupiter", "Mercury"],
                1,
            ),
            (
                "How many sides does a hexagon have?",
                "math",
                ["Five", "Six", "Seven", "Eight"],
                1,
            ),
            (
                "Which language has the borrow checker?",
                "technology",
                ["Go", "Python", "Rust", "Java"],
                2,
            ),
            (
                "What is the chemical symbol for gold?",
                "science",
                ["Au", "Ag", "Gd", "Go"],
                0,
            ),
            (
                "Which ocean is the largest?",
                "geography",
                ["Atlantic", "Indian", "Arctic", "Pacific"],
                3,
            ),
            (
                "What is 7 multiplied by 8?",
                "math",
                ["54", "56", "58", "64"],
                1,
            ),
        ];

        let entries = raw
            .iter()
            .zip(1_u64..)
            .filter_map(|((prompt, kind, options, correct), id)| {
                Question::new(
                    QuestionId::new(id),
                    *prompt,
                    Some((*kind).to_string()),
                    options.iter().map(|o| (*o).to_string()).collect(),
                )
                .ok()
                .map(|question| BankEntry {
                    question,
                    correct: *correct,
                })
            })
            .collect();
        Self::with_entries(entries)
    }

    /// # Errors
    ///
    /// Returns `RemoteError::Service` if the bank lock is poisoned.
    pub fn push(&self, question: Question, correct: usize) -> Result<(), RemoteError> {
        let mut bank = self
            .bank
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?;
        bank.push(BankEntry { question, correct });
        Ok(())
    }

    pub fn fail_next_fetch(&self, err: RemoteError) {
        if let Ok(mut plan) = self.failures.lock() {
            plan.fetch = Some(err);
        }
    }

    pub fn fail_next_submit(&self, err: RemoteError) {
        if let Ok(mut plan) = self.failures.lock() {
            plan.submit = Some(err);
        }
    }

    pub fn fail_next_stats(&self, err: RemoteError) {
        if let Ok(mut plan) = self.failures.lock() {
            plan.stats = Some(err);
        }
    }

    /// Every submission received so far, oldest first.
    #[must_use]
    pub fn submissions(&self) -> Vec<AnswerSubmission> {
        self.submissions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn take_failure(
        &self,
        pick: impl FnOnce(&mut FailurePlan) -> Option<RemoteError>,
    ) -> Result<(), RemoteError> {
        let mut plan = self
            .failures
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?;
        match pick(&mut plan) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn percentage(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = f64::from(correct) * 100.0 / f64::from(total);
    (raw * 10.0).round() / 10.0
}

#[async_trait]
impl QuizApi for InMemoryQuizApi {
    async fn fetch_question_set(&self, count: u32) -> Result<QuizSet, RemoteError> {
        self.take_failure(|plan| plan.fetch.take())?;
        let bank = self
            .bank
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?;
        let take = usize::try_from(count).unwrap_or(usize::MAX);
        let questions: Vec<Question> = bank
            .iter()
            .take(take)
            .map(|entry| entry.question.clone())
            .collect();

        let mut served = self
            .served
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?;
        *served = questions.iter().map(Question::id).collect();

        Ok(QuizSet::new(questions))
    }

    async fn submit_answers(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<ResultSet, RemoteError> {
        self.take_failure(|plan| plan.submit.take())?;
        self.submissions
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?
            .push(submission.clone());

        let bank = self
            .bank
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?;
        let served = self
            .served
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?;

        let mut per_question = Vec::with_capacity(served.len());
        for id in served.iter() {
            let entry = bank
                .iter()
                .find(|entry| entry.question.id() == *id)
                .ok_or_else(|| RemoteError::Service(format!("unknown question {id}")))?;
            let user_answer = submission.get(*id);
            per_question.push(QuestionResult {
                question_id: *id,
                prompt: entry.question.prompt().to_string(),
                user_answer,
                correct_answer: entry.correct,
                correct_answer_text: entry
                    .question
                    .options()
                    .get(entry.correct)
                    .cloned()
                    .unwrap_or_default(),
                is_correct: user_answer == Some(entry.correct),
            });
        }

        let total = u32::try_from(per_question.len()).unwrap_or(u32::MAX);
        let correct = u32::try_from(per_question.iter().filter(|r| r.is_correct).count())
            .unwrap_or(u32::MAX);

        Ok(ResultSet {
            score: Score {
                percentage: percentage(correct, total),
                correct,
                total,
            },
            per_question,
        })
    }

    async fn fetch_stats(&self) -> Result<QuizStats, RemoteError> {
        self.take_failure(|plan| plan.stats.take())?;
        let bank = self
            .bank
            .lock()
            .map_err(|e| RemoteError::Service(e.to_string()))?;
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for entry in bank.iter() {
            let kind = entry.question.kind().unwrap_or("general").to_string();
            *counts.entry(kind).or_default() += 1;
        }
        Ok(QuizStats {
            total_questions: bank.len() as u64,
            question_type_counts: counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_requested_count_in_bank_order() {
        let api = InMemoryQuizApi::sample();
        let quiz = api.fetch_question_set(3).await.unwrap();

        assert_eq!(quiz.len(), 3);
        let ids: Vec<u64> = quiz.questions().iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn scores_against_served_questions() {
        let api = InMemoryQuizApi::sample();
        let _quiz = api.fetch_question_set(3).await.unwrap();

        let mut submission = AnswerSubmission::default();
        submission.answers.insert(QuestionId::new(1), 1);
        submission.answers.insert(QuestionId::new(2), 0);

        let results = api.submit_answers(&submission).await.unwrap();
        assert_eq!(results.score.total, 3);
        assert_eq!(results.score.correct, 1);
        assert!((results.score.percentage - 33.3).abs() < 1e-9);
        assert_eq!(results.per_question[2].user_answer, None);
        assert!(!results.per_question[2].is_correct);
        assert_eq!(results.per_question[2].correct_answer_text, "Rust");
        assert_eq!(api.submissions(), vec![submission]);
    }

    #[tokio::test]
    async fn queued_failure_fires_once() {
        let api = InMemoryQuizApi::sample();
        api.fail_next_submit(RemoteError::Service("boom".into()));
        let _quiz = api.fetch_question_set(1).await.unwrap();

        let submission = AnswerSubmission::default();
        assert_eq!(
            api.submit_answers(&submission).await.unwrap_err(),
            RemoteError::Service("boom".into())
        );
        assert!(api.submit_answers(&submission).await.is_ok());
        assert_eq!(api.submissions().len(), 1);
    }

    #[tokio::test]
    async fn stats_group_by_kind() {
        let api = InMemoryQuizApi::sample();
        let stats = api.fetch_stats().await.unwrap();

        assert_eq!(stats.total_questions, 6);
        assert_eq!(stats.question_type_counts.get("science"), Some(&2));
        assert_eq!(stats.question_type_counts.get("math"), Some(&2));
    }

    #[tokio::test]
    async fn empty_bank_serves_empty_quiz() {
        let api = InMemoryQuizApi::new();
        assert!(api.fetch_question_set(10).await.unwrap().is_empty());
    }
}
