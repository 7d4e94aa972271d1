use quiz_core::model::QuizLength;
use quiz_core::time::elapsed_secs;
use quiz_core::{QuizSession, SessionPhase, TickOutcome, TickerKey};
use services::QuizLoopService;

use super::labels::{kind_label, option_letter};
use super::results_vm::ResultsVm;
use super::time_fmt::format_countdown;
use crate::views::ViewError;

pub const UNANSWERED_WARNING: &str =
    "⚠️ You haven't answered all questions. Unanswered questions will be marked as incorrect.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Next,
    Previous,
    ReviewAnswers,
    Submit,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizOutcome {
    Continue,
    Scored(ResultsVm),
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTone {
    Calm,
    Warning,
    Urgent,
}

impl TimerTone {
    #[must_use]
    pub fn for_remaining(seconds: u32) -> Self {
        if seconds <= 10 {
            Self::Urgent
        } else if seconds <= 20 {
            Self::Warning
        } else {
            Self::Calm
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Calm => "timer timer--calm",
            Self::Warning => "timer timer--warning",
            Self::Urgent => "timer timer--urgent",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: String,
    pub text: String,
    pub selected: bool,
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn ticker_key(&self) -> Option<TickerKey> {
        self.session.ticker_key()
    }

    pub fn tick(&mut self, key: TickerKey) -> TickOutcome {
        self.session.tick(key)
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.session.current_question().map(|q| q.prompt())
    }

    #[must_use]
    pub fn kind_label(&self) -> String {
        kind_label(self.session.current_question().and_then(|q| q.kind()))
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let Some(question) = self.session.current_question() else {
            return Vec::new();
        };
        let selected = self.session.answer_for(question.id());
        question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| OptionVm {
                index,
                letter: option_letter(index),
                text: text.clone(),
                selected: selected == Some(index),
            })
            .collect()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!(
            "Question {} of {}",
            self.session.current_index() + 1,
            self.session.total()
        )
    }

    #[must_use]
    pub fn answered_label(&self) -> String {
        format!(
            "Answered: {}/{}",
            self.session.answered_count(),
            self.session.total()
        )
    }

    /// Position of the current question as a share of the quiz, `0..=100`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let total = self.session.total();
        if total == 0 {
            return 0.0;
        }
        (self.session.current_index() + 1) as f64 * 100.0 / total as f64
    }

    #[must_use]
    pub fn timer_label(&self) -> Option<String> {
        self.session.time_remaining().map(format_countdown)
    }

    /// Calm while no countdown is shown.
    #[must_use]
    pub fn timer_tone(&self) -> TimerTone {
        self.session
            .time_remaining()
            .map_or(TimerTone::Calm, TimerTone::for_remaining)
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.session.can_go_previous()
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.session.is_last_question() {
            "Finish"
        } else {
            "Next →"
        }
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.session.answered_count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.session.total()
    }

    #[must_use]
    pub fn unanswered_warning(&self) -> Option<&'static str> {
        (self.session.answered_count() < self.session.total()).then_some(UNANSWERED_WARNING)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error()
    }

    #[must_use]
    pub fn results(&self) -> Option<ResultsVm> {
        let results = self.session.results()?;
        let time_taken = self
            .session
            .submitted_at()
            .map(|at| elapsed_secs(self.session.started_at(), at));
        Some(ResultsVm::new(results, time_taken))
    }

    /// Apply a synchronous intent. `Submit` goes through [`QuizVm::submit`].
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when the session rejects the transition.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<QuizOutcome, ViewError> {
        let result = match intent {
            QuizIntent::Select(option) => self.session.select(option),
            QuizIntent::Next => self.session.next(),
            QuizIntent::Previous => self.session.previous(),
            QuizIntent::ReviewAnswers => self.session.review_answers(),
            QuizIntent::Cancel => {
                self.session.cancel().map_err(|_| ViewError::Unknown)?;
                return Ok(QuizOutcome::Cancelled);
            }
            QuizIntent::Submit => return Err(ViewError::Unknown),
        };
        result.map_err(|err| {
            tracing::debug!(error = %err, ?intent, "quiz intent rejected");
            ViewError::Unknown
        })?;
        Ok(QuizOutcome::Continue)
    }

    /// # Errors
    ///
    /// Returns `ViewError::SubmitQuiz` when the service rejects the answers;
    /// the session is back at confirmation with its answers intact.
    pub async fn submit(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizOutcome, ViewError> {
        quiz_loop
            .submit(&mut self.session)
            .await
            .map_err(|err| ViewError::from(&err))?;
        self.results()
            .map(QuizOutcome::Scored)
            .ok_or(ViewError::Unknown)
    }
}

/// # Errors
///
/// Returns `ViewError::LoadQuiz` when questions cannot be fetched.
pub async fn start_quiz(
    quiz_loop: &QuizLoopService,
    length: QuizLength,
) -> Result<QuizVm, ViewError> {
    let session = quiz_loop
        .start_quiz(length)
        .await
        .map_err(|err| ViewError::from(&err))?;
    Ok(QuizVm::new(session))
}
