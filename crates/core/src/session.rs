use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    AnswerLedger, AnswerSubmission, LedgerError, Question, QuestionId, QuizSet, ResultSet,
    SessionId,
};
use crate::timer::Countdown;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where a quiz session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A question is on screen.
    Active { index: usize },
    /// The last question was left; waiting for the player to submit or review.
    ConfirmSubmit,
    /// Answers are with the service.
    Submitting,
    /// The service scored the answers.
    Done,
    /// The quiz arrived with no questions. Only `cancel` leaves this state.
    Empty,
    /// The player abandoned the session.
    Cancelled,
}

impl SessionPhase {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Active { .. } => "active",
            Self::ConfirmSubmit => "confirm-submit",
            Self::Submitting => "submitting",
            Self::Done => "done",
            Self::Empty => "empty",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Empty | Self::Cancelled)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Active,
    ConfirmSubmit,
    Submitting,
    Done,
    Empty,
    Cancelled,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} while the session is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

//
// ─── TICKER ────────────────────────────────────────────────────────────────────
//

/// Identity of one armed countdown.
///
/// A ticker scheduled for a key stops mattering as soon as the session
/// restarts or stops its countdown; ticks carrying an old key are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickerKey {
    session: SessionId,
    generation: u64,
}

impl TickerKey {
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a single one-second tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The key was stale or no countdown was running.
    Ignored,
    Counting { remaining: u32 },
    /// Time ran out and the next question is now active.
    Advanced { index: usize },
    /// Time ran out on the last question.
    ConfirmPending,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a quiz: navigation, answers, countdown and submission gating.
///
/// Every transition either completes or returns an error with the session
/// untouched.
pub struct QuizSession {
    id: SessionId,
    quiz: QuizSet,
    stage: Stage,
    cursor: usize,
    ledger: AnswerLedger,
    countdown: Countdown,
    generation: u64,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    results: Option<ResultSet>,
    last_error: Option<String>,
}

impl QuizSession {
    /// Start a session on `quiz` with the default per-question countdown.
    ///
    /// An empty quiz yields a session in [`SessionPhase::Empty`].
    #[must_use]
    pub fn new(quiz: QuizSet, started_at: DateTime<Utc>) -> Self {
        Self::with_countdown(quiz, started_at, Countdown::default())
    }

    #[must_use]
    pub fn with_countdown(quiz: QuizSet, started_at: DateTime<Utc>, countdown: Countdown) -> Self {
        let stage = if quiz.is_empty() {
            Stage::Empty
        } else {
            Stage::Active
        };
        let mut session = Self {
            id: SessionId::generate(),
            quiz,
            stage,
            cursor: 0,
            ledger: AnswerLedger::new(),
            countdown,
            generation: 0,
            started_at,
            submitted_at: None,
            results: None,
            last_error: None,
        };
        if session.stage == Stage::Active {
            session.restart_timer();
        }
        session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            Stage::Active => SessionPhase::Active { index: self.cursor },
            Stage::ConfirmSubmit => SessionPhase::ConfirmSubmit,
            Stage::Submitting => SessionPhase::Submitting,
            Stage::Done => SessionPhase::Done,
            Stage::Empty => SessionPhase::Empty,
            Stage::Cancelled => SessionPhase::Cancelled,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSet {
        &self.quiz
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    /// Index of the question last shown. Stays on the final question while
    /// confirmation or submission is pending.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.get(self.cursor)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.cursor + 1 >= self.quiz.len()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.stage == Stage::Active && self.cursor > 0
    }

    #[must_use]
    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<usize> {
        self.ledger.get(id)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.ledger.answered_count()
    }

    /// Share of questions answered, `0.0..=1.0`.
    #[must_use]
    pub fn answered_ratio(&self) -> f64 {
        if self.quiz.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.answered_count() as f64 / self.total() as f64;
        ratio
    }

    /// Seconds left on the question on screen; `None` while no countdown is
    /// armed (confirmation, submission, review of the last question).
    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.ticker_key().and(self.countdown.remaining())
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    #[must_use]
    pub fn is_confirm_pending(&self) -> bool {
        self.stage == Stage::ConfirmSubmit
    }

    /// Message from the last failed submission, cleared by the next transition.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Key of the countdown currently running, if any.
    #[must_use]
    pub fn ticker_key(&self) -> Option<TickerKey> {
        (self.stage == Stage::Active && self.countdown.is_running()).then_some(TickerKey {
            session: self.id,
            generation: self.generation,
        })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Record `option` for the question on screen. Does not navigate.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Active` and
    /// `SessionError::Ledger` for an option the question does not have.
    pub fn select(&mut self, option: usize) -> Result<(), SessionError> {
        self.require(Stage::Active, "select an answer")?;
        let Some(question) = self.quiz.get(self.cursor) else {
            return Err(self.invalid("select an answer"));
        };
        self.ledger.record(question, option)?;
        Ok(())
    }

    /// Move to the next question, or to confirmation after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Active`.
    pub fn next(&mut self) -> Result<(), SessionError> {
        self.require(Stage::Active, "go to the next question")?;
        self.advance();
        Ok(())
    }

    /// Move back one question. A no-op on the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Active`.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.require(Stage::Active, "go to the previous question")?;
        if self.cursor > 0 {
            self.cursor -= 1;
            self.restart_timer();
        }
        Ok(())
    }

    /// Running out of time behaves exactly like pressing Next.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Active`.
    pub fn timer_expired(&mut self) -> Result<(), SessionError> {
        self.require(Stage::Active, "expire the timer")?;
        self.advance();
        Ok(())
    }

    /// Apply one second of countdown for the ticker identified by `key`.
    pub fn tick(&mut self, key: TickerKey) -> TickOutcome {
        if self.ticker_key() != Some(key) {
            return TickOutcome::Ignored;
        }
        match self.countdown.tick() {
            None => TickOutcome::Counting {
                remaining: self.countdown.remaining().unwrap_or(0),
            },
            Some(_expired) => {
                self.advance();
                match self.stage {
                    Stage::Active => TickOutcome::Advanced { index: self.cursor },
                    _ => TickOutcome::ConfirmPending,
                }
            }
        }
    }

    /// Leave confirmation and return to the last question, answers intact.
    ///
    /// The countdown is not restarted: reviewing is untimed until the player
    /// navigates to another question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `ConfirmSubmit`.
    pub fn review_answers(&mut self) -> Result<(), SessionError> {
        self.require(Stage::ConfirmSubmit, "review answers")?;
        self.stage = Stage::Active;
        self.cursor = self.quiz.len().saturating_sub(1);
        self.last_error = None;
        Ok(())
    }

    /// Lock the answers and hand back the payload to send.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `ConfirmSubmit`.
    pub fn confirm_submit(
        &mut self,
        submitted_at: DateTime<Utc>,
    ) -> Result<AnswerSubmission, SessionError> {
        self.require(Stage::ConfirmSubmit, "submit")?;
        self.ledger.freeze();
        self.stage = Stage::Submitting;
        self.submitted_at = Some(submitted_at);
        self.last_error = None;
        Ok(self.ledger.to_submission())
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Submitting`.
    pub fn on_success(&mut self, results: ResultSet) -> Result<(), SessionError> {
        self.require(Stage::Submitting, "accept results")?;
        self.stage = Stage::Done;
        self.results = Some(results);
        Ok(())
    }

    /// Return to confirmation after a failed submission, keeping every answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Submitting`.
    pub fn on_failure(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        self.require(Stage::Submitting, "report a failed submission")?;
        self.ledger.thaw();
        self.stage = Stage::ConfirmSubmit;
        self.submitted_at = None;
        self.last_error = Some(message.into());
        Ok(())
    }

    /// Abandon the session and drop everything it holds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` while a submission is in flight.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.stage == Stage::Submitting {
            return Err(self.invalid("cancel"));
        }
        self.stage = Stage::Cancelled;
        self.quiz = QuizSet::default();
        self.cursor = 0;
        self.ledger = AnswerLedger::new();
        self.countdown = Countdown::new(i64::from(self.countdown.duration()));
        self.generation = self.generation.wrapping_add(1);
        self.results = None;
        self.last_error = None;
        self.submitted_at = None;
        Ok(())
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn advance(&mut self) {
        if self.cursor + 1 < self.quiz.len() {
            self.cursor += 1;
            self.restart_timer();
        } else {
            self.stage = Stage::ConfirmSubmit;
            self.stop_timer();
        }
    }

    fn restart_timer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.countdown.start();
    }

    fn stop_timer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.countdown.reset();
    }

    fn require(&self, stage: Stage, action: &'static str) -> Result<(), SessionError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("total", &self.quiz.len())
            .field("answered", &self.ledger.answered_count())
            .field("time_remaining", &self.countdown.remaining())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
