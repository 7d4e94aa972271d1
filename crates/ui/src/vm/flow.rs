use quiz_core::model::QuizLength;

use super::results_vm::ResultsVm;
use crate::views::ViewError;

/// Which top-level screen is showing.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Screen {
    #[default]
    Home,
    Quiz(QuizLength),
    Results(ResultsVm),
}

/// Outer state machine wrapping a single quiz session.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppFlow {
    screen: Screen,
    banner: Option<ViewError>,
    attempt: u64,
}

impl AppFlow {
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn banner(&self) -> Option<ViewError> {
        self.banner
    }

    /// Bumped on every quiz start so a repeated length still mounts a fresh view.
    #[must_use]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn start(&mut self, length: QuizLength) {
        self.banner = None;
        self.attempt = self.attempt.wrapping_add(1);
        self.screen = Screen::Quiz(length);
    }

    /// Questions could not be loaded; back to the start with a message.
    pub fn load_failed(&mut self, err: ViewError) {
        self.banner = Some(err);
        self.screen = Screen::Home;
    }

    pub fn finished(&mut self, results: ResultsVm) {
        self.banner = None;
        self.screen = Screen::Results(results);
    }

    /// Cancel from the quiz or restart from results.
    pub fn reset(&mut self) {
        self.banner = None;
        self.screen = Screen::Home;
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::model::{ResultSet, Score};

    use super::*;

    #[test]
    fn load_failure_returns_home_with_banner() {
        let mut flow = AppFlow::default();
        flow.start(QuizLength::Standard);
        assert_eq!(flow.screen(), &Screen::Quiz(QuizLength::Standard));

        flow.load_failed(ViewError::LoadQuiz);
        assert_eq!(flow.screen(), &Screen::Home);
        assert_eq!(flow.banner(), Some(ViewError::LoadQuiz));

        flow.start(QuizLength::Quick);
        assert_eq!(flow.banner(), None);
        assert_eq!(flow.attempt(), 2);
    }

    #[test]
    fn results_then_reset() {
        let mut flow = AppFlow::default();
        flow.start(QuizLength::Quick);
        let results = ResultsVm::new(
            &ResultSet {
                score: Score {
                    percentage: 100.0,
                    correct: 1,
                    total: 1,
                },
                per_question: Vec::new(),
            },
            None,
        );
        flow.finished(results.clone());
        assert_eq!(flow.screen(), &Screen::Results(results));

        flow.reset();
        assert_eq!(flow.screen(), &Screen::Home);
    }
}
