mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizServiceError;
pub use workflow::QuizLoopService;
