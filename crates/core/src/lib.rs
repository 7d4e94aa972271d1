#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod time;
pub mod timer;

pub use error::Error;
pub use session::{QuizSession, SessionError, SessionPhase, TickOutcome, TickerKey};
pub use time::Clock;
pub use timer::{Countdown, Expired, QUESTION_SECONDS};
