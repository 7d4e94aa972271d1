mod ids;
mod ledger;
mod question;
mod results;

pub use ids::{ParseIdError, QuestionId, SessionId};
pub use ledger::{AnswerLedger, AnswerSubmission, LedgerError};
pub use question::{Question, QuestionError, QuizLength, QuizSet};
pub use results::{QuestionResult, QuizStats, ResultSet, Score};
