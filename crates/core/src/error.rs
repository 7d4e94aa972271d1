use thiserror::Error;

use crate::model::{LedgerError, QuestionError};
use crate::session::SessionError;

/// Umbrella error for callers that do not care which domain rule failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
