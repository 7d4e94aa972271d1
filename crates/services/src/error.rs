//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use quiz_core::SessionError;
use remote::RemoteError;

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load quiz questions. Make sure the backend is running.";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit quiz answers.";
pub const STATS_FAILED_MESSAGE: &str = "Failed to load quiz statistics.";

/// Remote call a service error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    LoadQuiz,
    SubmitAnswers,
    LoadStats,
}

impl fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadQuiz => "loading questions",
            Self::SubmitAnswers => "submitting answers",
            Self::LoadStats => "loading stats",
        })
    }
}

/// Errors emitted by quiz services.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("{op} failed, service unreachable: {message}")]
    Network { op: RemoteOp, message: String },
    #[error("{op} failed, service error: {message}")]
    Service { op: RemoteOp, message: String },
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl QuizServiceError {
    pub(crate) fn remote(op: RemoteOp, err: RemoteError) -> Self {
        match err {
            RemoteError::Network(message) => Self::Network { op, message },
            RemoteError::Service(message) => Self::Service { op, message },
            other => Self::Service {
                op,
                message: other.to_string(),
            },
        }
    }

    /// Text suitable for an on-screen banner.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network { op, .. } | Self::Service { op, .. } => match op {
                RemoteOp::LoadQuiz => LOAD_FAILED_MESSAGE,
                RemoteOp::SubmitAnswers => SUBMIT_FAILED_MESSAGE,
                RemoteOp::LoadStats => STATS_FAILED_MESSAGE,
            },
            Self::Session(_) => "That action is not available right now.",
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Errors raised while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid service url `{value}`: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("service url `{0}` must use http or https")]
    UnsupportedScheme(String),
    #[error("invalid timeout `{0}`: expected whole seconds greater than zero")]
    InvalidTimeout(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_follows_the_failed_call() {
        let load = QuizServiceError::remote(RemoteOp::LoadQuiz, RemoteError::Network("refused".into()));
        let submit =
            QuizServiceError::remote(RemoteOp::SubmitAnswers, RemoteError::Service("500".into()));

        assert!(load.is_network());
        assert_eq!(load.user_message(), LOAD_FAILED_MESSAGE);
        assert!(!submit.is_network());
        assert_eq!(submit.user_message(), SUBMIT_FAILED_MESSAGE);
    }

    #[test]
    fn display_names_the_operation() {
        let err = QuizServiceError::remote(RemoteOp::LoadStats, RemoteError::Service("bad json".into()));
        assert_eq!(
            err.to_string(),
            "loading stats failed, service error: bad json"
        );
    }
}
