use dioxus::prelude::*;
use services::error::{LOAD_FAILED_MESSAGE, SUBMIT_FAILED_MESSAGE};
use services::{QuizServiceError, RemoteOp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    LoadQuiz,
    SubmitQuiz,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::LoadQuiz => LOAD_FAILED_MESSAGE,
            Self::SubmitQuiz => SUBMIT_FAILED_MESSAGE,
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&QuizServiceError> for ViewError {
    fn from(err: &QuizServiceError) -> Self {
        match err {
            QuizServiceError::Network { op, .. } | QuizServiceError::Service { op, .. } => {
                match op {
                    RemoteOp::LoadQuiz => Self::LoadQuiz,
                    RemoteOp::SubmitAnswers => Self::SubmitQuiz,
                    RemoteOp::LoadStats => Self::Unknown,
                }
            }
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
