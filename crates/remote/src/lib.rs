#![forbid(unsafe_code)]

pub mod api;
pub mod http;
pub mod memory;
mod wire;

pub use api::{QuizApi, RemoteError};
pub use http::HttpQuizApi;
pub use memory::InMemoryQuizApi;
