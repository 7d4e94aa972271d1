#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod sessions;
pub mod stats_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use config::ClientConfig;
pub use error::{AppServicesError, ConfigError, QuizServiceError, RemoteOp};
pub use sessions::QuizLoopService;
pub use stats_service::StatsService;
