#![forbid(unsafe_code)]

pub mod error;
pub mod question_service;
pub mod session_controller;
pub mod settings_service;

pub use error::{QuestionServiceError, SettingsServiceError};
pub use question_service::{HttpQuestionService, QuestionApiConfig, QuestionService};
pub use session_controller::{SessionController, SessionUpdate};
pub use settings_service::SettingsService;
