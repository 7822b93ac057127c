// src/error.rs

//! Unified error handling for the seat monitor.

use thiserror::Error;

/// Result type alias for monitor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The course code/semester pair has no matching record in the catalog
    #[error("course not found: {code} ({semester})")]
    CourseNotFound { code: String, semester: String },

    /// The course exists but the named activity is not one of its sections
    #[error("invalid activity '{activity}' for course {code} ({semester})")]
    InvalidActivity {
        code: String,
        semester: String,
        activity: String,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification delivery failed
    #[error("Notification error: {0}")]
    Notify(String),
}

impl AppError {
    /// Create a course-not-found error.
    pub fn course_not_found(code: impl Into<String>, semester: impl Into<String>) -> Self {
        Self::CourseNotFound {
            code: code.into(),
            semester: semester.into(),
        }
    }

    /// Create an invalid-activity error.
    pub fn invalid_activity(
        code: impl Into<String>,
        semester: impl Into<String>,
        activity: impl Into<String>,
    ) -> Self {
        Self::InvalidActivity {
            code: code.into(),
            semester: semester.into(),
            activity: activity.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a notification error.
    pub fn notify(message: impl Into<String>) -> Self {
        Self::Notify(message.into())
    }
}
