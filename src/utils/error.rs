use crate::core::parser::DescriptorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream {url} answered with status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Document,
    Source,
    Config,
    Server,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Descriptor(_) => ErrorCategory::Document,
            Error::IoError(_) | Error::HttpError(_) | Error::UpstreamStatus { .. } => {
                ErrorCategory::Source
            }
            Error::ConfigError { .. }
            | Error::InvalidConfigValueError { .. }
            | Error::MissingConfigError { .. } => ErrorCategory::Config,
            Error::ServerError { .. } => ErrorCategory::Server,
        }
    }

    /// Process exit code used by the binary.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Document | ErrorCategory::Config => 1,
            ErrorCategory::Source => 2,
            ErrorCategory::Server => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Error::Descriptor(DescriptorError::Syntax { .. }) => {
                "Check the document is strict JSON: no comments, no trailing commas, quotes escaped"
            }
            Error::Descriptor(DescriptorError::Schema { .. }) => {
                "Fix the field named in the error path and try again"
            }
            Error::IoError(_) => "Make sure the document path exists and is readable",
            Error::HttpError(_) | Error::UpstreamStatus { .. } => {
                "Check the document URL is reachable and returns 2xx"
            }
            Error::ConfigError { .. }
            | Error::InvalidConfigValueError { .. }
            | Error::MissingConfigError { .. } => "Review the configuration file and CLI flags",
            Error::ServerError { .. } => "Check the bind address is free and valid",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Error::Descriptor(e) => format!("The descriptor document is invalid: {}", e),
            Error::IoError(e) => format!("Could not read the document: {}", e),
            Error::HttpError(e) => format!("Could not fetch the document: {}", e),
            Error::UpstreamStatus { url, status } => {
                format!("Fetching {} failed with HTTP {}", url, status)
            }
            other => other.to_string(),
        }
    }
}
