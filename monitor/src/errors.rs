//! Custom error types for the validator monitor
//!
//! Provides structured error handling with context for different failure scenarios.

use std::fmt;

/// Main error type for the validator monitor
#[derive(Debug)]
pub enum MonitorError {
    /// Job scheduler errors
    Scheduler(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// RPC fetch error variants
#[derive(Debug)]
pub enum FetchError {
    /// Connection or request failure
    Transport { url: String, reason: String },

    /// Request exceeded the configured timeout
    Timeout { url: String },

    /// Endpoint answered with a non-success status
    HttpStatus { url: String, status: u16 },

    /// Body was not valid JSON or did not match the expected shape
    InvalidResponse { url: String, reason: String },

    /// Expected field was absent from an otherwise valid response
    MissingField { url: String, field: String },
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Scheduler(msg) => write!(f, "Scheduler error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
            FetchError::Timeout { url } => write!(f, "Request to {} timed out", url),
            FetchError::HttpStatus { url, status } => {
                write!(f, "{} returned HTTP {}", url, status)
            }
            FetchError::InvalidResponse { url, reason } => {
                write!(f, "Invalid response from {}: {}", url, reason)
            }
            FetchError::MissingField { url, field } => {
                write!(f, "Response from {} is missing '{}'", url, field)
            }
        }
    }
}

impl std::error::Error for MonitorError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for FetchError {}
