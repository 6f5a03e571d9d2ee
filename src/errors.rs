// ABOUTME: Unified error handling system for the wellness engine
// ABOUTME: Defines error codes, retryability classification, and the AppError type
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling System
//!
//! Centralized error types for the engine. Every failure that can cross a
//! module boundary is an [`AppError`] carrying an [`ErrorCode`], which is what
//! the retry layer inspects to decide whether and how to retry a remote call.
//!
//! Parse failures never escape the parsing path as errors; they degrade into
//! fallback content. The codes for them exist so the degradation can still be
//! logged with a stable classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Configuration (1000-1999)
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 1000,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 1001,

    // Validation (2000-2999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 2000,

    // External generation service (3000-3999)
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 3000,
    #[serde(rename = "EXTERNAL_REQUEST_ERROR")]
    ExternalRequestError = 3001,
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 3002,
    #[serde(rename = "EXTERNAL_EMPTY_RESPONSE")]
    ExternalEmptyResponse = 3003,

    // Internal (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
}

impl ErrorCode {
    /// Whether a remote call failing with this code may be retried at all
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::ExternalRateLimited | Self::ExternalServiceError | Self::ExternalEmptyResponse
        )
    }

    /// Whether this code indicates provider-side throttling (HTTP 429)
    ///
    /// Throttling retries use exponential backoff; other retryable failures
    /// use a fixed short delay.
    #[must_use]
    pub const fn is_throttling(self) -> bool {
        matches!(self, Self::ExternalRateLimited)
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InvalidInput => "The provided input is invalid",
            Self::ExternalRateLimited => "Generation service rate limit exceeded",
            Self::ExternalRequestError => "Generation service rejected the request",
            Self::ExternalServiceError => "Generation service encountered an error",
            Self::ExternalEmptyResponse => "Generation service returned no usable content",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::StorageError => "Storage operation failed",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors for common errors
impl AppError {
    /// Missing configuration (e.g. API credential not set)
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Invalid configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Invalid caller input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Provider-side throttling (HTTP 429)
    pub fn throttled(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalRateLimited, message)
    }

    /// Client/payload rejection from the provider (HTTP 4xx other than 429)
    pub fn request_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalRequestError, message)
    }

    /// Generic provider failure (non-2xx other than the 4xx family)
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message)
    }

    /// Successful HTTP exchange with no usable text payload
    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalEmptyResponse, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ErrorCode::ExternalRateLimited.is_retryable());
        assert!(ErrorCode::ExternalServiceError.is_retryable());
        assert!(ErrorCode::ExternalEmptyResponse.is_retryable());
        assert!(!ErrorCode::ExternalRequestError.is_retryable());
        assert!(!ErrorCode::ConfigMissing.is_retryable());
        assert!(!ErrorCode::InvalidInput.is_retryable());
    }

    #[test]
    fn test_throttling_classification() {
        assert!(ErrorCode::ExternalRateLimited.is_throttling());
        assert!(!ErrorCode::ExternalServiceError.is_throttling());
        assert!(!ErrorCode::ExternalEmptyResponse.is_throttling());
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::throttled("quota exhausted");
        let rendered = error.to_string();
        assert!(rendered.contains("rate limit"));
        assert!(rendered.contains("quota exhausted"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ExternalRateLimited).unwrap();
        assert_eq!(json, "\"EXTERNAL_RATE_LIMITED\"");
    }
}
