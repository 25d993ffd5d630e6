//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so that production logs can be
//! filtered by failure category without parsing free-text messages.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - TOKEN_xxx: input validation errors
//! - SOURCE_xxx: explorer / source acquisition errors
//! - CLASSIFIER_xxx: LLM backend errors
//! - CACHE_xxx: verdict store errors
//! - API_xxx / CFG_xxx: service boundary and configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Input Validation Errors
    // ============================================
    /// Token address is not a 0x-prefixed 20-byte hex string
    TokenInvalidAddress,

    // ============================================
    // Source Acquisition Errors
    // ============================================
    /// Explorer unreachable, non-success status, or upstream error payload
    SourceFetchFailed,
    /// Contract has no verified source published
    SourceNotVerified,

    // ============================================
    // Classifier Errors
    // ============================================
    /// LLM backend unreachable (connect failure or timeout)
    ClassifierUnreachable,
    /// LLM backend returned a non-success HTTP status
    ClassifierBadStatus,
    /// LLM backend response envelope could not be parsed
    ClassifierBadEnvelope,

    // ============================================
    // Verdict Store Errors
    // ============================================
    /// Storage unavailable or query failed
    CacheError,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Missing environment variable
    ConfigMissingEnv,

    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Internal server error
    ApiInternalError,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenInvalidAddress => "TOKEN_INVALID_ADDRESS",
            Self::SourceFetchFailed => "SOURCE_FETCH_FAILED",
            Self::SourceNotVerified => "SOURCE_NOT_VERIFIED",
            Self::ClassifierUnreachable => "CLASSIFIER_UNREACHABLE",
            Self::ClassifierBadStatus => "CLASSIFIER_BAD_STATUS",
            Self::ClassifierBadEnvelope => "CLASSIFIER_BAD_ENVELOPE",
            Self::CacheError => "CACHE_ERROR",
            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::TokenInvalidAddress | Self::ApiBadRequest => 400,
            Self::SourceNotVerified => 404,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Invalid token address
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TokenInvalidAddress, msg)
    }

    /// Explorer fetch failed
    pub fn source_fetch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SourceFetchFailed, msg)
    }

    /// Contract source not verified/published
    pub fn source_not_verified(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SourceNotVerified, msg)
    }

    /// Classifier backend unreachable
    pub fn classifier_unreachable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ClassifierUnreachable, msg)
    }

    /// Classifier backend returned non-success status
    pub fn classifier_bad_status(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ClassifierBadStatus, msg)
    }

    /// Classifier response envelope malformed
    pub fn classifier_bad_envelope(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ClassifierBadEnvelope, msg)
    }

    /// Verdict store failure
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CacheError, msg)
    }

    /// Missing environment variable
    pub fn missing_env(var_name: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingEnv,
            format!("Missing environment variable: {}", var_name),
        )
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::with_source(ErrorCode::CacheError, "verdict store query failed", err)
    }
}
