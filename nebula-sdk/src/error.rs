// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the nebula SDK

use crate::pool::PoolError;
use crate::result::ErrorCode;
use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nebula SDK operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Config error: {0}")]
    Config(String),

    /// The pool could not be established or could not hand out a session
    #[error("Connection error: {0}")]
    Connection(#[from] PoolError),

    /// Statement rejected by the graph service
    #[error("ErrorCode: {code}, ErrorMsg: {message}")]
    Execution { code: ErrorCode, message: String },

    /// Malformed schema definition request
    #[error("Builder error: {0}")]
    Builder(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an execution error from a code and message
    pub fn execution(code: ErrorCode, message: impl Into<String>) -> Self {
        Error::Execution {
            code,
            message: message.into(),
        }
    }

    /// The service error code, if this error came from a rejected statement
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Error::Execution { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the pool could not produce a session
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}
