// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement results and typed deserialization
//!
//! A [`ResultSet`] is what a session hands back for every statement. Pool
//! implementations build it with [`ResultSet::succeeded`] or
//! [`ResultSet::failed`]; callers inspect it or deserialize its rows into
//! their own types.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cell value type carried in result rows
pub use serde_json::Value;

/// Error codes reported by the graph service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Succeeded,
    Disconnected,
    FailToConnect,
    RpcFailure,
    SpaceNotFound,
    TagNotFound,
    EdgeNotFound,
    BadUsernamePassword,
    SessionInvalid,
    SessionTimeout,
    SyntaxError,
    ExecutionError,
    StatementEmpty,
    BadPermission,
    SemanticError,
    /// Any code this client does not name
    Other(i32),
}

impl ErrorCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ErrorCode::Succeeded,
            -1 => ErrorCode::Disconnected,
            -2 => ErrorCode::FailToConnect,
            -3 => ErrorCode::RpcFailure,
            -5 => ErrorCode::SpaceNotFound,
            -6 => ErrorCode::TagNotFound,
            -7 => ErrorCode::EdgeNotFound,
            -1001 => ErrorCode::BadUsernamePassword,
            -1002 => ErrorCode::SessionInvalid,
            -1003 => ErrorCode::SessionTimeout,
            -1004 => ErrorCode::SyntaxError,
            -1005 => ErrorCode::ExecutionError,
            -1006 => ErrorCode::StatementEmpty,
            -1008 => ErrorCode::BadPermission,
            -1009 => ErrorCode::SemanticError,
            other => ErrorCode::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::Succeeded => 0,
            ErrorCode::Disconnected => -1,
            ErrorCode::FailToConnect => -2,
            ErrorCode::RpcFailure => -3,
            ErrorCode::SpaceNotFound => -5,
            ErrorCode::TagNotFound => -6,
            ErrorCode::EdgeNotFound => -7,
            ErrorCode::BadUsernamePassword => -1001,
            ErrorCode::SessionInvalid => -1002,
            ErrorCode::SessionTimeout => -1003,
            ErrorCode::SyntaxError => -1004,
            ErrorCode::ExecutionError => -1005,
            ErrorCode::StatementEmpty => -1006,
            ErrorCode::BadPermission => -1008,
            ErrorCode::SemanticError => -1009,
            ErrorCode::Other(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Succeeded)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::Succeeded => "SUCCEEDED",
            ErrorCode::Disconnected => "E_DISCONNECTED",
            ErrorCode::FailToConnect => "E_FAIL_TO_CONNECT",
            ErrorCode::RpcFailure => "E_RPC_FAILURE",
            ErrorCode::SpaceNotFound => "E_SPACE_NOT_FOUND",
            ErrorCode::TagNotFound => "E_TAG_NOT_FOUND",
            ErrorCode::EdgeNotFound => "E_EDGE_NOT_FOUND",
            ErrorCode::BadUsernamePassword => "E_BAD_USERNAME_PASSWORD",
            ErrorCode::SessionInvalid => "E_SESSION_INVALID",
            ErrorCode::SessionTimeout => "E_SESSION_TIMEOUT",
            ErrorCode::SyntaxError => "E_SYNTAX_ERROR",
            ErrorCode::ExecutionError => "E_EXECUTION_ERROR",
            ErrorCode::StatementEmpty => "E_STATEMENT_EMPTY",
            ErrorCode::BadPermission => "E_BAD_PERMISSION",
            ErrorCode::SemanticError => "E_SEMANTIC_ERROR",
            ErrorCode::Other(code) => return write!(f, "E_UNKNOWN({})", code),
        };
        f.write_str(name)
    }
}

/// One result row, keyed by column name in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy when pools assemble rows
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn get_value(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

/// Outcome of one statement
///
/// A failed result always carries a non-success [`ErrorCode`] and an error
/// message; [`ResultSet::failed`] enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    error_code: ErrorCode,
    error_message: Option<String>,
    space_name: Option<String>,
    latency: Duration,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// A successful result with the given columns and rows
    pub fn succeeded(columns: Vec<String>, rows: Vec<Row>) -> Self {
        ResultSet {
            error_code: ErrorCode::Succeeded,
            error_message: None,
            space_name: None,
            latency: Duration::ZERO,
            columns,
            rows,
        }
    }

    /// A successful result with no data, as returned for DDL and `USE`
    pub fn empty() -> Self {
        Self::succeeded(Vec::new(), Vec::new())
    }

    /// A failed result
    ///
    /// `SUCCEEDED` is not a failure code and is replaced by `E_EXECUTION_ERROR`;
    /// an empty message is replaced by the code's name.
    pub fn failed(code: ErrorCode, message: impl Into<String>) -> Self {
        let code = if code.is_success() {
            ErrorCode::ExecutionError
        } else {
            code
        };
        let mut message = message.into();
        if message.is_empty() {
            message = code.to_string();
        }

        ResultSet {
            error_code: code,
            error_message: Some(message),
            space_name: None,
            latency: Duration::ZERO,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_space_name(mut self, space: impl Into<String>) -> Self {
        self.space_name = Some(space.into());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn is_succeeded(&self) -> bool {
        self.error_code.is_success()
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// The service error message; empty for successful results
    pub fn error_msg(&self) -> &str {
        self.error_message.as_deref().unwrap_or("")
    }

    /// Space the session was using when the statement ran, if reported
    pub fn space_name(&self) -> Option<&str> {
        self.space_name.as_deref()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Turn a failed result into [`Error::Execution`]
    pub fn check(&self) -> Result<()> {
        if self.is_succeeded() {
            return Ok(());
        }
        Err(Error::execution(self.error_code, self.error_msg()))
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the column names
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Get a specific row by index
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Check if the result is empty (no rows)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Deserialize all rows into a vector of the given type
    ///
    /// Each row is treated as a JSON object keyed by column name.
    ///
    /// ```no_run
    /// # use nebula_sdk::ResultSet;
    /// #[derive(serde::Deserialize)]
    /// struct Player { name: String, age: u32 }
    ///
    /// # fn run(result: ResultSet) -> nebula_sdk::Result<()> {
    /// let players: Vec<Player> = result.deserialize_rows()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn deserialize_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows.iter().map(|row| self.deserialize_row(row)).collect()
    }

    /// Deserialize a single row into the given type
    pub fn deserialize_row<T: DeserializeOwned>(&self, row: &Row) -> Result<T> {
        let json_value = serde_json::to_value(&row.values)?;
        Ok(serde_json::from_value(json_value)?)
    }

    /// Get the first row as the given type
    pub fn first<T: DeserializeOwned>(&self) -> Result<T> {
        let row = self
            .get_row(0)
            .ok_or_else(|| Error::NotFound("No rows returned".to_string()))?;

        self.deserialize_row(row)
    }

    /// Get a single value from the first row and first column
    pub fn scalar<T: DeserializeOwned>(&self) -> Result<T> {
        let row = self
            .get_row(0)
            .ok_or_else(|| Error::NotFound("No rows returned".to_string()))?;

        let column = self
            .columns
            .first()
            .ok_or_else(|| Error::NotFound("No columns returned".to_string()))?;

        let value = row
            .get_value(column)
            .ok_or_else(|| Error::NotFound(format!("Column value not found: {}", column)))?;

        Ok(serde_json::from_value(value.clone())?)
    }
}
