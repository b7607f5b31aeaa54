// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Pooled statement execution with scoped session leases
//!
//! Every call leases one session from the pool, optionally switches it to a
//! graph space, runs the statement and checks the result. The lease follows
//! the RAII pattern:
//! - The session goes back to the pool when the [`SessionLease`] is dropped
//! - This happens on every exit path, including errors and panics
//! - A lease is never shared between callers
//!
//! There is no retry: a failure is reported to the caller as-is.

use crate::error::Result;
use crate::pool::{ConnectionPool, GraphSession};
use crate::result::ResultSet;
use crate::schema::validate_identifier;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::sync::Arc;

static PASSWORD_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bPASSWORD\b").expect("password pattern is valid"));

static STRING_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#).expect("literal pattern is valid")
});

/// Statement text safe for the log
///
/// Statements that mention a password (`CREATE USER`, `ALTER USER`,
/// `CHANGE PASSWORD`) have every string literal masked.
pub(crate) fn loggable(statement: &str) -> Cow<'_, str> {
    if PASSWORD_KEYWORD.is_match(statement) {
        STRING_LITERAL.replace_all(statement, "\"***\"")
    } else {
        Cow::Borrowed(statement)
    }
}

/// A session borrowed from the pool
///
/// Released back to the pool exactly once, when dropped.
pub struct SessionLease<S: GraphSession> {
    session: S,
}

impl<S: GraphSession> SessionLease<S> {
    fn new(session: S) -> Self {
        log::debug!("session leased");
        SessionLease { session }
    }

    /// Run a statement and fail with [`Error::Execution`](crate::Error::Execution)
    /// if the service rejects it
    pub fn execute(&mut self, statement: &str) -> Result<ResultSet> {
        let result = self.execute_unchecked(statement)?;
        if let Err(e) = result.check() {
            log::warn!("statement rejected: {}", e);
            return Err(e);
        }
        Ok(result)
    }

    /// Run a statement and return the result whether or not it succeeded
    pub fn execute_unchecked(&mut self, statement: &str) -> Result<ResultSet> {
        log::debug!("executing: {}", loggable(statement));
        self.session.execute(statement)
    }

    /// Switch this session to `space` with `USE <space>;`
    pub fn use_space(&mut self, space: &str) -> Result<()> {
        validate_identifier("space", space)?;
        self.execute(&format!("USE {};", space))?;
        Ok(())
    }
}

impl<S: GraphSession> Drop for SessionLease<S> {
    fn drop(&mut self) {
        self.session.release();
        log::debug!("session released");
    }
}

/// Runs statements on sessions leased from a shared pool
pub struct SessionExecutor<P: ConnectionPool> {
    pool: Arc<P>,
    username: String,
    password: String,
}

impl<P: ConnectionPool> SessionExecutor<P> {
    pub fn new(pool: Arc<P>, username: impl Into<String>, password: impl Into<String>) -> Self {
        SessionExecutor {
            pool,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Lease a session with the configured credentials
    ///
    /// Any pool failure, including rejected credentials, is reported as
    /// [`Error::Connection`](crate::Error::Connection).
    pub fn lease(&self) -> Result<SessionLease<P::Session>> {
        let session = self
            .pool
            .acquire_session(&self.username, &self.password)
            .map_err(|e| {
                log::warn!("failed to get session for user {}: {}", self.username, e);
                e
            })?;
        Ok(SessionLease::new(session))
    }

    /// Execute one statement, optionally inside `space`
    ///
    /// When `space` is given, `USE <space>;` runs first on the same session;
    /// if it fails the statement is never sent.
    pub fn execute(&self, space: Option<&str>, statement: &str) -> Result<ResultSet> {
        self.with_session(space, |session| session.execute(statement))
    }

    /// Run `f` against one leased session, optionally inside `space`
    ///
    /// Use this for a short sequence of statements that must share a
    /// session. The session is released when this returns or unwinds.
    pub fn with_session<T, F>(&self, space: Option<&str>, f: F) -> Result<T>
    where
        F: FnOnce(&mut SessionLease<P::Session>) -> Result<T>,
    {
        if let Some(space) = space {
            validate_identifier("space", space)?;
        }

        let mut session = self.lease()?;
        if let Some(space) = space {
            session.use_space(space)?;
        }
        f(&mut session)
    }
}
