// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection pool abstraction
//!
//! The SDK does not speak the graph wire protocol itself. A client library
//! that does plugs in by implementing these two traits:
//!
//! - [`ConnectionPool`]: owns the physical connections to graphd nodes and
//!   hands out authenticated sessions
//! - [`GraphSession`]: one leased session that runs statements
//!
//! Locking, reconnects and timeouts are the pool's business; the SDK only
//! acquires, executes and releases.

use crate::config::{HostAddress, PoolConfig};
use crate::result::ResultSet;
use std::time::Duration;
use thiserror::Error;

/// Failures raised by a pool while connecting or handing out sessions
#[derive(Error, Debug)]
pub enum PoolError {
    /// No host in the list could be reached
    #[error("failed to connect to {host}: {reason}")]
    Unreachable { host: String, reason: String },

    /// Credentials rejected by graphd
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Every connection is in use
    #[error("no idle connection available (max pool size {max})")]
    Exhausted { max: usize },

    /// Waiting for a connection took longer than the configured timeout
    #[error("timed out after {0:?} waiting for a session")]
    Timeout(Duration),

    /// The pool was closed
    #[error("connection pool is closed")]
    Closed,
}

/// A pool of connections to the graph service
///
/// Implementations must be safe to share between threads; the SDK holds the
/// pool in an `Arc` and calls [`acquire_session`](Self::acquire_session)
/// concurrently.
pub trait ConnectionPool: Send + Sync + Sized {
    /// Session type leased from this pool
    type Session: GraphSession;

    /// Establish the pool against the given hosts
    ///
    /// Implementations are expected to open at least one connection before
    /// returning so that an unreachable cluster fails here.
    fn connect(hosts: &[HostAddress], config: &PoolConfig) -> Result<Self, PoolError>;

    /// Lease an authenticated session
    fn acquire_session(&self, username: &str, password: &str) -> Result<Self::Session, PoolError>;

    /// Close all connections; called by [`GraphClient::close`](crate::GraphClient::close)
    fn close(&self) {}
}

/// A leased, authenticated session
pub trait GraphSession {
    /// Run one statement
    ///
    /// A statement the service rejects comes back as a failed [`ResultSet`].
    /// An `Err` means the round trip itself failed and is reported as
    /// [`Error::Execution`](crate::Error::Execution).
    fn execute(&mut self, statement: &str) -> crate::Result<ResultSet>;

    /// Return the session to its pool
    ///
    /// Called exactly once per lease; the session is dropped right after.
    fn release(&mut self);
}
