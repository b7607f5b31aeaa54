// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! nebula SDK - pooled sessions and schema helpers for NebulaGraph
//!
//! This crate sits on top of a NebulaGraph client library. It manages
//! authenticated sessions from a connection pool, executes statements with
//! scoped session leases, and builds schema DDL for spaces, tags and edge
//! types.
//!
//! # Quick Start
//!
//! ```no_run
//! use nebula_sdk::{Config, GraphClient, SchemaSpec, SpaceSpec};
//!
//! # fn run<P: nebula_sdk::ConnectionPool>() -> nebula_sdk::Result<()> {
//! let config = Config::from_file("nebula.json")?;
//! let client = GraphClient::<P>::connect(config)?;
//!
//! client.create_space(&SpaceSpec::new("nba").if_not_exists())?;
//! client.create_edge(
//!     "nba",
//!     &SchemaSpec::edge("follow").if_not_exists().field("degree", "int"),
//! )?;
//!
//! let result = client.execute_in("nba", "SHOW EDGES;")?;
//! for row in result.rows() {
//!     println!("{:?}", row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application Code                      │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  nebula SDK (this crate)                │
//! │  - GraphClient (facade)                 │
//! │  - SessionExecutor (scoped leases)      │
//! │  - SpaceSpec / SchemaSpec (DDL)         │
//! │  - ResultSet (typed rows)               │
//! └─────────────────────────────────────────┘
//!                  │  ConnectionPool / GraphSession
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  Graph client library                   │
//! │  - connections, wire protocol           │
//! │  - cluster discovery, failover          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`config`] - Endpoint, credentials and pool sizing
//! - [`pool`] - Traits a connection pool implements
//! - [`executor`] - Session leasing and statement execution
//! - [`schema`] - DDL builders
//! - [`result`] - Result sets and typed deserialization
//! - [`client`] - The `GraphClient` facade
//! - [`error`] - Error types and handling

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod pool;
pub mod result;
pub mod schema;

pub use client::GraphClient;
pub use config::{Config, HostAddress, PoolConfig};
pub use error::{Error, Result};
pub use executor::{SessionExecutor, SessionLease};
pub use pool::{ConnectionPool, GraphSession, PoolError};
pub use result::{ErrorCode, ResultSet, Row, Value};
pub use schema::{
    build_create_space_ddl, build_create_tag_or_edge_ddl, Fields, SchemaKind, SchemaSpec,
    SpaceSpec,
};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
