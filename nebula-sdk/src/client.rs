// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph client entry point
//!
//! [`GraphClient`] is what applications hold. It owns one connection pool
//! and one [`Config`] for its whole lifetime and is never mutated after
//! construction, so it can be shared between threads behind an `Arc`.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::{SessionExecutor, SessionLease};
use crate::pool::ConnectionPool;
use crate::result::ResultSet;
use crate::schema::{SchemaKind, SchemaSpec, SpaceSpec};
use std::sync::Arc;

/// Main entry point for graph operations
///
/// Generic over the [`ConnectionPool`] implementation that talks to the
/// cluster.
///
/// # Examples
///
/// ```no_run
/// use nebula_sdk::{Config, GraphClient, SchemaSpec, SpaceSpec};
/// # fn run<P: nebula_sdk::ConnectionPool>() -> nebula_sdk::Result<()> {
/// let client = GraphClient::<P>::connect(Config::new("10.0.0.7", 9669, "root", "nebula"))?;
///
/// client.create_space(&SpaceSpec::new("nba").if_not_exists())?;
/// client.create_tag("nba", &SchemaSpec::tag("player").field("name", "string"))?;
///
/// let result = client.execute_in("nba", "SHOW TAGS;")?;
/// # Ok(())
/// # }
/// ```
pub struct GraphClient<P: ConnectionPool> {
    pool: Arc<P>,
    config: Config,
    executor: SessionExecutor<P>,
}

impl<P: ConnectionPool> GraphClient<P> {
    /// Validate `config` and establish the pool
    ///
    /// The pool is built before this returns; if it cannot reach the
    /// configured address no client is created.
    pub fn connect(config: Config) -> Result<Self> {
        let pool_config = config.pool_config()?;
        let hosts = config.host_list();

        log::debug!(
            "connecting to {} (pool size {}..={})",
            hosts[0],
            pool_config.min_conn_pool_size,
            pool_config.max_conn_pool_size
        );

        let pool = P::connect(&hosts, &pool_config).map_err(|e| {
            log::warn!("failed to establish connection pool: {}", e);
            e
        })?;

        Ok(Self::with_validated(config, pool))
    }

    /// Wrap a pool that was built elsewhere
    pub fn from_pool(config: Config, pool: P) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_validated(config, pool))
    }

    fn with_validated(config: Config, pool: P) -> Self {
        let pool = Arc::new(pool);
        let executor =
            SessionExecutor::new(pool.clone(), config.username.clone(), config.password.clone());
        GraphClient {
            pool,
            config,
            executor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Direct access to the underlying pool
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Close the pool's connections and consume the client
    ///
    /// Sessions still leased elsewhere keep the pool alive until released;
    /// closing is up to the pool implementation.
    pub fn close(self) {
        log::debug!("closing connection pool for {}", self.config.host_list()[0]);
        self.pool.close();
    }

    /// Execute a statement on a fresh session
    pub fn execute(&self, statement: &str) -> Result<ResultSet> {
        self.executor.execute(None, statement)
    }

    /// Execute a statement after `USE <space>;` on the same session
    pub fn execute_in(&self, space: &str, statement: &str) -> Result<ResultSet> {
        self.executor.execute(Some(space), statement)
    }

    /// Run several statements on one leased session
    ///
    /// ```no_run
    /// # fn run<P: nebula_sdk::ConnectionPool>(client: &nebula_sdk::GraphClient<P>) -> nebula_sdk::Result<()> {
    /// client.with_session(Some("nba"), |session| {
    ///     session.execute(r#"INSERT VERTEX player(name) VALUES "p1":("Tim Duncan");"#)?;
    ///     session.execute(r#"FETCH PROP ON player "p1" YIELD properties(vertex);"#)
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_session<T, F>(&self, space: Option<&str>, f: F) -> Result<T>
    where
        F: FnOnce(&mut SessionLease<P::Session>) -> Result<T>,
    {
        self.executor.with_session(space, f)
    }

    /// Create a graph space
    pub fn create_space(&self, spec: &SpaceSpec) -> Result<()> {
        let ddl = spec.build()?;
        self.executor.execute(None, &ddl)?;
        Ok(())
    }

    /// Create a tag in `space`
    pub fn create_tag(&self, space: &str, spec: &SchemaSpec) -> Result<()> {
        self.create_schema(SchemaKind::Tag, space, spec)
    }

    /// Create an edge type in `space`
    pub fn create_edge(&self, space: &str, spec: &SchemaSpec) -> Result<()> {
        self.create_schema(SchemaKind::Edge, space, spec)
    }

    fn create_schema(&self, kind: SchemaKind, space: &str, spec: &SchemaSpec) -> Result<()> {
        if spec.kind() != kind {
            return Err(Error::Builder(format!(
                "expected a {} definition, got {} {}",
                kind,
                spec.kind(),
                spec.name()
            )));
        }
        let ddl = spec.build()?;
        self.executor.execute(Some(space), &ddl)?;
        Ok(())
    }
}
