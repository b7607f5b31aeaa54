// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Client configuration
//!
//! [`Config`] carries the graph service endpoint, credentials and pool sizing.
//! It is plain data: callers build it in code or load it from JSON, and
//! [`Config::pool_config`] turns it into the normalized [`PoolConfig`] the
//! connection pool is constructed with.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Smallest pool ceiling handed to the connection pool
pub const MIN_MAX_POOL_SIZE: usize = 10;

/// Smallest pool floor handed to the connection pool
pub const MIN_MIN_POOL_SIZE: usize = 1;

/// Default graphd port
pub const DEFAULT_PORT: u16 = 9669;

/// A single graph service endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostAddress {
    pub host: String,
    pub port: u16,
}

impl HostAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        HostAddress {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Normalized pool settings passed to [`ConnectionPool::connect`](crate::pool::ConnectionPool::connect)
///
/// A zero `timeout` or `idle_time` means the pool's own default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub timeout: Duration,
    pub idle_time: Duration,
    pub max_conn_pool_size: usize,
    pub min_conn_pool_size: usize,
}

/// Connection settings for a [`GraphClient`](crate::GraphClient)
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to override:
///
/// ```json
/// { "address": "10.0.0.7", "username": "app", "password": "secret", "max_pool_size": 32 }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub address: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Duration,
    #[serde(rename = "idle_time_ms", with = "millis")]
    pub idle_time: Duration,
    pub max_pool_size: usize,
    pub min_pool_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            username: "root".to_string(),
            password: "nebula".to_string(),
            timeout: Duration::ZERO,
            idle_time: Duration::ZERO,
            max_pool_size: MIN_MAX_POOL_SIZE,
            min_pool_size: MIN_MIN_POOL_SIZE,
        }
    }
}

impl Config {
    /// Create a configuration for the given endpoint and credentials
    ///
    /// Pool sizing and timeouts keep their defaults.
    pub fn new(
        address: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Config {
            address: address.into(),
            port,
            username: username.into(),
            password: password.into(),
            ..Config::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_idle_time(mut self, idle_time: Duration) -> Self {
        self.idle_time = idle_time;
        self
    }

    pub fn with_pool_size(mut self, min: usize, max: usize) -> Self {
        self.min_pool_size = min;
        self.max_pool_size = max;
        self
    }

    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The host list the pool is constructed against
    pub fn host_list(&self) -> Vec<HostAddress> {
        vec![HostAddress::new(self.address.clone(), self.port)]
    }

    /// Effective pool ceiling: anything below 10 (including 0) becomes 10
    pub fn effective_max_pool_size(&self) -> usize {
        self.max_pool_size.max(MIN_MAX_POOL_SIZE)
    }

    /// Effective pool floor: 0 becomes 1
    pub fn effective_min_pool_size(&self) -> usize {
        self.min_pool_size.max(MIN_MIN_POOL_SIZE)
    }

    /// Check the configuration can be used to build a client
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(Error::Config("address must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(Error::Config("port must not be 0".to_string()));
        }
        if self.username.is_empty() {
            return Err(Error::Config("username must not be empty".to_string()));
        }

        let (min, max) = (self.effective_min_pool_size(), self.effective_max_pool_size());
        if min > max {
            return Err(Error::Config(format!(
                "min_pool_size ({}) exceeds max_pool_size ({})",
                min, max
            )));
        }

        Ok(())
    }

    /// Validate and produce the normalized pool settings
    pub fn pool_config(&self) -> Result<PoolConfig> {
        self.validate()?;
        Ok(PoolConfig {
            timeout: self.timeout,
            idle_time: self.idle_time,
            max_conn_pool_size: self.effective_max_pool_size(),
            min_conn_pool_size: self.effective_min_pool_size(),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("idle_time", &self.idle_time)
            .field("max_pool_size", &self.max_pool_size)
            .field("min_pool_size", &self.min_pool_size)
            .finish()
    }
}

/// Durations as integer milliseconds
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
