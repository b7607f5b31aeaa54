//! Test utilities for nebula SDK integration tests
//!
//! `MockPool` stands in for a real connection pool. Every session it hands
//! out writes to a shared `MockState`, so tests can assert which statements
//! were sent and how often sessions were acquired and released.

#![allow(dead_code)]

use nebula_sdk::{
    Config, ConnectionPool, Error, ErrorCode, GraphClient, GraphSession, HostAddress, PoolConfig,
    PoolError, Result, ResultSet,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Hosts with this suffix are treated as unreachable by `MockPool::connect`
pub const UNREACHABLE_SUFFIX: &str = ".invalid";

/// Shared record of everything the mock pool saw
#[derive(Default)]
pub struct MockState {
    pub hosts: Vec<HostAddress>,
    pub pool_config: Option<PoolConfig>,
    pub credentials: Vec<(String, String)>,
    /// Statements in the order they reached a session, tagged with session id
    pub statements: Vec<(usize, String)>,
    /// Session ids in release order
    pub releases: Vec<usize>,
    pub next_session: usize,
    pub closed: bool,

    // Scripted behavior
    pub refuse_auth: bool,
    pub exhausted: bool,
    pub existing_spaces: Vec<String>,
    pub rejected: HashMap<String, (ErrorCode, String)>,
    pub transport_failures: Vec<String>,
    pub responses: HashMap<String, ResultSet>,
}

impl MockState {
    pub fn sent(&self) -> Vec<String> {
        self.statements.iter().map(|(_, s)| s.clone()).collect()
    }

    pub fn acquired(&self) -> usize {
        self.next_session
    }
}

pub struct MockPool {
    state: Arc<Mutex<MockState>>,
}

impl MockPool {
    pub fn new() -> Self {
        MockPool {
            state: Arc::new(Mutex::new(MockState {
                existing_spaces: vec!["nba".to_string()],
                ..MockState::default()
            })),
        }
    }

    pub fn state(&self) -> Arc<Mutex<MockState>> {
        self.state.clone()
    }
}

impl ConnectionPool for MockPool {
    type Session = MockSession;

    fn connect(hosts: &[HostAddress], config: &PoolConfig) -> std::result::Result<Self, PoolError> {
        if let Some(host) = hosts.iter().find(|h| h.host.ends_with(UNREACHABLE_SUFFIX)) {
            return Err(PoolError::Unreachable {
                host: host.to_string(),
                reason: "no route to host".to_string(),
            });
        }

        let pool = MockPool::new();
        {
            let mut state = pool.state.lock();
            state.hosts = hosts.to_vec();
            state.pool_config = Some(*config);
        }
        Ok(pool)
    }

    fn acquire_session(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<MockSession, PoolError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(PoolError::Closed);
        }
        if state.refuse_auth {
            return Err(PoolError::Auth(format!("bad password for {}", username)));
        }
        if state.exhausted {
            return Err(PoolError::Exhausted { max: 10 });
        }

        state
            .credentials
            .push((username.to_string(), password.to_string()));
        let id = state.next_session;
        state.next_session += 1;

        Ok(MockSession {
            id,
            state: self.state.clone(),
        })
    }

    fn close(&self) {
        self.state.lock().closed = true;
    }
}

pub struct MockSession {
    id: usize,
    state: Arc<Mutex<MockState>>,
}

impl GraphSession for MockSession {
    fn execute(&mut self, statement: &str) -> Result<ResultSet> {
        let mut state = self.state.lock();
        state.statements.push((self.id, statement.to_string()));

        if state.transport_failures.iter().any(|s| s == statement) {
            return Err(Error::execution(ErrorCode::RpcFailure, "broken pipe"));
        }

        if let Some(space) = statement
            .strip_prefix("USE ")
            .and_then(|rest| rest.strip_suffix(';'))
        {
            if !state.existing_spaces.iter().any(|s| s == space) {
                return Ok(ResultSet::failed(
                    ErrorCode::SpaceNotFound,
                    format!("SpaceNotFound: SpaceName `{}`", space),
                ));
            }
            return Ok(ResultSet::empty().with_space_name(space));
        }

        if let Some((code, message)) = state.rejected.get(statement) {
            return Ok(ResultSet::failed(*code, message.clone()));
        }

        Ok(state
            .responses
            .get(statement)
            .cloned()
            .unwrap_or_else(ResultSet::empty))
    }

    fn release(&mut self) {
        self.state.lock().releases.push(self.id);
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> Config {
    Config::new("10.111.136.13", 9669, "user", "password")
}

/// Client over a fresh mock pool, plus a handle to the pool's state
pub fn mock_client() -> (GraphClient<MockPool>, Arc<Mutex<MockState>>) {
    init_logging();
    let client = GraphClient::<MockPool>::connect(test_config()).expect("mock pool connects");
    let state = client.pool().state();
    (client, state)
}

/// Assert every acquired session was released exactly once
pub fn assert_balanced(state: &MockState) {
    let mut releases = state.releases.clone();
    releases.sort_unstable();
    let expected: Vec<usize> = (0..state.acquired()).collect();
    assert_eq!(
        releases, expected,
        "each acquired session must be released exactly once"
    );
}
