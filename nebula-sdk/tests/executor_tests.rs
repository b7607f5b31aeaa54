/// Integration tests for pooled statement execution
///
/// These tests verify that:
/// 1. Sessions are released exactly once on every exit path
/// 2. A failed `USE <space>;` stops the target statement from being sent
/// 3. Pool failures surface as connection errors and send nothing
mod testutils;

use nebula_sdk::{Error, ErrorCode, PoolError, ResultSet, Row};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use testutils::{assert_balanced, mock_client};

#[test]
fn test_execute_returns_result_unchanged() {
    let (client, state) = mock_client();
    let expected = ResultSet::succeeded(
        vec!["Name".to_string()],
        vec![Row::new().with("Name", "nba")],
    );
    state
        .lock()
        .responses
        .insert("SHOW SPACES;".to_string(), expected.clone());

    let result = client.execute("SHOW SPACES;").unwrap();
    assert_eq!(result, expected);

    let state = state.lock();
    assert_eq!(state.sent(), vec!["SHOW SPACES;"]);
    assert_eq!(
        state.credentials,
        vec![("user".to_string(), "password".to_string())]
    );
    assert_balanced(&state);
}

#[test]
fn test_failed_use_never_sends_statement() {
    let (client, state) = mock_client();

    let err = client
        .execute_in("no_such_space", "CREATE TAG player(name string);")
        .unwrap_err();

    match err {
        Error::Execution { code, message } => {
            assert_eq!(code, ErrorCode::SpaceNotFound);
            assert!(message.contains("no_such_space"));
        }
        other => panic!("expected execution error, got {:?}", other),
    }

    let state = state.lock();
    assert_eq!(state.sent(), vec!["USE no_such_space;"]);
    assert_balanced(&state);
}

#[test]
fn test_use_and_statement_share_one_session() {
    let (client, state) = mock_client();

    client.execute_in("nba", "SHOW TAGS;").unwrap();

    let state = state.lock();
    assert_eq!(
        state.statements,
        vec![(0, "USE nba;".to_string()), (0, "SHOW TAGS;".to_string())]
    );
    assert_balanced(&state);
}

#[test]
fn test_rejected_statement_carries_code_and_message() {
    let (client, state) = mock_client();
    state.lock().rejected.insert(
        "GO FROM;".to_string(),
        (ErrorCode::SyntaxError, "syntax error near `;'".to_string()),
    );

    let err = client.execute("GO FROM;").unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::SyntaxError));
    assert_eq!(
        err.to_string(),
        "ErrorCode: E_SYNTAX_ERROR, ErrorMsg: syntax error near `;'"
    );
    assert_balanced(&state.lock());
}

#[test]
fn test_release_once_when_session_execute_errors() {
    let (client, state) = mock_client();
    state
        .lock()
        .transport_failures
        .push("MATCH (v) RETURN v;".to_string());

    let err = client.execute("MATCH (v) RETURN v;").unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::RpcFailure));

    let state = state.lock();
    assert_eq!(state.releases, vec![0]);
    assert_balanced(&state);
}

#[test]
fn test_release_once_when_closure_panics() {
    let (client, state) = mock_client();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        client.with_session(Some("nba"), |session| -> nebula_sdk::Result<()> {
            session.execute("SHOW EDGES;")?;
            panic!("caller bug");
        })
    }));
    assert!(outcome.is_err());

    let state = state.lock();
    assert_eq!(state.sent(), vec!["USE nba;", "SHOW EDGES;"]);
    assert_balanced(&state);
}

#[test]
fn test_with_session_runs_sequence_on_one_session() {
    let (client, state) = mock_client();

    let count = client
        .with_session(Some("nba"), |session| {
            session.execute(r#"INSERT VERTEX player(name) VALUES "p1":("Tim");"#)?;
            session.execute(r#"INSERT VERTEX player(name) VALUES "p2":("Tony");"#)?;
            Ok(2)
        })
        .unwrap();
    assert_eq!(count, 2);

    let state = state.lock();
    assert_eq!(state.acquired(), 1);
    assert!(state.statements.iter().all(|(id, _)| *id == 0));
    assert_eq!(state.statements.len(), 3);
    assert_balanced(&state);
}

#[test]
fn test_with_session_stops_at_first_rejection() {
    let (client, state) = mock_client();
    state.lock().rejected.insert(
        "DELETE VERTEX \"p1\";".to_string(),
        (ErrorCode::BadPermission, "PermissionError".to_string()),
    );

    let err = client
        .with_session(None, |session| {
            session.execute("DELETE VERTEX \"p1\";")?;
            session.execute("DELETE VERTEX \"p2\";")
        })
        .unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::BadPermission));

    let state = state.lock();
    assert_eq!(state.sent(), vec!["DELETE VERTEX \"p1\";"]);
    assert_balanced(&state);
}

#[test]
fn test_acquire_failures_are_connection_errors() {
    let (client, state) = mock_client();

    state.lock().refuse_auth = true;
    let err = client.execute("SHOW SPACES;").unwrap_err();
    assert!(matches!(err, Error::Connection(PoolError::Auth(_))));

    {
        let mut state = state.lock();
        state.refuse_auth = false;
        state.exhausted = true;
    }
    let err = client.execute_in("nba", "SHOW SPACES;").unwrap_err();
    assert!(matches!(
        err,
        Error::Connection(PoolError::Exhausted { max: 10 })
    ));

    let state = state.lock();
    assert!(state.statements.is_empty());
    assert!(state.releases.is_empty());
}

#[test]
fn test_concurrent_callers_each_release() {
    let (client, state) = mock_client();
    let client = Arc::new(client);

    std::thread::scope(|scope| {
        for i in 0..8 {
            let client = client.clone();
            scope.spawn(move || {
                let statement = format!("FETCH PROP ON player \"p{}\" YIELD vertex AS v;", i);
                client.execute_in("nba", &statement).unwrap();
            });
        }
    });

    let state = state.lock();
    assert_eq!(state.acquired(), 8);
    assert_eq!(state.statements.len(), 16);
    assert_balanced(&state);
}
