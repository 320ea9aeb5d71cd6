// Unit tests for logger module initialization logic
// Tests focus on thread-safety and error handling

use crate::logger::{DEFAULT_LOG_LEVEL, initialize, is_initialized};

use std::path::PathBuf;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to panic when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempfile::tempdir().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), DEFAULT_LOG_LEVEL);
    let result2 = initialize(temp_dir.path(), DEFAULT_LOG_LEVEL);

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
    // The binary relies on this flag to avoid printing a failure twice
    assert!(is_initialized());
}

/// **VALUE**: Verifies that logger rejects a directory that cannot hold the log file.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` unwraps instead of returning
/// a Result, causing panics when the log file can't be created.
#[test]
fn given_invalid_log_dir_when_initialize_called_then_returns_error() {
    // GIVEN: A path that is guaranteed not to be a directory
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Calling initialize with invalid directory
    let result = initialize(&invalid_dir, DEFAULT_LOG_LEVEL);

    // THEN: Should return error (not panic)
    let err = result.unwrap_err();
    let err_string = format!("{:?}", err);
    assert!(
        err_string.contains("Cli"),
        "Error should be TrelloCliError::Cli variant"
    );
}
