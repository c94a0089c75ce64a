use fgate_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn stderr_logger_installs_once_per_process() {
    let logger = Logger::builder().level(LevelFilter::INFO).ansi(false).install().expect("first install");
    assert!(!logger.writes_files());
    tracing::info!(resolved = 2, failed = 0, "resolution finished");

    let err = Logger::builder().level(LevelFilter::DEBUG).install().expect_err("second install");
    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err}");
}
