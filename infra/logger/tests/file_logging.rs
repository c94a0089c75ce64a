use fgate_logger::{LevelFilter, Logger};
use std::fs;
use tempfile::tempdir;

#[test]
fn file_sink_writes_filtered_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .level(LevelFilter::WARN)
        .filter("fgate_resolver=debug")
        .ansi(false)
        .files(&log_dir, "fgate")
        .json(true)
        .install()?;
    assert!(logger.writes_files());

    tracing::debug!(target: "fgate_resolver", round = 1, resolved = 1, "round finished");
    tracing::debug!(target: "fgate_kernel", "filtered out");
    drop(logger);

    let files: Vec<_> = fs::read_dir(&log_dir)?.flatten().map(|entry| entry.path()).collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("fgate") && name.ends_with(".log"), "unexpected file name {name}");

    let contents = fs::read_to_string(&files[0])?;
    assert!(contents.trim_start().starts_with('{'), "json sink should emit JSON lines");
    assert!(contents.contains("round finished"));
    assert!(contents.contains(r#""round":1"#));
    assert!(!contents.contains("filtered out"));

    Ok(())
}
