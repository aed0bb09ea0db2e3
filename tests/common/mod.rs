//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Write a codec config and a small units table into `temp_dir`.
///
/// Returns the path to the config file. The table knows `meter` (`m`) and `furlong` (`fur`);
/// the config maps the short zone name `Eastern` to `US/Eastern`.
#[allow(dead_code)]
pub fn create_test_config(temp_dir: &TempDir) -> PathBuf {
    let units = "\
// test units
-- length (m)
meter, m; m
furlong, fur; m; 201.168
";
    std::fs::write(temp_dir.path().join("units.txt"), units).unwrap();

    let config = r#"units_path = "units.txt"

[timezone_overrides]
Eastern = "US/Eastern"
"#;
    let path = temp_dir.path().join("trio.toml");
    std::fs::write(&path, config).unwrap();
    path
}
