//! Configuration loading together with logger setup.
//!
//! Lives in its own test binary: the logger is process-global.

use std::fs;

use gridvalue::config::Config;

#[test]
fn logger_follows_the_configured_level() {
  let path = std::env::temp_dir().join(format!("gridvalue-config-{}.toml", std::process::id()));
  fs::write(&path, "[evaluation]\nmax_iter = 80\n\n[logging]\nlevel = \"debug\"\n").unwrap();

  let config = Config::setup(Some(&path)).unwrap();
  fs::remove_file(&path).ok();

  assert_eq!(config.evaluation.max_iter, 80);
  assert_eq!(config.logging.level, "debug");
  if std::env::var_os("RUST_LOG").is_none() {
    // the load is reported at info level, so the logger must already be live
    assert!(log::log_enabled!(log::Level::Info));
    assert!(log::log_enabled!(log::Level::Debug));
  }

  // a second setup keeps the installed logger and still returns the config
  let defaults = Config::setup(None).unwrap();
  assert_eq!(defaults.evaluation.max_iter, 50);
  assert_eq!(defaults.logging.level, "info");
}
