use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use hearth_config::Error;

fn write_temp_config(payload: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("hearth_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

#[test]
fn load_applies_defaults_to_partial_files() {
	let path = write_temp_config("[search]\nmax_page_size = 50\n");
	let result = hearth_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected partial config to load.");

	assert_eq!(cfg.search.max_page_size, 50);
	assert_eq!(cfg.search.default_page_size, 20);
	assert_eq!(cfg.alerts.delivery_batch_size, 500);
	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn load_reports_missing_file() {
	let mut path = env::temp_dir();

	path.push("hearth_config_test_missing.toml");

	let err = hearth_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn load_reports_malformed_toml() {
	let path = write_temp_config("[search\nmax_page_size = 50\n");
	let result = hearth_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn load_surfaces_validation_errors() {
	let path = write_temp_config("[search]\ndefault_page_size = 200\nmax_page_size = 100\n");
	let result = hearth_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected validation error.");

	assert!(
		err.to_string().contains("search.default_page_size must not exceed search.max_page_size."),
		"Unexpected error: {err}"
	);
}
