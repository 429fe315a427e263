mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Alerts, Config, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.search.max_page_size == 0 {
		return Err(invalid("search.max_page_size", "must be greater than zero."));
	}
	if cfg.search.default_page_size == 0 {
		return Err(invalid("search.default_page_size", "must be greater than zero."));
	}
	if cfg.search.default_page_size > cfg.search.max_page_size {
		return Err(invalid("search.default_page_size", "must not exceed search.max_page_size."));
	}
	if cfg.search.max_polygon_vertices < 3 {
		return Err(invalid("search.max_polygon_vertices", "must be at least 3."));
	}
	if cfg.search.max_location_bytes == 0 {
		return Err(invalid("search.max_location_bytes", "must be greater than zero."));
	}
	if cfg.alerts.delivery_batch_size == 0 {
		return Err(invalid("alerts.delivery_batch_size", "must be greater than zero."));
	}

	Ok(())
}

fn invalid(key: &'static str, message: &str) -> Error {
	Error::Validation { key, message: message.to_string() }
}
