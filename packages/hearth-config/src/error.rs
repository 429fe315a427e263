pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unreadable config file at {path:?}.")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Malformed TOML in config file at {path:?}.")]
	ParseConfig { path: std::path::PathBuf, source: toml::de::Error },
	/// `key` is the dotted path of the offending setting.
	#[error("Invalid config: {key} {message}")]
	Validation { key: &'static str, message: String },
}
