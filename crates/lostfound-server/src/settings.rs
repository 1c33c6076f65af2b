//! Runtime server configuration.
//!
//! Layered, lowest precedence first: built-in defaults, the TOML file named on
//! the command line (optional), then `LOSTFOUND_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

const ENV_PREFIX: &str = "LOSTFOUND";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:      String,
  pub port:      u16,
  /// JSON array of posts loaded into the store at startup.
  #[serde(default)]
  pub seed_path: Option<PathBuf>,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_file_source(File::from(path.to_path_buf()).required(false))
  }

  fn from_file_source<S>(file: S) -> Result<Self, ConfigError>
  where
    S: Source + Send + Sync + 'static,
  {
    Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080_i64)?
      .add_source(file)
      .add_source(Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
