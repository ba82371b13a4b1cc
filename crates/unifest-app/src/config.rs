//! Application configuration.
//!
//! Read from an optional TOML file, then `UNIFEST_*` environment variables
//! (e.g. `UNIFEST_API_BASE_URL`). Every key has a default.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use serde::Deserialize;
use unifest_api::GatewayConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub api_base_url:         String,
  pub store_path:           PathBuf,
  pub request_timeout_secs: u64,
  /// Festival shown on the map and booth commands.
  pub festival_id:          i64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      api_base_url:         "http://localhost:8080".to_owned(),
      store_path:           PathBuf::from("~/.local/share/unifest/unifest.db"),
      request_timeout_secs: 10,
      festival_id:          1,
    }
  }
}

impl AppConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("UNIFEST"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  pub fn gateway(&self) -> GatewayConfig {
    GatewayConfig {
      base_url: self.api_base_url.clone(),
      timeout:  Duration::from_secs(self.request_timeout_secs),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
