//! Layered settings: built-in defaults, then the optional TOML file, then
//! `VITAE_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vitae_compile::client::DEFAULT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  /// Base URL of the compile service.
  pub api_url:    String,
  /// Directory compiled PDFs are saved into.
  pub output_dir: PathBuf,
}

impl Settings {
  pub fn resolve(
    file: Option<&Path>,
    api_url: Option<String>,
    output_dir: Option<PathBuf>,
  ) -> Result<Self> {
    let mut builder = config::Config::builder()
      .set_default("api_url", DEFAULT_BASE_URL)?
      .set_default("output_dir", ".")?;
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(true));
    }
    let layered = builder
      .add_source(config::Environment::with_prefix("VITAE"))
      .set_override_option("api_url", api_url)?
      .set_override_option(
        "output_dir",
        output_dir.map(|p| p.to_string_lossy().into_owned()),
      )?
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = layered
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.output_dir = expand_tilde(&settings.output_dir);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
