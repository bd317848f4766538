//! Profile configuration (`payrun.toml`).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use payrun_model::PayrunConfig;

/// Config file looked up in every profile root.
pub const CONFIG_FILENAME: &str = "payrun.toml";

/// Loads the configuration for the profile at `root`.
///
/// An explicit `override_path` must exist. Otherwise `<root>/payrun.toml` is
/// used when present and built-in defaults when not. A file that exists but
/// does not parse is an error; it is never silently replaced by defaults.
pub fn load_config(root: &Path, override_path: Option<&Path>) -> Result<PayrunConfig> {
    if let Some(path) = override_path {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        return parse_config(&content, path);
    }
    let path = root.join(CONFIG_FILENAME);
    match fs::read_to_string(&path) {
        Ok(content) => parse_config(&content, &path),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(PayrunConfig::default())
        }
        Err(err) => Err(err).with_context(|| format!("read config {}", path.display())),
    }
}

fn parse_config(content: &str, path: &Path) -> Result<PayrunConfig> {
    let config: PayrunConfig =
        toml::from_str(content).with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}
