//! Subcommands and the helpers they share.

pub mod autofill;
pub mod config;
pub mod extract;
pub mod label;
pub mod render;

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use shiplabel_core::ShiplabelConfig;

/// Load configuration from `-c`, the default location, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ShiplabelConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(ShiplabelConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(ShiplabelConfig::from_file(&default_path)?)
    } else {
        Ok(ShiplabelConfig::default())
    }
}

/// Warn when no API key is configured. Manual editing still works.
pub fn check_api_key(config: &ShiplabelConfig) -> Option<String> {
    let key = config.extraction.api_key();
    if key.is_none() {
        warn!("No API key in {}", config.extraction.key_sources());
        eprintln!(
            "{} No API key found in {}. AI autofill is unavailable.",
            style("!").yellow(),
            config.extraction.key_sources()
        );
    }
    key
}

/// Read address text from the argument, or from stdin when absent or `-`.
pub fn read_text(text: Option<String>) -> anyhow::Result<String> {
    match text.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(t) => Ok(t.to_string()),
    }
}

/// Spinner shown while a parse is in flight.
pub fn parsing_spinner() -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Parsing...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
