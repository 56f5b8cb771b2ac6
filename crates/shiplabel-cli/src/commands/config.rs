//! Config command - inspect and edit the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use shiplabel_core::ShiplabelConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration and API key status
    Show,

    /// Write a configuration file with default values
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value by dotted key (e.g., "extraction.model")
    Get { key: String },

    /// Change one existing value by dotted key
    Set { key: String, value: String },

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show(&path),
        ConfigCommand::Init { output, force } => init(output.as_deref().unwrap_or(&path), force),
        ConfigCommand::Get { key } => get(&path, &key),
        ConfigCommand::Set { key, value } => set(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

/// Default configuration location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shiplabel")
        .join("config.json")
}

fn read_or_default(path: &Path) -> anyhow::Result<ShiplabelConfig> {
    if path.exists() {
        Ok(ShiplabelConfig::from_file(path)?)
    } else {
        debug!("No config at {}, using defaults", path.display());
        Ok(ShiplabelConfig::default())
    }
}

/// Follow a dotted key through serialized configuration.
///
/// Only keys the configuration already has resolve.
fn entry<'a>(root: &'a mut Value, key: &str) -> anyhow::Result<&'a mut Value> {
    key.split('.').try_fold(root, |node, part| {
        node.get_mut(part).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown configuration key: {}. Run 'shiplabel config show' to list keys.",
                key
            )
        })
    })
}

/// Interpret a command-line value for the slot it replaces.
///
/// String slots take the text verbatim; other slots take JSON and fall
/// back to a string, which then fails type checking.
fn parse_value(raw: &str, current: &Value) -> Value {
    if current.is_string() {
        return Value::String(raw.to_string());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn show(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = read_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    let key_status = match config.extraction.api_key() {
        Some(_) => style("set").green(),
        None => style("not set").yellow(),
    };
    println!(
        "{} API key ({}): {}",
        style("ℹ").blue(),
        config.extraction.key_sources(),
        key_status
    );

    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    ShiplabelConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

fn get(path: &Path, key: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(read_or_default(path)?)?;
    let value = entry(&mut json, key)?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(read_or_default(path)?)?;

    let slot = entry(&mut json, key)?;
    if slot.is_object() {
        anyhow::bail!("{} is a section; set one of its keys instead", key);
    }
    let value = parse_value(raw, slot);
    *slot = value.clone();

    let config: ShiplabelConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&value)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'shiplabel config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_resolves_only_existing_keys() {
        let mut json = serde_json::to_value(ShiplabelConfig::default()).unwrap();

        assert_eq!(
            entry(&mut json, "extraction.model").unwrap(),
            &Value::from("gemini-2.5-flash")
        );
        assert!(entry(&mut json, "package.weigth").is_err());
        assert!(entry(&mut json, "extraction.model.name").is_err());
    }

    #[test]
    fn test_parse_value_respects_slot_type() {
        assert_eq!(parse_value("2", &Value::from("text")), Value::from("2"));
        assert_eq!(parse_value("2", &Value::from(60)), Value::from(2));
        assert_eq!(parse_value("many", &Value::from(60)), Value::from("many"));
    }
}
