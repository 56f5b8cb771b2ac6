//! Extract command - parse address text without touching a label.

use clap::Args;
use tracing::debug;

use shiplabel_core::{
    Address, AddressExtractor, AddressField, ExtractionError, GeminiExtractor,
};

use super::{check_api_key, load_config, parsing_spinner, read_text};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Unstructured address text (default: stdin, or `-`)
    text: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let Some(api_key) = check_api_key(&config) else {
        let e = ExtractionError::Unavailable(config.extraction.key_sources());
        anyhow::bail!(e.user_message());
    };
    let extractor = GeminiExtractor::with_api_key(&config.extraction, api_key);

    let text = read_text(args.text)?;

    let pb = parsing_spinner()?;
    let result = extractor.extract_address(&text).await;
    pb.finish_and_clear();

    let address = result.map_err(|e| {
        debug!("Extraction failed: {:?}", e);
        anyhow::anyhow!(e.user_message())
    })?;

    print!("{}", format_address(&address, args.format)?);

    Ok(())
}

fn format_address(address: &Address, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(address)?)),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.serialize(address)?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for field in AddressField::ALL {
                out.push_str(&format!("{:<10} {}\n", format!("{}:", field), address.get(field)));
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        Address {
            full_name: "John Doe".to_string(),
            street: "123 Main St".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            country: "USA".to_string(),
            phone_number: "555-0123".to_string(),
        }
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let csv = format_address(&sample(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("fullName,street,city,state,country,phoneNumber")
        );
        assert_eq!(lines.next(), Some("John Doe,123 Main St,Austin,TX,USA,555-0123"));
    }

    #[test]
    fn test_text_lists_every_field() {
        let text = format_address(&sample(), OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("555-0123"));
    }
}
