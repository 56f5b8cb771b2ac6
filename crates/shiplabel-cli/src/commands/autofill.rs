//! Autofill command - fill one address of a label from pasted text.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use shiplabel_core::{AddressTarget, ExtractionError, FormState, GeminiExtractor};

use super::{check_api_key, load_config, parsing_spinner, read_text};

/// Arguments for the autofill command.
#[derive(Args)]
pub struct AutofillArgs {
    /// Label file
    file: PathBuf,

    /// Which address to fill (sender or receiver)
    target: AddressTarget,

    /// Unstructured address text (default: stdin, or `-`)
    text: Option<String>,
}

pub async fn run(args: AutofillArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut form = FormState::load(&args.file, config.package.clone())?;

    let Some(api_key) = check_api_key(&config) else {
        let e = ExtractionError::Unavailable(config.extraction.key_sources());
        anyhow::bail!(e.user_message());
    };
    let extractor = GeminiExtractor::with_api_key(&config.extraction, api_key);
    debug!("Using model {}", extractor.model());

    let text = read_text(args.text)?;
    form.set_autofill_input(args.target, text);

    let pb = parsing_spinner()?;
    let result = form.autofill(args.target, &extractor).await;
    pb.finish_and_clear();

    if let Err(e) = result {
        debug!("Autofill failed: {:?}", e);
        anyhow::bail!(e.user_message());
    }

    form.save(&args.file)?;
    info!("Saved {}", args.file.display());

    let address = form.address(args.target);
    println!(
        "{} Filled {} address: {}",
        style("✓").green(),
        args.target,
        address.format()
    );
    if !address.phone_number.is_empty() {
        println!("  Tel: {}", address.phone_number);
    }

    Ok(())
}
