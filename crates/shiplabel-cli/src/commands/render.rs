//! Render command - lay out a label for printing.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, warn};

use shiplabel_core::{FormState, LabelRenderer};

use super::load_config;

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Label file
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: RenderFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Barcode seed, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum RenderFormat {
    /// Printable 4x6 HTML page
    Html,
    /// Plain text preview
    Text,
    /// Laid-out label as JSON
    Json,
}

pub fn run(args: RenderArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let form = FormState::load(&args.file, config.package.clone())?;
    let label = form.label_data();

    for issue in label.missing_fields() {
        warn!("{}", issue);
    }

    let renderer = LabelRenderer::from_config(&config.render);
    let rendered = match args.seed {
        Some(seed) => renderer.render(&label, seed),
        None => renderer.render_fresh(&label),
    };

    let output = match args.format {
        RenderFormat::Html => rendered.to_html(),
        RenderFormat::Text => rendered.to_text(),
        RenderFormat::Json => format!("{}\n", serde_json::to_string_pretty(&rendered)?),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        debug!("Wrote {} bytes", output.len());
        println!(
            "{} Label written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    Ok(())
}
