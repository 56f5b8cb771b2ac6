//! CLI application for building and printing shipping labels.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{autofill, config, extract, label, render};

/// Shipping label generator - fill in addresses, autofill them with AI, print 4x6 labels
#[derive(Parser)]
#[command(name = "shiplabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new label session
    New(label::NewArgs),

    /// Show the contents of a label file
    Show(label::ShowArgs),

    /// Set one sender or receiver field
    Set(label::SetArgs),

    /// Edit package details
    Package(label::PackageArgs),

    /// Reset a label to its defaults with a new tracking number
    Reset(label::ResetArgs),

    /// Fill an address from pasted text using AI
    Autofill(autofill::AutofillArgs),

    /// Extract an address from text without touching a label
    Extract(extract::ExtractArgs),

    /// Render a label as printable HTML, text or JSON
    Render(render::RenderArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::New(args) => label::new(args, config_path),
        Commands::Show(args) => label::show(args, config_path),
        Commands::Set(args) => label::set(args, config_path),
        Commands::Package(args) => label::package(args, config_path),
        Commands::Reset(args) => label::reset(args, config_path),
        Commands::Autofill(args) => autofill::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Render(args) => render::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
