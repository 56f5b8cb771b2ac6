//! Label file commands - start, inspect and edit a label session.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::info;

use shiplabel_core::{Address, AddressField, AddressTarget, FormState, ServiceType, WeightUnit};

use super::{check_api_key, load_config};

/// Arguments for the new command.
#[derive(Args)]
pub struct NewArgs {
    /// Output label file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Label file
    file: PathBuf,

    /// Print the raw JSON instead of a summary
    #[arg(long)]
    json: bool,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Label file
    file: PathBuf,

    /// Which address to edit (sender or receiver)
    target: AddressTarget,

    /// Field name (fullName, street, city, state, country, phone)
    field: AddressField,

    /// New value
    value: String,
}

/// Arguments for the package command.
#[derive(Args)]
pub struct PackageArgs {
    /// Label file
    file: PathBuf,

    /// Weight as typed; text that is not a number becomes 0
    #[arg(short, long, allow_hyphen_values = true)]
    weight: Option<String>,

    /// Weight unit (lbs or kg)
    #[arg(short, long)]
    unit: Option<WeightUnit>,

    /// Dimensions, e.g. 12x8x4
    #[arg(short, long)]
    dimensions: Option<String>,

    /// Service level (STANDARD, PRIORITY or EXPRESS)
    #[arg(short, long)]
    service: Option<ServiceType>,

    /// Ship date (YYYY-MM-DD)
    #[arg(long)]
    ship_date: Option<NaiveDate>,
}

/// Arguments for the reset command.
#[derive(Args)]
pub struct ResetArgs {
    /// Label file
    file: PathBuf,
}

pub fn new(args: NewArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    check_api_key(&config);

    let form = FormState::start(config.package.clone());

    match &args.output {
        Some(path) => {
            if path.exists() && !args.force {
                anyhow::bail!(
                    "Label file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            form.save(path)?;
            println!(
                "{} Created label {} at {}",
                style("✓").green(),
                form.package().tracking_number,
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&form)?),
    }

    Ok(())
}

pub fn show(args: ShowArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let form = FormState::load(&args.file, config.package)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }

    let label = form.label_data();
    let package = &label.package;

    println!("{}", style("Sender").bold());
    print_address(&label.sender);
    println!("{}", style("Receiver").bold());
    print_address(&label.receiver);

    println!("{}", style("Package").bold());
    println!("  Weight:     {} {}", package.weight, package.weight_unit);
    println!("  Dimensions: {}", package.dimensions);
    println!(
        "  Service:    {} ({})",
        package.service_type,
        package.service_type.letter()
    );
    println!("  Tracking #: {}", package.tracking_number);
    println!("  Ship date:  {}", package.ship_date);

    let issues = label.missing_fields();
    if !issues.is_empty() {
        println!();
        println!("{}", style("Warnings:").yellow());
        for issue in &issues {
            println!("  - {}", issue);
        }
    }

    Ok(())
}

fn print_address(address: &Address) {
    if address.is_empty() {
        println!("  {}", style("(empty)").dim());
        return;
    }
    println!("  {}", address.format());
    if !address.phone_number.is_empty() {
        println!("  Tel: {}", address.phone_number);
    }
}

pub fn set(args: SetArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut form = FormState::load(&args.file, config.package)?;

    form.set_address_field(args.target, args.field, args.value.clone());
    form.save(&args.file)?;

    info!("Set {} {} in {}", args.target, args.field, args.file.display());
    println!(
        "{} Set {} {} = {:?}",
        style("✓").green(),
        args.target,
        args.field,
        args.value
    );

    Ok(())
}

pub fn package(args: PackageArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut form = FormState::load(&args.file, config.package)?;

    if let Some(weight) = &args.weight {
        form.set_weight_input(weight);
    }
    if let Some(unit) = args.unit {
        form.set_weight_unit(unit);
    }
    if let Some(dimensions) = args.dimensions {
        form.set_dimensions(dimensions);
    }
    if let Some(service) = args.service {
        form.set_service_type(service);
    }
    if let Some(date) = args.ship_date {
        form.set_ship_date(date);
    }

    form.save(&args.file)?;

    let package = form.package();
    println!(
        "{} Package: {} {}, {}, {}",
        style("✓").green(),
        package.weight,
        package.weight_unit,
        package.dimensions,
        package.service_type
    );

    Ok(())
}

pub fn reset(args: ResetArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut form = FormState::load(&args.file, config.package)?;

    form.reset();
    form.save(&args.file)?;

    println!(
        "{} Label reset, new tracking number {}",
        style("✓").green(),
        form.package().tracking_number
    );

    Ok(())
}
