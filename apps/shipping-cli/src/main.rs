//! ship-batch
//!
//! Turns a storefront order export into label sheets and a bill of lading.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shipping_core::{resolve_input, ShippingConfig, ShippingError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ship-batch")]
#[command(version, about = "Print shipping labels and a bill of lading for an order export")]
struct Args {
    /// Order export CSV. Defaults to the newest orders_export*.csv in downloads
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout is left for the summary
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => ShippingConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ShippingConfig::default(),
    };

    let input = match resolve_input(args.input.as_deref(), &config.batch) {
        Ok(path) => path,
        Err(e @ ShippingError::NoInput(_)) => {
            eprintln!("{}", e);
            eprintln!("Usage: ship-batch ORDERS_CSV_PATH");
            std::process::exit(1);
        }
        Err(e @ ShippingError::InputNotFound(_)) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let report = shipping_cli::run_batch(&config, &input)?;

    for format in &report.formats {
        println!("{}: {} labels -> {}", format.name, format.labels, format.output.display());
    }
    println!(
        "bill of lading: {} boxes, {} cargo lines -> {}",
        report.manifest.boxes,
        report.manifest.cargo.len(),
        report.bol.display()
    );

    Ok(())
}
