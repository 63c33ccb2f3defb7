// Copyright 2025 Cowboy AI, LLC.

//! Customer client entry point

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pizza_place::{Customer, CustomerConfig};

/// Chat with the Pizza Place from your terminal
#[derive(Debug, Parser)]
#[command(name = "customer", version, about)]
struct Args {
    /// Host the pizzeria is expected on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port the pizzeria is expected on
    #[arg(long, default_value_t = 9999)]
    port: u16,

    /// Resolve pizzas from a catalog JSON file instead of the built-in
    /// ontology
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quiet by default so log lines do not interleave with the prompt
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = CustomerConfig {
        host: args.host,
        port: args.port,
        catalog_path: args.catalog,
        ..CustomerConfig::default()
    };

    println!("Looking for an open pizzeria...");
    let mut customer = match Customer::connect(&config).await {
        Ok(customer) => customer,
        Err(err) if err.is_unreachable() => {
            println!("Could not find an open pizzeria.");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    let welcome = customer.greet().await?;
    println!("{welcome}");
    customer.run_repl().await?;
    Ok(())
}
