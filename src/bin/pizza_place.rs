// Copyright 2025 Cowboy AI, LLC.

//! Pizzeria server entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use pizza_place::{PizzaPlace, ServiceConfig, WireMode};

/// Open the Pizza Place and wait for customers
#[derive(Debug, Parser)]
#[command(name = "pizza-place", version, about)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 9999)]
    port: u16,

    /// How order replies are sent: "inline" or "reference"
    #[arg(long, default_value_t = WireMode::Reference)]
    wire_mode: WireMode,

    /// Serve from a catalog JSON file instead of the built-in ontology
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServiceConfig {
        host: args.host,
        port: args.port,
        wire_mode: args.wire_mode,
        catalog_path: args.catalog,
        ..ServiceConfig::default()
    };

    println!("Opening Pizza Place ...");
    let place = PizzaPlace::open(config).context("failed to load the pizza ontology")?;
    info!(pizzas = place.ontology().menu().len(), "Ontology loaded");
    for (class, members) in place.ontology().classification() {
        debug!(%class, members = members.len(), "Classified");
    }

    let listener = match place.bind().await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%err, "Giving up on the listener");
            println!("Could not open pizza place. Exiting");
            std::process::exit(1);
        }
    };

    println!("Pizza Place is open and waiting for customers");
    info!(
        addr = %place.config().addr(),
        mode = %place.config().wire_mode,
        "Pizza Place is open"
    );
    place.serve(listener).await?;
    Ok(())
}
