//! Adaptive Acceleration CLI
//!
//! Command-line interface for the Akamai Adaptive Acceleration reporting API.

use akamai_aa::cli::{
    handle_contracts, handle_measures, handle_reporting_groups, Cli, Commands, OutputFormat,
};
use akamai_aa::client::AaClient;
use akamai_aa::config::CliConfig;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.debug);

    let output_format = match config.output_format.as_str() {
        "table" => OutputFormat::Table,
        _ => OutputFormat::Json,
    };

    tracing::debug!(
        edgerc = %config.edgerc.display(),
        section = %config.section,
        timeout = config.timeout,
        "resolved configuration"
    );

    // The client is built before any command runs; nothing touches the
    // network if this fails.
    let client = match AaClient::from_edgerc(&config.edgerc, &config.section, config.timeout) {
        Ok(client) => client,
        Err(e) => {
            println!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing::debug!(base_url = %client.base_url(), "client ready");

    let result = match cli.command {
        Commands::Contracts { command } => handle_contracts(&client, command, &output_format).await,
        Commands::Measures(args) => handle_measures(&client, args, &output_format).await,
        Commands::ReportingGroups { command } => {
            handle_reporting_groups(&client, command, &output_format).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        if config.debug {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve configuration using the priority chain: defaults → file → env → CLI args
fn build_config(cli: &Cli) -> Result<CliConfig> {
    let mut builder = CliConfig::builder();

    if !cli.no_config {
        builder = builder.with_config_file(None)?;
    }

    builder = builder.with_env_overrides();

    if let Some(ref edgerc) = cli.config {
        builder = builder.with_edgerc(edgerc);
    }
    if let Some(ref section) = cli.section {
        builder = builder.with_section(section)?;
    }
    if let Some(ref format) = cli.format {
        let format_str = match format {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        };
        builder = builder.with_output_format(format_str)?;
    }
    if cli.debug {
        builder = builder.with_debug(true);
    }

    builder.build()
}

/// Initialize tracing subscriber for logging
fn init_tracing(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
