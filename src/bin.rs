//! Binary entry point for `snipeit-bot`.
//!
//! This module provides the command-line interface for snipeit-bot with options
//! for the settings file path and logging verbosity. It initializes logging,
//! loads configuration, and starts the service.

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing::error;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};
use snipeit_bot::base::{config::Config, types::Void};

/// Snipeit-bot looks up Snipe-IT assets from Slack.
///
/// Configuration comes from `settings.conf` (INI, with `[slack]` and
/// `[snipe-it]` sections), `.hidden/config.toml`, or environment variables
/// prefixed with `SNIPEIT_BOT_`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Override the settings file path (optional).
    ///
    /// By default, the bot will look for `settings.conf` in the current
    /// directory, then `.hidden/config.toml`.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// - No flag: DEBUG level
    /// - -v or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans over OTLP/HTTP (configured through the standard `OTEL_*` variables).
    #[arg(long)]
    otlp: bool,
}

/// Main entry point for the snipeit-bot binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the bot.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("snipeit-bot");
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    // A missing or incomplete settings file is fatal.
    let config = Config::load(args.config.as_deref()).inspect_err(|e| error!("Failed to load configuration: {:#}", e))?;

    snipeit_bot::start(config).await
}
