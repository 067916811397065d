mod bootstrap;

use {
    anyhow::{Context, bail},
    clap::Parser,
    palaver_config::loader,
    palaver_relay::Relay,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "palaver", about = "Palaver — chat message relay")]
struct Cli {
    /// Path to the relay configuration file.
    #[arg(short, long, default_value = "config.ini")]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Validate the configuration, print the resolved endpoints as JSON,
    /// and exit without connecting anywhere.
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn init_telemetry(cli: &Cli) {
    // RUST_LOG wins over --log-level when set.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    let sections = loader::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let types = bootstrap::connector_types();

    if cli.check {
        // Secrets serialize redacted, so the dump is safe to paste around.
        let configs = bootstrap::parse_all(&sections, &types);
        println!("{}", serde_json::to_string_pretty(&configs)?);
        return Ok(());
    }

    info!(version = env!("CARGO_PKG_VERSION"), "palaver starting");

    let relay = Relay::new();
    let started = bootstrap::start_endpoints(&relay, &types, &sections).await;
    if started == 0 {
        bail!("no endpoints started, check the configuration");
    }

    info!(endpoints = started, "relay running, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("shutting down");
    relay.shutdown().await;
    Ok(())
}
