//! platdemo - Main Binary
//!
//! Provisions and exercises scoped authorizations on a time-series platform.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use platdemo_cli::demo::{WriteOptions, DOWNSAMPLE_START, READ_IN_START, READ_OUT_START};
use platdemo_cli::flux::parse_duration;
use platdemo_cli::{Demo, DemoConfig, Namespace};
use platdemo_client::{ClientConfig, HttpPlatform};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

/// platdemo CLI
#[derive(Parser)]
#[command(name = "platdemo")]
#[command(about = "Provision and exercise scoped authorizations on a time-series platform")]
#[command(version)]
#[command(after_help = "Typical workflow:\n  \
    platdemo <ns> bootstrap\n  \
    platdemo <ns> write            (leave running, Ctrl-C to stop)\n  \
    platdemo <ns> read-in\n  \
    platdemo <ns> downsample-once\n  \
    platdemo <ns> read-out\n  \
    platdemo <ns> destroy")]
struct Cli {
    /// Platform API endpoint (overrides config)
    #[arg(long, env = "PLATDEMO_API")]
    api: Option<String>,

    /// Token with rights to manage users, orgs, buckets and authorizations
    #[arg(long, env = "BOOTSTRAP_TOKEN", hide_env_values = true)]
    token: String,

    /// Path to configuration file
    #[arg(short, long, env = "PLATDEMO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suffix scoping every demo resource name
    namespace: Namespace,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the user, org, buckets and authorizations
    Bootstrap,

    /// Show the namespace's resources and authorizations
    List,

    /// Write points into the input bucket
    Write {
        /// Stop after this many points
        #[arg(long)]
        count: Option<u64>,

        /// Pause between points (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Query the input bucket
    ReadIn {
        /// Range start
        #[arg(long, default_value = READ_IN_START, value_parser = parse_duration, allow_hyphen_values = true)]
        start: String,
    },

    /// Query the output bucket
    ReadOut {
        /// Range start
        #[arg(long, default_value = READ_OUT_START, value_parser = parse_duration, allow_hyphen_values = true)]
        start: String,
    },

    /// Copy the latest input points into the output bucket
    DownsampleOnce,

    /// Schedule a task that downsamples continuously
    CreateTask,

    /// Delete everything the namespace owns
    Destroy,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = match &cli.config {
        Some(path) => {
            let config = DemoConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => DemoConfig::default(),
    };

    // Apply CLI overrides
    if let Some(api) = cli.api {
        config.api.endpoint = api;
    }
    if let Command::Write {
        interval_ms: Some(interval_ms),
        ..
    } = &cli.command
    {
        config.write.interval_ms = *interval_ms;
    }

    // Validate configuration
    config.validate()?;

    let client_config = ClientConfig::new(&config.api.endpoint, cli.token)
        .context("Invalid API settings")?
        .with_user_agent(config.api.user_agent.clone())
        .with_timeout(config.timeout());
    let platform = HttpPlatform::new(&client_config).context("Failed to build HTTP client")?;
    info!("Using platform at {}", client_config.endpoint());

    let demo = Demo::new(platform, cli.namespace, config);

    match cli.command {
        Command::Bootstrap => {
            demo.bootstrap().await?;
        }
        Command::List => {
            demo.list().await;
        }
        Command::Write { count, .. } => {
            let options = WriteOptions {
                count,
                interval: demo.config().write_interval(),
            };
            demo.write(options, shutdown_signal()).await?;
        }
        Command::ReadIn { start } => {
            print!("{}", demo.read_in(&start).await?);
        }
        Command::ReadOut { start } => {
            print!("{}", demo.read_out(&start).await?);
        }
        Command::DownsampleOnce => {
            info!("Downsampling from {}", DOWNSAMPLE_START);
            print!("{}", demo.downsample_once().await?);
        }
        Command::CreateTask => {
            demo.create_task().await?;
        }
        Command::Destroy => {
            demo.destroy().await;
        }
    }

    Ok(())
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await
    }
}
