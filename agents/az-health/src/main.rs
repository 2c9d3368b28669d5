//! AZ Health - availability zone health checks from the command line
//!
//! Runs one health check per invocation against a provider snapshot and
//! prints the invocation response as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use azhealth_config::{Config, LogFormat};
use azhealth_lookup::source::snapshot;
use azhealth_lookup::{HealthCheckHandler, HealthCheckRequest, InvocationResponse, MemorySource};

/// AZ Health - report whether an availability zone is healthy
#[derive(Parser, Debug)]
#[command(name = "az-health")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config", env = "AZ_HEALTH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Provider snapshot file (overrides the configuration)
    #[arg(long = "snapshot", env = "AZ_HEALTH_SNAPSHOT", global = true)]
    snapshot: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long = "verbose", global = true)]
    verbose: bool,

    /// Log format: pretty or json
    #[arg(long = "log-format", global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check one availability zone
    Check {
        /// Availability zone name, e.g. us-east-1a
        availability_zone: String,

        /// Region; inferred from the zone name when omitted
        #[arg(short = 'r', long = "region")]
        region: Option<String>,
    },
    /// Invoke with a raw JSON request payload
    Invoke {
        /// Payload file; read from stdin when omitted
        #[arg(short = 'e', long = "event")]
        event: Option<PathBuf>,
    },
    /// Validate configuration and exit
    Test,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Test => test_config(cli.config.as_deref(), &config).await,
        Commands::Check {
            availability_zone,
            region,
        } => {
            let mut request = HealthCheckRequest::new(availability_zone);
            request.region = region;

            let handler = build_handler(&config).await?;
            emit(&handler.invoke(request).await)
        }
        Commands::Invoke { event } => {
            let payload = read_payload(event.as_deref()).await?;

            let handler = build_handler(&config).await?;
            emit(&handler.invoke_payload(&payload).await)
        }
    }
}

/// Load the configuration file (or defaults), apply command-line
/// overrides, then validate the result.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(ref path) = cli.snapshot {
        config.sources.snapshot = Some(path.clone());
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &Config, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Build the handler over the configured snapshot.
async fn build_handler(config: &Config) -> Result<HealthCheckHandler> {
    let provider = match &config.sources.snapshot {
        Some(path) => {
            info!(path = %path.display(), "Loading provider snapshot");
            snapshot::load(path)
                .await
                .with_context(|| format!("Failed to load provider snapshot {}", path.display()))?
        }
        None => {
            warn!("No provider snapshot configured; every zone will be reported as not found");
            MemorySource::new()
        }
    };

    Ok(HealthCheckHandler::new(Arc::new(provider))
        .with_max_pages(config.health_events.max_pages))
}

async fn read_payload(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Reading request payload");
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read payload file {}", path.display()))
        }
        None => {
            debug!("Reading request payload from stdin");
            let mut payload = String::new();
            tokio::io::stdin()
                .read_to_string(&mut payload)
                .await
                .context("Failed to read payload from stdin")?;
            Ok(payload)
        }
    }
}

/// Print the response and map it to the process exit status.
fn emit(response: &InvocationResponse) -> Result<ExitCode> {
    let rendered =
        serde_json::to_string_pretty(response).context("Failed to serialize response")?;
    println!("{rendered}");

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Validate configuration, report lint warnings and check the snapshot parses.
async fn test_config(path: Option<&Path>, config: &Config) -> Result<ExitCode> {
    match path {
        Some(path) => info!("Testing configuration file: {}", path.display()),
        None => info!("Testing default configuration"),
    }

    config.validate().context("Configuration validation failed")?;

    let warnings = config.lint();
    for warning in &warnings {
        warn!("{}", warning);
    }

    if let Some(ref snapshot_path) = config.sources.snapshot {
        snapshot::load(snapshot_path)
            .await
            .with_context(|| format!("Failed to load provider snapshot {}", snapshot_path.display()))?;
    }

    info!("Configuration test successful:");
    info!("  - snapshot: {}", describe_snapshot(config));
    info!("  - max pages: {}", config.health_events.max_pages);
    info!("  - {} warning(s)", warnings.len());

    println!(
        "az-health: configuration {} test is successful",
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string())
    );

    Ok(ExitCode::SUCCESS)
}

fn describe_snapshot(config: &Config) -> String {
    config
        .sources
        .snapshot
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string())
}
