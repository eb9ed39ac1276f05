mod config;
mod error;

use std::io::{self, Read};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hook::{IdleHandler, Outcome};
use notifier::{DesktopNotifier, preview};
use opencode::{Event, OpencodeClient};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "idle-notify")]
#[command(about = "Desktop notifications when OpenCode sessions go idle", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to $XDG_CONFIG_HOME/idle-notify/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// OpenCode server URL, overriding the config file
    #[arg(short, long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a single event given as JSON
    Handle {
        /// Event JSON; read from stdin when omitted
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Follow the server's event stream and notify on every idle session
    Watch,
    /// Print the notification preview for text read from stdin
    Preview {
        /// Maximum number of words (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<NonZeroUsize>,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Handle { event } => cmd_handle(&config, cli.server.as_deref(), event).await,
        Commands::Watch => cmd_watch(&config, cli.server.as_deref()).await,
        Commands::Preview { limit } => cmd_preview(&config, limit),
    }
}

fn build_handler(
    config: &Config,
    server: Option<&str>,
) -> Result<(OpencodeClient, IdleHandler<OpencodeClient, DesktopNotifier>)> {
    let client = config.client(server)?;
    let handler =
        IdleHandler::new(client.clone(), config.notifier()).with_options(config.handler_options()?);
    Ok((client, handler))
}

async fn cmd_handle(config: &Config, server: Option<&str>, event: Option<String>) -> Result<()> {
    let json = match event {
        Some(json) => json,
        None => io::read_to_string(io::stdin())?,
    };
    let event = Event::from_json(&json)?;

    let (_, handler) = build_handler(config, server)?;
    let outcome = handler.handle(&event).await?;
    debug!(?outcome, "event handled");
    Ok(())
}

async fn cmd_watch(config: &Config, server: Option<&str>) -> Result<()> {
    let (client, handler) = build_handler(config, server)?;
    let mut events = client.events().await?;
    info!(server = %client, "watching for idle sessions");

    loop {
        let event = tokio::select! {
            event = events.next_event() => event?,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                return Ok(());
            }
        };

        let Some(event) = event else {
            info!("event stream closed");
            return Ok(());
        };

        match handler.handle(&event).await {
            Ok(Outcome::Ignored) => {}
            Ok(outcome) => debug!(?outcome, "event handled"),
            Err(e) => warn!(error = %e, "notification failed"),
        }
    }
}

fn cmd_preview(config: &Config, limit: Option<NonZeroUsize>) -> Result<()> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;

    let limit = match limit {
        Some(limit) => limit,
        None => config.word_limit()?,
    };
    println!("{}", preview::extract_preview(&text, limit));
    Ok(())
}
