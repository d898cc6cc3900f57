//! ratewatch - live currency conversion over a streaming ticker feed.
//!
//! Connects to the multiplexed ticker channel, keeps the per-currency
//! rate cache warm, and recomputes conversion outputs whenever the
//! selected rate or the user's input changes. Stdin stands in for the
//! presentation layer:
//!
//! ```text
//! select EUR    choose the target currency
//! ref 2         set the reference-asset amount
//! ccy 50000     set the target-currency amount
//! ```

use anyhow::Result;
use clap::Parser;
use ratewatch_app::{AppConfig, Application, UserEvent};
use ratewatch_core::Currency;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Live currency conversion over a streaming ticker feed
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RATEWATCH_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    ratewatch_ws::init_crypto();

    let args = Args::parse();

    ratewatch_app::logging::init_logging()?;

    info!("Starting ratewatch v{}", env!("CARGO_PKG_VERSION"));

    let config = match args.config {
        Some(path) => AppConfig::from_file(&path)?,
        None => AppConfig::load()?,
    };
    info!(ws_url = %config.ws_url, mode = ?config.mode, "Configuration loaded");

    let (user_tx, user_rx) = mpsc::channel(64);
    tokio::spawn(read_user_commands(user_tx));

    let app = Application::new(config);
    app.run(user_rx).await?;

    Ok(())
}

/// Translate stdin lines into user events.
async fn read_user_commands(user_tx: mpsc::Sender<UserEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let event = match parse_command(&line) {
            Some(event) => event,
            None => {
                warn!(line = %line.trim(), "Unrecognized command (use: select <CCY> | ref <amt> | ccy <amt>)");
                continue;
            }
        };
        if user_tx.send(event).await.is_err() {
            break;
        }
    }
}

fn parse_command(line: &str) -> Option<UserEvent> {
    let (command, rest) = line.trim().split_once(' ')?;
    match command {
        "select" => {
            let currency: Currency = rest.trim().parse().ok()?;
            Some(UserEvent::CurrencySelected(currency))
        }
        "ref" => Some(UserEvent::ReferenceInput(rest.trim().to_string())),
        "ccy" => Some(UserEvent::TargetInput(rest.trim().to_string())),
        _ => None,
    }
}
