//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: configuration and types
//! - Infrastructure: Matrix transport, HTTP probes
//! - Application: router, aggregator, formatter

#![recursion_limit = "256"]

mod application;
mod domain;
mod infrastructure;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::aggregator::RegionAggregator;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::types::InboundEvent;
use crate::infrastructure::http::HttpProbe;
use crate::infrastructure::matrix::MatrixService;

#[derive(Parser, Debug)]
#[command(name = "lookout", about = "Deployment status bot for Matrix rooms")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config_content = fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read {}", cli.config))?;
    let config: AppConfig =
        serde_yaml::from_str(&config_content).context("Failed to parse configuration")?;

    // 2. Logging Setup
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = std::path::Path::new("data/session.log");
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting Lookout...");

    // 3. Initialize the aggregation pipeline
    let probe = Arc::new(HttpProbe::new(Duration::from_secs(
        config.query.timeout_secs,
    ))?);
    let cancel = CancellationToken::new();
    let router = Arc::new(CommandRouter::new(
        config.clone(),
        RegionAggregator::new(&config, probe),
        cancel.clone(),
    ));

    // 4. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("Logged in as {}", config.services.matrix.username);

    // 5. Event Loop
    let start_time = std::time::SystemTime::now();
    let bot_name = config
        .services
        .matrix
        .display_name
        .clone()
        .unwrap_or_else(|| config.services.matrix.username.clone());

    let loop_router = router.clone();
    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = loop_router.clone();
        let bot_name = bot_name.clone();

        async move {
            if let Some(original_msg) = ev.as_original() {
                // Ignore events older than start_time
                let ts = ev.origin_server_ts();
                let event_time =
                    std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
                if event_time < start_time {
                    return;
                }

                if let matrix_sdk::ruma::events::room::message::MessageType::Text(text_content) =
                    &original_msg.content.msgtype
                {
                    if original_msg.sender == room.own_user_id() {
                        return;
                    }

                    let event = InboundEvent::classify(
                        &text_content.body,
                        original_msg.sender.as_str(),
                        &bot_name,
                    );

                    match event {
                        InboundEvent::Mention { text, sender } => {
                            tracing::info!("Received mention from {sender}: {text}");
                            let chat = MatrixService::new(room);
                            // One failed command must never take the dispatch
                            // loop down with it.
                            if let Err(e) = router.route(&chat, &text, &sender).await {
                                tracing::error!("Failed to route message: {e:#}");
                            }
                        }
                        InboundEvent::Other => {}
                    }
                }
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            let _ = room.join().await;
        }
    });

    // 6. Start Loops
    let sync_client = client.clone();
    let sync_handle = tokio::spawn(async move { sync_client.sync(SyncSettings::default()).await });

    tokio::select! {
        result = sync_handle => {
            if let Err(e) = result {
                tracing::error!("Matrix Sync Panic: {e}");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down, aborting in-flight aggregations");
            cancel.cancel();
        }
    }

    Ok(())
}
