// Clippy configuration: enable pedantic but allow overly strict lints
#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::doc_markdown)] // Don't require backticks around JSON, TOML, etc.
#![allow(clippy::needless_pass_by_value)] // PathBuf by value is fine for config loading

//! Notification System CLI
//!
//! Drives the notification registry against the real desktop:
//!   notification-system send "Title" "Body" --hidden   # register + escalate
//!   notification-system demo -n 5                       # float self-test
//!   notification-system meta                            # plugin metadata
//!
//! Every published event is printed to stdout as one JSON line.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::Result;
use notification_system::config::SYSTEM_NAME;
use notification_system::host::{
    BroadcastEventBus, DesktopNative, HostEnvironment, NativeNotifications, TerminalWindow,
    TracingLog,
};
use notification_system::{
    registration_meta, NotificationConfig, NotificationOptions, NotificationRegistry, NotifyEvent,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get the log directory path
fn get_log_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("/tmp/notification-system/logs"),
        |dirs| dirs.cache_dir().join("notification-system").join("logs"),
    )
}

/// Wire the registry to the desktop, a broadcast bus and tracing
fn build_registry(
    config: &NotificationConfig,
    hidden: bool,
) -> Result<(NotificationRegistry, broadcast::Receiver<NotifyEvent>)> {
    let bus = Arc::new(BroadcastEventBus::new());
    let events = bus.subscribe();

    let native = config
        .desktop
        .enabled
        .then(|| Arc::new(DesktopNative::new(&config.desktop)) as Arc<dyn NativeNotifications>);

    let host = HostEnvironment {
        native,
        window: Arc::new(TerminalWindow::new(hidden || config.window.hidden)),
        events: bus,
        log: Arc::new(TracingLog::new(&config.guid, SYSTEM_NAME)),
    };

    let registry = NotificationRegistry::new(&config.guid, host)?;
    Ok((registry, events))
}

/// Print every event published so far as JSON lines
fn drain_events(events: &mut broadcast::Receiver<NotifyEvent>) -> Result<()> {
    loop {
        match events.try_recv() {
            Ok(event) => println!("{}", serde_json::to_string(&event)?),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event printer lagged behind");
            }
            Err(_) => return Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Setup file logging with rotation
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "notification-system.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let log_filter = format!("notification_system={}", cli.log_level);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(non_blocking),
        )
        .init();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(NotificationConfig::default_path);
    let config = NotificationConfig::load_from_path(config_path.clone());

    match cli.command {
        Commands::Send {
            title,
            body,
            tag,
            kind,
            float_time,
            hidden,
            wait,
        } => {
            let (registry, mut events) = build_registry(&config, hidden)?;

            let mut options = NotificationOptions::new().with_action(|entry| {
                println!("clicked: {}", entry.id());
                Ok(())
            });
            options.tag = tag;
            options.kind = kind.map(Into::into);
            if let Some(seconds) = float_time {
                options = options.with_float(seconds);
            }

            let id = registry.create(title, body, options).await?;
            drain_events(&mut events)?;
            println!("{id}");

            if wait > 0 {
                tokio::time::sleep(Duration::from_secs(wait)).await;
            }
        }
        Commands::Demo { count, hidden } => {
            let (registry, mut events) = build_registry(&config, hidden)?;

            let mut ids = Vec::with_capacity(count);
            for _ in 0..count {
                ids.push(registry.test_float_notification().await?);
            }
            println!("{} notifications registered", registry.get_list().len());

            if let Some(first) = ids.first() {
                registry.remove(first);
            }
            registry.clear_list();
            drain_events(&mut events)?;
        }
        Commands::Meta => {
            println!("{}", serde_json::to_string_pretty(&registration_meta())?);
        }
        Commands::Config { example, save } => {
            if example {
                print!("{}", NotificationConfig::example());
            } else if save {
                config.save_to_path(&config_path)?;
                println!("Saved to: {}", config_path.display());
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Commands::Completions { shell } => {
            cli::print_completions(shell);
        }
    }

    Ok(())
}
