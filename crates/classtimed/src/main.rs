//! classtimed - The classtime background service
//!
//! This is the main entry point for the classtimed service.
//! It wires together all the components:
//! - Configuration loading
//! - Session list loading
//! - Countdown hub and event bus
//! - Tick loop and signal handling

mod sessions;

use anyhow::{Context, Result};
use clap::Parser;
use classtime_api::{HubEvent, Locale};
use classtime_config::{load_config, Policy};
use classtime_core::{localize_digits, CountdownEngine, CountdownHub, EventBus};
use classtime_util::{
    default_config_path, default_sessions_path, format_datetime_full, is_mock_time_active,
};
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::sessions::load_sessions;

/// classtimed - Session countdowns and reminders
#[derive(Parser, Debug)]
#[command(name = "classtimed")]
#[command(about = "Session countdowns and reminders for tutoring sessions", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/classtime/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Sessions file, TOML or JSON (or set CLASSTIME_SESSIONS env var)
    #[arg(short, long, env = "CLASSTIME_SESSIONS")]
    sessions: Option<PathBuf>,

    /// Display locale override (ar or en)
    #[arg(long)]
    locale: Option<Locale>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Evaluate every session once, print it and exit
    #[arg(long)]
    once: bool,
}

fn load_policy(args: &Args) -> Result<Policy> {
    let mut policy = if args.config.exists() {
        let policy = load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;
        info!(
            config_path = %args.config.display(),
            reminder_count = policy.reminders.len(),
            "Configuration loaded"
        );
        policy
    } else {
        warn!(
            config_path = %args.config.display(),
            "Config file not found, using defaults"
        );
        Policy::default()
    };

    if let Some(locale) = args.locale {
        policy.service.locale = locale;
    }

    Ok(policy)
}

fn build_hub(args: &Args, policy: &Policy) -> Result<CountdownHub> {
    let sessions_path = args
        .sessions
        .clone()
        .or_else(|| policy.service.sessions_file.clone())
        .unwrap_or_else(default_sessions_path);

    let sessions = load_sessions(&sessions_path)?;
    info!(
        sessions_path = %sessions_path.display(),
        session_count = sessions.len(),
        "Sessions loaded"
    );

    let mut hub = CountdownHub::new(CountdownEngine::from_policy(policy), EventBus::default());
    for session in sessions {
        hub.subscribe_as(session.id, session.label, session.schedule);
    }

    Ok(hub)
}

/// One line per session: id, label, status, DD:HH:MM:SS, display text
fn print_once(hub: &CountdownHub) {
    let now = classtime_util::now();
    let locale = hub.locale();
    for (session_id, label, snapshot) in hub.evaluate_all(&now) {
        let clock = localize_digits(&snapshot.countdown.padded().join(":"), locale);
        let text = hub.engine().render(&snapshot);
        println!(
            "{}\t{}\t{}\t{}\t{}",
            session_id, label, snapshot.status, clock, text
        );
    }
}

/// Log what the hub publishes. Countdowns are only interesting at debug.
async fn log_events(mut rx: broadcast::Receiver<HubEvent>, locale: Locale) {
    loop {
        match rx.recv().await {
            Ok(HubEvent::ReminderDue {
                session_id,
                label,
                offset,
                start_delta_ms,
            }) => {
                info!(
                    session_id = %session_id,
                    label = %label,
                    offset = %offset.name,
                    starts_in_secs = start_delta_ms / 1000,
                    "Reminder"
                );
            }
            Ok(HubEvent::StatusChanged {
                session_id,
                from,
                to,
            }) => {
                info!(session_id = %session_id, from = %from, to = %to, "Status changed");
            }
            Ok(HubEvent::SessionCompleted { session_id }) => {
                info!(session_id = %session_id, "Session completed");
            }
            Ok(HubEvent::Countdown {
                session_id,
                snapshot,
            }) => {
                debug!(
                    session_id = %session_id,
                    status = %snapshot.status,
                    text = %classtime_core::render(&snapshot, locale),
                    "Countdown"
                );
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Event logger fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let policy = load_policy(&args)?;
    let mut hub = build_hub(&args, &policy)?;

    if args.once {
        print_once(&hub);
        return Ok(());
    }

    let logger = tokio::spawn(log_events(hub.bus().subscribe(), hub.locale()));

    // Set up signal handlers
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

    info!(
        tick_ms = u64::try_from(policy.service.tick_interval.as_millis()).unwrap_or(u64::MAX),
        locale = %policy.service.locale,
        "Service running"
    );

    hub.run(policy.service.tick_interval, classtime_util::now, async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
            _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully"),
        }
    })
    .await;

    // Dropping the hub closes the bus, which ends the logger.
    drop(hub);
    if let Err(e) = logger.await {
        warn!(error = %e, "Event logger task failed");
    }

    info!("Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        clock = %format_datetime_full(&classtime_util::now()),
        mock_time = is_mock_time_active(),
        "classtimed starting"
    );

    run(args).await
}
