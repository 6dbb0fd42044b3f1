use anyhow::{Context, Result};
use reelplay::engine::MockMediaEngine;
use reelplay::input::{load_script, ScriptedEvent};
use reelplay::settings::Settings;
use reelplay::PlaybackInteractionController;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: reelplay <script.csv|script.json> [duration_ms]";
const DEFAULT_DURATION_MS: i64 = 15_000;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let script_path = args.next().context(USAGE)?;
    let duration_ms = match args.next() {
        Some(value) => value
            .parse::<i64>()
            .with_context(|| format!("Invalid duration {:?}\n{}", value, USAGE))?,
        None => DEFAULT_DURATION_MS,
    };

    let settings = Settings::load();
    let events = load_script(&script_path)?;
    info!("Loaded {} events from {}", events.len(), script_path);

    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(run_session(&settings, &script_path, events, duration_ms))
}

/// Replay `events` against a mock engine on the real clock
async fn run_session(
    settings: &Settings,
    uri: &str,
    events: Vec<ScriptedEvent>,
    duration_ms: i64,
) -> Result<()> {
    let config = settings.playback.clone();
    let engine = MockMediaEngine::new("mock0", duration_ms);

    let mut controller = PlaybackInteractionController::new(config.clone());
    controller
        .mount(Box::new(engine), config.media_source(uri))
        .await
        .context("Failed to mount mock engine")?;

    let start = Instant::now();
    for ScriptedEvent { at_ms, event } in events {
        tokio::time::sleep_until(start + Duration::from_millis(at_ms)).await;
        controller.dispatch(event);

        let snap = controller.snapshot();
        info!(
            "[{:>6} ms] {:?} -> {}/{} ms playing={} overlay={:?}",
            at_ms,
            event,
            snap.progress.position_ms,
            snap.progress.duration_ms,
            snap.progress.is_playing,
            snap.overlay,
        );
    }

    // Let the last overlay expire and one more poll land
    tokio::time::sleep(config.overlay_clear() + config.poll_interval()).await;

    let snap = controller.snapshot();
    controller.unmount();
    println!("{}", serde_json::to_string_pretty(&snap)?);

    Ok(())
}
