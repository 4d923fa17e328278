//! # Swell Watch Scheduler
//!
//! This binary plays the external scheduler and persistence collaborator around the
//! library: it loads a JSON snapshot of ingested readings and subscriptions, scores
//! every spot, runs one alert cycle, logs the notifications a transport would send,
//! and writes the updated subscription state and send log back.
//!
//! Usage:
//!   swell-watch [--config PATH] [--snapshot PATH] [--once]
//!
//! Without `--once` the cycle repeats every `scheduler.interval_minutes` until
//! interrupted.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use chrono::{DateTime, Utc};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use swell_watch_lib::alert::{run_alert_cycle, AlertContext};
use swell_watch_lib::config::{Config, CONFIG_FILE};
use swell_watch_lib::current::current_conditions;
use swell_watch_lib::ephemeris::Ephemeris;
use swell_watch_lib::scoring::{score_all, SpotTimelines};
use swell_watch_lib::snapshot::Snapshot;
use swell_watch_lib::spots::SpotRegistry;

/// Command line options.
struct Args {
    config: PathBuf,
    snapshot: Option<PathBuf>,
    once: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: PathBuf::from(CONFIG_FILE),
        snapshot: None,
        once: false,
    };

    let mut raw = env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--once" => args.once = true,
            "--config" => {
                args.config = raw.next().context("--config needs a path")?.into();
            }
            "--snapshot" => {
                args.snapshot = Some(raw.next().context("--snapshot needs a path")?.into());
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

/// Log what each spot looks like right now.
fn log_current(
    config: &Config,
    registry: &SpotRegistry,
    timelines: &SpotTimelines,
    ephemeris: &mut Ephemeris,
    now: DateTime<Utc>,
) {
    for spot in registry.iter() {
        let timeline = timelines.get(&spot.id).map_or(&[][..], Vec::as_slice);
        let current = current_conditions(timeline, now, config.engine.current_max_age(), None, None);
        let light = ephemeris.light_phase_at(spot.latitude, spot.longitude, now);
        debug!(
            spot_id = %spot.id,
            source = ?current.source,
            score = current.score,
            wave_height_ft = ?current.wave_height_ft,
            light = ?light,
            "current conditions"
        );
    }
}

/// Load, score, evaluate and persist one cycle.
fn run_cycle(
    config: &Config,
    registry: &SpotRegistry,
    ephemeris: &mut Ephemeris,
    snapshot_path: &Path,
) -> anyhow::Result<()> {
    let mut snapshot = Snapshot::load(snapshot_path)
        .with_context(|| format!("loading snapshot {}", snapshot_path.display()))?;

    let now = Utc::now();
    let timelines = score_all(&snapshot.readings, registry);
    log_current(config, registry, &timelines, ephemeris, now);

    let ctx = AlertContext {
        timelines: &timelines,
        registry,
        now,
        max_gap: config.engine.window_max_gap(),
    };

    let mut send_log = snapshot.send_log();
    let report = run_alert_cycle(&snapshot.subscriptions, &ctx, &mut send_log);

    // Transport is someone else's job; hand off by logging the payload
    for notification in &report.notifications {
        info!(
            subscription_id = %notification.subscription_id,
            owner_id = %notification.owner_id,
            email = notification.channels.email,
            sms = notification.channels.sms,
            push = notification.channels.push,
            "{}",
            notification.summary()
        );
    }

    snapshot.absorb(&report, &send_log);
    snapshot
        .save(snapshot_path)
        .with_context(|| format!("saving snapshot {}", snapshot_path.display()))?;
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = Config::load_from_path(&args.config);
    let registry = config
        .spot_registry()
        .context("invalid spot profile in configuration")?;
    let snapshot_path = args
        .snapshot
        .unwrap_or_else(|| PathBuf::from(&config.scheduler.snapshot_path));
    let mut ephemeris = Ephemeris::new(
        config.ephemeris.cache_capacity,
        config.ephemeris.coordinate_precision,
    );

    info!(
        spots = registry.len(),
        snapshot = %snapshot_path.display(),
        "starting swell watch"
    );

    if args.once {
        return run_cycle(&config, &registry, &mut ephemeris, &snapshot_path);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let period = std::time::Duration::from_secs(config.scheduler.interval_minutes.max(1) * 60);
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // A failed cycle is retried on the next tick
                    if let Err(e) = run_cycle(&config, &registry, &mut ephemeris, &snapshot_path) {
                        error!(error = %format!("{e:#}"), "alert cycle failed");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutting down");
                    break;
                }
            }
        }
    });

    Ok(())
}
