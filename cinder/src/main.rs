//! # Cinder
//!
//! Runs the block physics engine on a generated demo world at a fixed tick
//! rate until interrupted.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use cinder_core::block;
use cinder_core::{Level, Physics, WorldEvents};
use cinder_utils::BlockId;
use tokio::select;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::config::CinderConfig;

mod config;
mod demo;

const DEFAULT_CONFIG_PATH: &str = "cinder_config.json5";

/// Blocks reported in the periodic summary.
const SUMMARY_BLOCKS: [(&str, BlockId); 7] = [
    ("water", block::WATER),
    ("lava", block::LAVA),
    ("sand", block::SAND),
    ("tnt", block::TNT),
    ("grass", block::GRASS),
    ("log", block::LOG),
    ("leaves", block::LEAVES),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = CinderConfig::load_or_create(&path)?;
    tracing::info!(
        tick_rate = config.tick_rate,
        width = config.world.width,
        height = config.world.height,
        length = config.world.length,
        "Starting Cinder"
    );

    let events = WorldEvents::new();
    let level =
        demo::generate(config.world, config.world_seed).context("failed to generate world")?;
    let mut physics = Physics::new(level, &events, &config.physics);
    let features = demo::seed_activity(&mut physics, config.world_seed);
    tracing::info!("Seeded {features} active features");

    let cancel_token = CancellationToken::new();
    tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl-C: {e}");
                return;
            }
            tracing::info!("Shutting down");
            cancel_token.cancel();
        }
    });

    run(&mut physics, &config, &cancel_token).await;
    summarize(&physics, "Stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Ticks `physics` at the configured rate until cancelled or until
/// `max_ticks` have elapsed.
async fn run(physics: &mut Physics<Level>, config: &CinderConfig, cancel_token: &CancellationToken) {
    let mut interval = time::interval(Duration::from_secs(1) / config.tick_rate);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let summary_every = u64::from(config.tick_rate) * 5;
    let mut ticks = 0_u64;

    loop {
        select! {
            () = cancel_token.cancelled() => break,
            _ = interval.tick() => {
                physics.tick();
                ticks += 1;
                if ticks.is_multiple_of(summary_every) {
                    summarize(physics, "Tick summary");
                }
                if config.max_ticks.is_some_and(|max| ticks >= max) {
                    tracing::info!("Reached {ticks} ticks");
                    break;
                }
            }
        }
    }
}

fn summarize(physics: &Physics<Level>, message: &str) {
    let level = physics.world();
    let counts: Vec<String> = SUMMARY_BLOCKS
        .iter()
        .map(|&(name, block)| format!("{name}={}", level.count(block)))
        .collect();
    tracing::info!(
        tick = physics.tick_count(),
        liquid_pending = physics.liquid().pending(),
        falling_pending = physics.falling().pending(),
        tnt_pending = physics.tnt().pending(),
        "{message}: {}",
        counts.join(" ")
    );
}
