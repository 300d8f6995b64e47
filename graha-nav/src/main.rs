//! GrahaNav - Mission Runner for Graha planets
//!
//! Explores a planet with the graha-map mission controller against a
//! simulated mothership, then writes the discovered planet to disk.
//!
//! ## Multi-Threaded Architecture
//!
//! GrahaNav uses two worker threads:
//!
//! - **Mothership Thread**: Receives client packets, waits the simulated
//!   latency, answers with assignments, confirmations and scripted events
//! - **Mission Thread**: Drives the simulated rover and runs the arrival,
//!   scan and decision cycle of the mission controller
//!
//! The main thread monitors progress, joins the workers and saves the output.

mod config;
mod error;
mod shared;
mod threads;

use config::NavConfig;
use error::{NavError, Result};
use graha_map::sim::PlanetFile;
use shared::SharedState;
use threads::spawn_threads;

use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Explore a planet against a simulated mothership.
#[derive(Parser, Debug)]
#[command(name = "graha-nav", version, about)]
struct Args {
    /// Configuration file (default: graha.toml when present)
    config: Option<PathBuf>,

    /// Planet file overriding mission.planet_file
    #[arg(long)]
    planet: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("graha_nav=info,graha_map=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut config = NavConfig::resolve(args.config.as_deref(), Path::new("."))?;

    // Override planet file if provided
    if let Some(planet) = args.planet {
        info!("Using planet file: {:?}", planet);
        config.mission.planet_file = planet.to_string_lossy().into_owned();
    }

    info!("GrahaNav v{}", env!("CARGO_PKG_VERSION"));
    let planet = PlanetFile::load(&config.mission.planet_file)?;
    info!(
        "Planet '{}': {} paths, start {}, group {}",
        planet.name,
        planet.paths.len(),
        planet.start_endpoint(),
        config.arbiter.group_id
    );

    let shared_state = Arc::new(SharedState::new());
    setup_signal_handler(Arc::clone(&shared_state))?;

    // Spawn worker threads
    info!("Starting mission...");
    let handles = spawn_threads(&config, &planet, Arc::clone(&shared_state))?;

    // Main thread: Monitor and wait for completion
    let check_interval = Duration::from_millis(200);
    let status_interval = Duration::from_secs(3);
    let mut last_status = Instant::now();

    loop {
        std::thread::sleep(check_interval);

        if shared_state.is_mission_finished() {
            break;
        }

        // Check if threads are still alive
        if handles.mission.is_finished() || handles.mothership.is_finished() {
            warn!("A worker thread exited unexpectedly");
            break;
        }

        if last_status.elapsed() >= status_interval {
            info!(
                "Mission running: {} messages handled by the mothership",
                shared_state.messages_handled()
            );
            last_status = Instant::now();
        }
    }

    // Signal shutdown to all threads
    shared_state.signal_shutdown();

    info!("Waiting for threads to finish...");
    if let Err(e) = handles.mission.join() {
        error!("Mission thread panicked: {:?}", e);
    }
    if let Err(e) = handles.mothership.join() {
        error!("Mothership thread panicked: {:?}", e);
    }

    if let Some(reason) = shared_state.failure() {
        return Err(NavError::Thread(reason));
    }
    let outcome = shared_state
        .take_outcome()
        .ok_or_else(|| NavError::Thread("mission ended without an outcome".to_string()))?;

    if outcome.report.step_limit_hit {
        warn!(
            "Mission abandoned after {} steps (mission.max_steps)",
            outcome.report.steps
        );
    }

    match outcome.discovered {
        Some(discovered) => save_planet(&config, &discovered)?,
        None => warn!("No planet assigned, nothing to save"),
    }

    info!("GrahaNav finished");
    Ok(())
}

/// Setup signal handler for graceful shutdown
fn setup_signal_handler(shared_state: Arc<SharedState>) -> Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;

    std::thread::Builder::new()
        .name("signal-handler".to_string())
        .spawn(move || {
            if let Some(sig) = signals.forever().next() {
                info!("Received signal {:?}, initiating shutdown...", sig);
                shared_state.signal_shutdown();
            }
        })?;
    Ok(())
}

/// Save the discovered planet to the configured output path.
fn save_planet(config: &NavConfig, discovered: &PlanetFile) -> Result<()> {
    let planet = discovered.planet();
    info!(
        "Planet statistics: {} nodes, {} paths discovered",
        planet.node_count(),
        planet.path_count()
    );

    // Create output directory if needed
    let planet_path = Path::new(&config.output.planet_path);
    if let Some(parent) = planet_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    discovered.save(planet_path)?;
    info!("Planet saved to {:?}", planet_path);
    Ok(())
}
