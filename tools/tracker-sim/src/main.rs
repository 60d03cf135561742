use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use safe_zone_core::{config::TrackerConfig, link::LoraPolicy, tracker::Readout};
use std::path::PathBuf;

mod headless;
mod realtime;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Drop a pending LoRa switch once the tracker comes back within range
    CancelOnSupersede,
    /// Let a pending LoRa switch fire no matter what happened since
    FireUnconditionally,
}

impl From<Policy> for LoraPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::CancelOnSupersede => LoraPolicy::CancelOnSupersede,
            Policy::FireUnconditionally => LoraPolicy::FireUnconditionally,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tracker-sim",
    author,
    version,
    about = "Replay a tracked object drifting out of its safe zone",
    long_about = "Starts a tracker at the safe-zone origin, switches movement on and lets it \
                  drift diagonally one step per tick. Each tick reports the distance to the \
                  origin, the connection mode chosen for that distance and whether the tracker \
                  is still inside the safe radius.\n\n\
                  By default the run happens on a virtual clock and finishes instantly. With \
                  --realtime it runs on a live session with the configured tick interval."
)]
struct Args {
    /// JSON config file (every field optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of movement ticks to run
    #[arg(short, long, default_value = "30")]
    ticks: usize,

    /// Safe radius, read the same way as the radius control (e.g. "200")
    #[arg(short, long)]
    radius: Option<String>,

    /// Degrees added to latitude and longitude per tick
    #[arg(long)]
    step: Option<f64>,

    /// What to do with a pending LoRa switch after the tracker comes back
    #[arg(long, value_enum)]
    policy: Option<Policy>,

    /// Write the safe zone and walked path to this GeoJSON file
    #[arg(short, long)]
    geojson: Option<PathBuf>,

    /// Run on a live session in wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Print the final readout as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn tracker_config(&self) -> Result<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TrackerConfig::default(),
        };

        if let Some(step) = self.step {
            config.step_deg = step;
        }
        if let Some(policy) = self.policy {
            config.lora_policy = policy.into();
        }

        Ok(config)
    }
}

fn log_readout(tick: usize, readout: &Readout) {
    let (lat, lon) = readout
        .position
        .map(|p| (p.lat_display(), p.lon_display()))
        .unwrap_or_default();

    log::debug!(
        "tick {:>3}: {:>5} m  {:<15}  {}  ({}, {})",
        tick,
        readout.distance_m.unwrap_or(0),
        readout.mode.label(),
        readout.status,
        lat,
        lon
    );
}

fn log_summary(readout: &Readout) {
    log::info!("=== Final readout ===");
    log::info!("Points walked: {}", readout.path_len);
    log::info!("Distance: {} m", readout.distance_m.unwrap_or(0));
    log::info!("Connection mode: {}", readout.mode);
    log::info!("Safe radius: {} m", readout.safe_radius_m);
    log::info!("Status: {}", readout.status);
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let config = args.tracker_config()?;

    log::info!("=== Safe Zone Tracker ===");
    log::info!(
        "Origin: {:.6}, {:.6}",
        config.origin.lat,
        config.origin.lon
    );
    log::info!("Ticks: {} every {} ms", args.ticks, config.tick_interval_ms);
    log::info!("LoRa policy: {:?}", config.lora_policy);

    let (readout, state) = if args.realtime {
        realtime::run(&config, args.ticks, args.radius.as_deref())?
    } else {
        headless::run(&config, args.ticks, args.radius.as_deref(), args.verbose)?
    };

    log::info!("");
    log_summary(&readout);

    if let Some(path) = &args.geojson {
        safe_zone_core::export::write_geojson(path, &state, &config)
            .context("Failed to write GeoJSON")?;
        log::info!("Wrote path to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&readout)?);
    }

    Ok(())
}
