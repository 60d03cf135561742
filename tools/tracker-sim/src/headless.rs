use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use safe_zone_core::{
    config::TrackerConfig,
    render::{LogSurface, Renderer},
    simulation::Simulation,
    tracker::{Input, Readout, TrackerState},
};
use std::time::Duration;

use crate::log_readout;

/// Run `ticks` movement ticks on a virtual clock
pub fn run(
    config: &TrackerConfig,
    ticks: usize,
    radius: Option<&str>,
    verbose: bool,
) -> Result<(Readout, TrackerState)> {
    let mut sim = Simulation::new(config.clone());
    let renderer = Renderer::new(config);
    let mut surface = LogSurface;

    renderer.present_initial(sim.tracker().state(), &mut surface);

    if let Some(raw) = radius {
        let events = sim
            .set_safe_radius(raw)
            .with_context(|| format!("Invalid radius {raw:?}"))?;
        renderer.present(&events, &mut surface);
    }

    let pb = if verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(ticks as u64)
    };
    pb.set_style(ProgressStyle::default_bar().template("{bar:40.cyan/blue} {pos}/{len} {msg}")?);

    let events = sim.dispatch(Input::ToggleMovement);
    renderer.present(&events, &mut surface);

    for tick in 1..=ticks {
        let step = if tick == 1 {
            Duration::ZERO
        } else {
            config.tick_interval()
        };
        let events = pb.suspend(|| sim.advance(step));
        renderer.present(&events, &mut surface);

        let readout = sim.tracker().readout();
        log_readout(tick, &readout);
        pb.set_message(format!("{} m, {}", readout.distance_m.unwrap_or(0), readout.mode));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let events = sim.dispatch(Input::ToggleMovement);
    renderer.present(&events, &mut surface);

    log::info!("Simulated {:.1} s of movement", sim.now().as_secs_f64());

    Ok((sim.tracker().readout(), sim.tracker().state().clone()))
}
