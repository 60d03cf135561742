use anyhow::{Context, Result};
use safe_zone_core::{
    config::TrackerConfig,
    render::LogSurface,
    tracker::{Readout, TrackerState},
};
use safe_zone_session::start_session;
use std::time::Duration;

use crate::log_readout;

/// Wall-clock time covered by `ticks` ticks, the first of which is immediate
fn movement_span(interval: Duration, ticks: usize) -> Duration {
    let intervals = u32::try_from(ticks.saturating_sub(1)).unwrap_or(u32::MAX);
    interval.saturating_mul(intervals)
}

/// Run `ticks` movement ticks on a live session, in wall-clock time
pub fn run(
    config: &TrackerConfig,
    ticks: usize,
    radius: Option<&str>,
) -> Result<(Readout, TrackerState)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let session = start_session(config.clone(), Box::new(LogSurface)).await?;

        if let Some(raw) = radius {
            session
                .set_safe_radius(raw)
                .await
                .with_context(|| format!("Invalid radius {raw:?}"))?;
        }

        log::info!(
            "Moving for about {:.1} s...",
            movement_span(config.tick_interval(), ticks).as_secs_f64()
        );
        session.toggle_movement().await?;

        let poll = (config.tick_interval() / 4).max(Duration::from_millis(10));
        let mut seen = 0;
        while seen < ticks {
            tokio::time::sleep(poll).await;
            let readout = session.readout().await?;
            if readout.path_len > seen {
                seen = readout.path_len;
                log_readout(seen, &readout);
            }
        }

        session.toggle_movement().await?;
        let readout = session.readout().await?;
        let state = session.snapshot().await?;
        session.shutdown().await?;

        Ok::<_, anyhow::Error>((readout, state))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_span() {
        let interval = Duration::from_secs(2);
        assert_eq!(movement_span(interval, 0), Duration::ZERO);
        assert_eq!(movement_span(interval, 1), Duration::ZERO);
        assert_eq!(movement_span(interval, 30), Duration::from_secs(58));
    }

    #[test]
    fn test_movement_span_saturates() {
        let interval = Duration::from_secs(2);
        assert_eq!(
            movement_span(interval, usize::MAX),
            interval.saturating_mul(u32::MAX)
        );
    }
}
