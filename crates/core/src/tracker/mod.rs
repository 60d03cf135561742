//! The tracker: one explicit state value and the inputs that move it forward.
//!
//! [`TrackerState::step`] is pure. It consumes the state and returns the next
//! one along with the [`TrackerEvent`]s to render and the timer [`Effect`]s a
//! driver has to schedule. [`Tracker`] pairs a state with its config for
//! drivers that would rather hold one mutable value.

use replace_with::replace_with_or_abort;
use serde::Serialize;
use tracing::warn;

use crate::{
    config::TrackerConfig,
    error::Result,
    link::ConnectionMode,
    position::Coordinate,
    zone::{ZoneStatus, parse_radius},
};

pub mod event;
pub mod state;

pub use event::{Effect, Input, TrackerEvent};
pub use state::{TrackerState, Transition};

#[derive(Debug, Default, PartialEq)]
pub struct Dispatch {
    pub events: Vec<TrackerEvent>,
    pub effects: Vec<Effect>,
}

/// The values shown on the readout panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Readout {
    pub mode: ConnectionMode,
    pub distance_m: Option<u64>,
    pub position: Option<Coordinate>,
    pub status: ZoneStatus,
    pub safe_radius_m: u64,
    pub moving: bool,
    pub path_len: usize,
}

pub struct Tracker {
    config: TrackerConfig,
    state: TrackerState,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        let state = TrackerState::new(&config);
        Self { config, state }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn dispatch(&mut self, input: Input) -> Dispatch {
        let config = &self.config;
        let mut output = None;

        replace_with_or_abort(&mut self.state, |state| {
            let Transition {
                state,
                events,
                effects,
            } = state.step(config, input);
            output = Some(Dispatch { events, effects });
            state
        });

        output.unwrap_or_default()
    }

    /// Apply a raw value from the radius control.
    ///
    /// Unparseable input leaves the current radius in place.
    pub fn set_safe_radius(&mut self, raw: &str) -> Result<Dispatch> {
        let radius = parse_radius(raw).inspect_err(|e| {
            warn!(input = raw, error = %e, "ignoring radius input");
        })?;

        Ok(self.dispatch(Input::SetSafeRadius(radius)))
    }

    pub fn readout(&self) -> Readout {
        let state = &self.state;
        Readout {
            mode: state.mode(),
            distance_m: state.last_distance_m(),
            position: state.path().last().copied(),
            status: state.zone_status(),
            safe_radius_m: state.safe_radius_m(),
            moving: state.is_moving(),
            path_len: state.path().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;

    #[test]
    fn test_dispatch_updates_state() {
        let mut tracker = Tracker::new(TrackerConfig::default());

        let started = tracker.dispatch(Input::ToggleMovement);
        assert_eq!(started.events, [TrackerEvent::MovementStarted { run: 1 }]);

        let ticked = tracker.dispatch(Input::Tick { run: 1 });
        assert_eq!(ticked.events.len(), 3);
        assert_eq!(tracker.state().path().len(), 1);
    }

    #[test]
    fn test_readout() {
        let mut tracker = Tracker::new(TrackerConfig::default());
        let initial = tracker.readout();
        assert_eq!(initial.mode, ConnectionMode::Bluetooth);
        assert_eq!(initial.distance_m, None);
        assert_eq!(initial.position, None);
        assert_eq!(initial.status, ZoneStatus::Safe);

        let far = tracker.config().origin.offset(0.00125);
        tracker.dispatch(Input::Position(far));

        let readout = tracker.readout();
        assert_eq!(readout.mode, ConnectionMode::Gps);
        assert_eq!(readout.distance_m, Some(195));
        assert_eq!(readout.position, Some(far));
        assert_eq!(readout.status, ZoneStatus::Outside);
        assert_eq!(readout.path_len, 1);
    }

    #[test]
    fn test_bad_radius_keeps_previous() {
        let mut tracker = Tracker::new(TrackerConfig::default());

        let err = tracker.set_safe_radius("abc").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidRadius { .. }));
        assert_eq!(tracker.state().safe_radius_m(), 150);

        let dispatch = tracker.set_safe_radius("220").unwrap();
        assert_eq!(tracker.state().safe_radius_m(), 220);
        assert_eq!(
            dispatch.events,
            [TrackerEvent::SafeRadiusChanged {
                safe_radius_m: 220,
                status: ZoneStatus::Safe
            }]
        );
    }
}
