use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    config::TrackerConfig,
    link::{ConnectionMode, LoraPolicy, select_mode},
    position::{Coordinate, distance::rounded_meters},
    tracker::event::{Effect, Input, TrackerEvent},
    zone::ZoneStatus,
};

#[derive(Clone, Debug, PartialEq)]
pub struct TrackerState {
    origin: Coordinate,
    safe_radius_m: u64,
    path: Vec<Coordinate>,
    moving: bool,
    /// Incremented every time movement starts; ticks from older runs are ignored
    run: u64,
    mode: ConnectionMode,
    wifi_available: bool,
    last_distance_m: Option<u64>,
    lora_epoch: u64,
    pending_lora: Option<u64>,
}

/// Result of feeding one [`Input`] to a [`TrackerState`].
#[derive(Debug)]
pub struct Transition {
    pub state: TrackerState,
    pub events: Vec<TrackerEvent>,
    pub effects: Vec<Effect>,
}

impl TrackerState {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            origin: config.origin,
            safe_radius_m: config.safe_radius_m,
            path: Vec::new(),
            moving: false,
            run: 0,
            mode: ConnectionMode::Bluetooth,
            wifi_available: true,
            last_distance_m: None,
            lora_epoch: 0,
            pending_lora: None,
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn safe_radius_m(&self) -> u64 {
        self.safe_radius_m
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }

    pub fn wifi_available(&self) -> bool {
        self.wifi_available
    }

    pub fn last_distance_m(&self) -> Option<u64> {
        self.last_distance_m
    }

    pub fn pending_lora(&self) -> Option<u64> {
        self.pending_lora
    }

    pub fn zone_status(&self) -> ZoneStatus {
        ZoneStatus::evaluate(self.last_distance_m.unwrap_or(0), self.safe_radius_m)
    }

    pub fn step(self, config: &TrackerConfig, input: Input) -> Transition {
        let mut transition = Transition {
            state: self,
            events: Vec::new(),
            effects: Vec::new(),
        };

        match input {
            Input::ToggleMovement => transition.toggle_movement(),
            Input::Tick { run } => transition.tick(config, run),
            Input::Position(position) => transition.record(config, position),
            Input::SetSafeRadius(radius) => transition.set_safe_radius(radius),
            Input::LoraDue { epoch } => transition.lora_due(config, epoch),
        }

        transition
    }
}

impl Transition {
    fn toggle_movement(&mut self) {
        let state = &mut self.state;
        state.moving = !state.moving;

        if state.moving {
            state.run += 1;
            info!(run = state.run, "movement started");
            self.events.push(TrackerEvent::MovementStarted { run: state.run });
            self.effects.push(Effect::ScheduleTick {
                run: state.run,
                after: Duration::ZERO,
            });
        } else {
            info!(run = state.run, path_len = state.path.len(), "movement stopped");
            self.events.push(TrackerEvent::MovementStopped);
        }
    }

    fn tick(&mut self, config: &TrackerConfig, run: u64) {
        if !self.state.moving || run != self.state.run {
            debug!(run, current = self.state.run, "dropping tick from a stopped run");
            return;
        }

        let last = self.state.path.last().copied().unwrap_or(self.state.origin);
        self.record(config, last.offset(config.step_deg));

        self.effects.push(Effect::ScheduleTick {
            run,
            after: config.tick_interval(),
        });
    }

    fn record(&mut self, config: &TrackerConfig, position: Coordinate) {
        let state = &mut self.state;
        state.path.push(position);

        let distance_m = rounded_meters(position, state.origin);
        let previous_status = state
            .last_distance_m
            .map(|d| ZoneStatus::evaluate(d, state.safe_radius_m));
        state.last_distance_m = Some(distance_m);

        let decision = select_mode(distance_m, state.wifi_available, &config.thresholds);
        if decision.mode != state.mode {
            info!(from = %state.mode, to = %decision.mode, distance_m, "connection mode changed");
        }
        state.mode = decision.mode;
        state.wifi_available = decision.wifi_available;

        if let Some(epoch) = state.pending_lora {
            if config.lora_policy == LoraPolicy::CancelOnSupersede
                && config.thresholds.supersedes_fallback(distance_m)
            {
                debug!(epoch, distance_m, "cancelling superseded LoRa fallback");
                state.pending_lora = None;
                // the Wi-Fi loss recorded when arming no longer holds
                state.wifi_available = true;
                self.effects.push(Effect::CancelLora { epoch });
            }
        }

        if decision.arm_lora {
            state.lora_epoch += 1;
            state.pending_lora = Some(state.lora_epoch);
            debug!(epoch = state.lora_epoch, distance_m, "Wi-Fi lost, arming LoRa fallback");
            self.effects.push(Effect::ScheduleLora {
                epoch: state.lora_epoch,
                after: config.lora_delay(),
            });
        }

        let status = ZoneStatus::evaluate(distance_m, state.safe_radius_m);
        if previous_status != Some(status) {
            info!(%status, distance_m, safe_radius_m = state.safe_radius_m, "zone status changed");
        }

        debug!(
            lat = position.lat,
            lon = position.lon,
            distance_m,
            mode = %state.mode,
            "position recorded"
        );

        self.events.push(TrackerEvent::LinkUpdated {
            mode: state.mode,
            wifi_available: state.wifi_available,
        });
        self.events.push(TrackerEvent::PositionRecorded {
            position,
            distance_m,
            path_len: state.path.len(),
        });
        self.events.push(TrackerEvent::ZoneEvaluated {
            status,
            distance_m,
            safe_radius_m: state.safe_radius_m,
        });
    }

    fn set_safe_radius(&mut self, radius: u64) {
        let state = &mut self.state;
        state.safe_radius_m = radius;
        let status = state.zone_status();

        info!(safe_radius_m = radius, %status, "safe radius changed");
        self.events.push(TrackerEvent::SafeRadiusChanged {
            safe_radius_m: radius,
            status,
        });

        if let Some(distance_m) = state.last_distance_m {
            self.events.push(TrackerEvent::ZoneEvaluated {
                status,
                distance_m,
                safe_radius_m: radius,
            });
        }
    }

    fn lora_due(&mut self, config: &TrackerConfig, epoch: u64) {
        let state = &mut self.state;
        let current = state.pending_lora == Some(epoch);

        if !current && config.lora_policy == LoraPolicy::CancelOnSupersede {
            warn!(epoch, pending = ?state.pending_lora, "discarding stale LoRa fallback");
            self.events.push(TrackerEvent::LoraDiscarded { epoch });
            return;
        }

        if current {
            state.pending_lora = None;
        }
        if state.mode != ConnectionMode::LoRa {
            info!(from = %state.mode, epoch, "falling back to LoRa");
        }
        state.mode = ConnectionMode::LoRa;

        self.events.push(TrackerEvent::LoraEngaged { epoch });
        self.events.push(TrackerEvent::LinkUpdated {
            mode: state.mode,
            wifi_available: state.wifi_available,
        });
    }
}
