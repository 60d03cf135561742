use std::time::Duration;

use crate::{link::ConnectionMode, position::Coordinate, zone::ZoneStatus};

/// Everything that can happen to a tracker: user actions and timer callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    ToggleMovement,
    /// A movement tick belonging to the given run
    Tick { run: u64 },
    /// Record a position directly, bypassing the movement loop
    Position(Coordinate),
    SetSafeRadius(u64),
    /// The deferred LoRa switch armed at `epoch` has come due
    LoraDue { epoch: u64 },
}

/// Timer work the driver must carry out on the tracker's behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    ScheduleTick { run: u64, after: Duration },
    ScheduleLora { epoch: u64, after: Duration },
    CancelLora { epoch: u64 },
}

/// What changed, in the order it changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackerEvent {
    MovementStarted { run: u64 },
    MovementStopped,
    LinkUpdated {
        mode: ConnectionMode,
        wifi_available: bool,
    },
    PositionRecorded {
        position: Coordinate,
        distance_m: u64,
        path_len: usize,
    },
    ZoneEvaluated {
        status: ZoneStatus,
        distance_m: u64,
        safe_radius_m: u64,
    },
    SafeRadiusChanged {
        safe_radius_m: u64,
        status: ZoneStatus,
    },
    LoraEngaged { epoch: u64 },
    /// A LoRa timer fired after the position that armed it was superseded
    LoraDiscarded { epoch: u64 },
}
