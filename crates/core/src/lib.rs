//! # safe-zone-core
//!
//! Headless model of a tracked object drifting away from a safe-zone origin.
//!
//! - [`position`]: coordinates and haversine distance
//! - [`link`]: the distance-banded connection mode and its LoRa fallback
//! - [`zone`]: safe/outside status and radius input parsing
//! - [`tracker`]: the state value, its inputs, events and timer effects
//! - [`render`]: events to map/readout commands for a [`render::MapSurface`]
//! - [`simulation`]: a virtual-clock driver for replaying movement instantly
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use safe_zone_core::prelude::*;
//!
//! let mut sim = Simulation::new(TrackerConfig::default());
//! sim.dispatch(Input::ToggleMovement);
//! sim.advance(Duration::from_secs(4));
//!
//! let readout = sim.tracker().readout();
//! assert_eq!(readout.path_len, 3);
//! assert_eq!(readout.mode, ConnectionMode::Gps);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod link;
pub mod position;
pub mod render;
pub mod simulation;
pub mod tracker;
pub mod zone;

pub mod prelude {
    pub use crate::config::{HexColor, MapStyle, TrackerConfig};
    pub use crate::error::{Result, TrackerError};
    pub use crate::link::{ConnectionMode, LinkThresholds, LoraPolicy};
    pub use crate::position::{Coordinate, distance::haversine};
    pub use crate::render::{ElementId, MapSurface, RenderCommand, Renderer};
    pub use crate::simulation::Simulation;
    pub use crate::tracker::{Effect, Input, Readout, Tracker, TrackerEvent, TrackerState};
    pub use crate::zone::ZoneStatus;
}
