//! Safe-zone status and radius input handling.

use serde::{Deserialize, Serialize};

use crate::{
    config::{HexColor, MapStyle},
    error::{Result, TrackerError},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ZoneStatus {
    #[strum(serialize = "SAFE ZONE")]
    Safe,
    #[strum(serialize = "OUTSIDE SAFE ZONE")]
    Outside,
}

impl ZoneStatus {
    /// Being exactly on the boundary still counts as safe.
    pub fn evaluate(distance_m: u64, safe_radius_m: u64) -> Self {
        if distance_m > safe_radius_m {
            ZoneStatus::Outside
        } else {
            ZoneStatus::Safe
        }
    }

    pub fn status_text(&self) -> String {
        format!("STATUS: {self}")
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ZoneStatus::Safe => "status safe",
            ZoneStatus::Outside => "status danger",
        }
    }

    pub fn boundary_color(&self, style: &MapStyle) -> HexColor {
        match self {
            ZoneStatus::Safe => style.safe_color,
            ZoneStatus::Outside => style.danger_color,
        }
    }
}

/// Parse the radius control's value.
///
/// Reads like `parseInt`: leading whitespace, an optional sign, then as many
/// digits as there are. Anything after the digits is ignored, so `"150px"`
/// and `"150.9"` are both 150.
pub fn parse_radius(input: &str) -> Result<u64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    let value: i64 = digits.parse().map_err(|_| TrackerError::InvalidRadius {
        input: input.to_string(),
    })?;

    match (negative, value) {
        (true, v) if v > 0 => Err(TrackerError::NegativeRadius(-v)),
        (_, v) => Ok(v as u64),
    }
}
