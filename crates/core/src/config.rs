//! Tracker settings.
//!
//! Every field has a default matching the stock demo, so an empty JSON object
//! is a valid config file.

use std::{fmt, fs, path::Path, str::FromStr, time::Duration};

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    link::{LinkThresholds, LoraPolicy},
    position::Coordinate,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Center of the safe zone
    pub origin: Coordinate,
    pub safe_radius_m: u64,
    /// Degrees added to both latitude and longitude on every tick
    pub step_deg: f64,
    pub tick_interval_ms: u64,
    pub lora_delay_ms: u64,
    pub thresholds: LinkThresholds,
    pub lora_policy: LoraPolicy,
    pub map: MapStyle,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            origin: Coordinate::new(9.094060, 76.491953),
            safe_radius_m: 150,
            step_deg: 0.00005,
            tick_interval_ms: 2000,
            lora_delay_ms: 5000,
            thresholds: LinkThresholds::default(),
            lora_policy: LoraPolicy::default(),
            map: MapStyle::default(),
        }
    }
}

impl TrackerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| TrackerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_slice(&data)?)
    }

    /// Never zero, so a running loop always advances the clock
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn lora_delay(&self) -> Duration {
        Duration::from_millis(self.lora_delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub zoom: u8,
    pub tile_url: String,
    pub path_color: HexColor,
    pub safe_color: HexColor,
    pub danger_color: HexColor,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            zoom: 17,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            path_color: HexColor::rgb(0x38, 0xbd, 0xf8),
            safe_color: HexColor::rgb(0x22, 0xc5, 0x5e),
            danger_color: HexColor::rgb(0xef, 0x44, 0x44),
        }
    }
}

/// An sRGB color written as `#rrggbb` in config files and render commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Srgb<u8>);

impl HexColor {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl FromStr for HexColor {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Srgb<u8>>()
            .map(HexColor)
            .map_err(|e| TrackerError::InvalidColor {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl TryFrom<String> for HexColor {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config: TrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(2));
        assert_eq!(config.lora_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_override() {
        let config: TrackerConfig = serde_json::from_str(
            r##"{
                "safe_radius_m": 300,
                "lora_policy": "fire_unconditionally",
                "thresholds": { "lora_min_m": 80 },
                "map": { "danger_color": "#ff0000" }
            }"##,
        )
        .unwrap();

        assert_eq!(config.safe_radius_m, 300);
        assert_eq!(config.lora_policy, LoraPolicy::FireUnconditionally);
        assert_eq!(config.thresholds.lora_min_m, 80);
        assert_eq!(config.thresholds.wifi_max_m, 20);
        assert_eq!(config.map.danger_color, HexColor::rgb(0xff, 0, 0));
        assert_eq!(config.map.safe_color.to_string(), "#22c55e");
    }

    #[test]
    fn test_bad_color_rejected() {
        let result: std::result::Result<TrackerConfig, _> =
            serde_json::from_str(r#"{ "map": { "path_color": "blue-ish" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(HexColor::rgb(0x38, 0xbd, 0xf8).to_string(), "#38bdf8");
        assert_eq!("#ef4444".parse::<HexColor>().unwrap(), HexColor::rgb(0xef, 0x44, 0x44));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TrackerConfig::load("/nonexistent/tracker.json").unwrap_err();
        assert!(matches!(err, TrackerError::ConfigRead { .. }));
    }
}
