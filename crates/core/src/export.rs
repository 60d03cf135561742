//! GeoJSON output of a tracker's path and safe zone.

use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use crate::{
    config::TrackerConfig,
    error::{Result, TrackerError},
    position::Coordinate,
    tracker::TrackerState,
};

/// GeoJSON positions are (lon, lat)
fn position(c: Coordinate) -> Vec<f64> {
    let point: geo::Point = c.into();
    vec![point.x(), point.y()]
}

fn feature(geometry: Value, properties: serde_json::Map<String, serde_json::Value>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn safe_zone_feature(state: &TrackerState, config: &TrackerConfig) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("safe_zone"));
    properties.insert(
        "safe_radius_m".to_string(),
        serde_json::json!(state.safe_radius_m()),
    );
    properties.insert(
        "stroke".to_string(),
        serde_json::json!(state.zone_status().boundary_color(&config.map).to_string()),
    );

    feature(Value::Point(position(state.origin())), properties)
}

fn path_feature(state: &TrackerState, config: &TrackerConfig) -> Feature {
    let line: geo::LineString = state
        .path()
        .iter()
        .map(|&c| geo::Point::from(c))
        .collect();

    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("path"));
    properties.insert("points".to_string(), serde_json::json!(line.0.len()));
    properties.insert(
        "stroke".to_string(),
        serde_json::json!(config.map.path_color.to_string()),
    );

    let coordinates = line.coords().map(|c| vec![c.x, c.y]).collect();
    feature(Value::LineString(coordinates), properties)
}

fn last_position_feature(state: &TrackerState) -> Option<Feature> {
    let last = *state.path().last()?;

    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("position"));
    properties.insert("mode".to_string(), serde_json::json!(state.mode().label()));
    properties.insert(
        "status".to_string(),
        serde_json::json!(state.zone_status().to_string()),
    );
    properties.insert(
        "distance_m".to_string(),
        serde_json::json!(state.last_distance_m()),
    );

    Some(feature(Value::Point(position(last)), properties))
}

/// The safe zone, the path walked so far and, if any, the current position
pub fn path_feature_collection(state: &TrackerState, config: &TrackerConfig) -> FeatureCollection {
    let mut features = vec![safe_zone_feature(state, config), path_feature(state, config)];
    features.extend(last_position_feature(state));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub fn write_geojson(path: &Path, state: &TrackerState, config: &TrackerConfig) -> Result<()> {
    let geojson = GeoJson::FeatureCollection(path_feature_collection(state, config));
    let export_error = |source| TrackerError::Export {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(&geojson)
        .map_err(|e| export_error(std::io::Error::other(e)))?;
    std::fs::write(path, json).map_err(export_error)
}
