use crate::{config::HexColor, position::Coordinate};

/// Display elements on the readout panel, by their stable identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum ElementId {
    #[strum(serialize = "mode")]
    Mode,
    #[strum(serialize = "dist")]
    Dist,
    #[strum(serialize = "lat")]
    Lat,
    #[strum(serialize = "lon")]
    Lon,
    #[strum(serialize = "statusBox")]
    StatusBox,
    #[strum(serialize = "radiusSlider")]
    RadiusSlider,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    SetView { center: Coordinate, zoom: u8 },
    AddTileLayer { url_template: String },
    PlaceMarker { position: Coordinate },
    PanTo { position: Coordinate },
    /// Replace the path trace
    SetPath { points: Vec<Coordinate>, color: HexColor },
    /// Append one point to the path trace
    ExtendPath { position: Coordinate },
    /// Remove any existing safe-zone circle and draw a fresh one
    DrawSafeZone {
        center: Coordinate,
        radius_m: u64,
        color: HexColor,
    },
    RecolorSafeZone { color: HexColor },
    SetText { element: ElementId, text: String },
    SetClass { element: ElementId, class: &'static str },
    SetValue { element: ElementId, value: String },
}
