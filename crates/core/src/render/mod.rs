//! Turning tracker events into map and readout updates.

use crate::{
    config::{MapStyle, TrackerConfig},
    position::Coordinate,
    tracker::{TrackerEvent, TrackerState},
};

pub mod command;
pub mod surface;

pub use command::{ElementId, RenderCommand};
pub use surface::{LogSurface, MapSurface, RecordingSurface};

pub struct Renderer {
    origin: Coordinate,
    style: MapStyle,
}

impl Renderer {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            origin: config.origin,
            style: config.map.clone(),
        }
    }

    /// Commands that bring an empty surface up to date with `state`
    pub fn initial_scene(&self, state: &TrackerState) -> Vec<RenderCommand> {
        let status = state.zone_status();
        let marker = state.path().last().copied().unwrap_or(self.origin);

        vec![
            RenderCommand::SetView {
                center: marker,
                zoom: self.style.zoom,
            },
            RenderCommand::AddTileLayer {
                url_template: self.style.tile_url.clone(),
            },
            RenderCommand::PlaceMarker { position: marker },
            RenderCommand::SetPath {
                points: state.path().to_vec(),
                color: self.style.path_color,
            },
            RenderCommand::DrawSafeZone {
                center: self.origin,
                radius_m: state.safe_radius_m(),
                color: status.boundary_color(&self.style),
            },
            RenderCommand::SetText {
                element: ElementId::Mode,
                text: state.mode().to_string(),
            },
            RenderCommand::SetValue {
                element: ElementId::RadiusSlider,
                value: state.safe_radius_m().to_string(),
            },
        ]
    }

    pub fn render(&self, event: &TrackerEvent) -> Vec<RenderCommand> {
        match *event {
            TrackerEvent::LinkUpdated { mode, .. } => vec![RenderCommand::SetText {
                element: ElementId::Mode,
                text: mode.to_string(),
            }],
            TrackerEvent::PositionRecorded {
                position,
                distance_m,
                ..
            } => vec![
                RenderCommand::SetText {
                    element: ElementId::Dist,
                    text: distance_m.to_string(),
                },
                RenderCommand::SetText {
                    element: ElementId::Lat,
                    text: position.lat_display(),
                },
                RenderCommand::SetText {
                    element: ElementId::Lon,
                    text: position.lon_display(),
                },
                RenderCommand::PlaceMarker { position },
                RenderCommand::PanTo { position },
                RenderCommand::ExtendPath { position },
            ],
            TrackerEvent::ZoneEvaluated { status, .. } => vec![
                RenderCommand::SetText {
                    element: ElementId::StatusBox,
                    text: status.status_text(),
                },
                RenderCommand::SetClass {
                    element: ElementId::StatusBox,
                    class: status.css_class(),
                },
                RenderCommand::RecolorSafeZone {
                    color: status.boundary_color(&self.style),
                },
            ],
            TrackerEvent::SafeRadiusChanged {
                safe_radius_m,
                status,
            } => vec![RenderCommand::DrawSafeZone {
                center: self.origin,
                radius_m: safe_radius_m,
                color: status.boundary_color(&self.style),
            }],
            TrackerEvent::MovementStarted { .. }
            | TrackerEvent::MovementStopped
            | TrackerEvent::LoraEngaged { .. }
            | TrackerEvent::LoraDiscarded { .. } => Vec::new(),
        }
    }

    pub fn present(&self, events: &[TrackerEvent], surface: &mut dyn MapSurface) {
        for command in events.iter().flat_map(|event| self.render(event)) {
            surface.apply(&command);
        }
    }

    pub fn present_initial(&self, state: &TrackerState, surface: &mut dyn MapSurface) {
        for command in self.initial_scene(state) {
            surface.apply(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::HexColor,
        link::ConnectionMode,
        tracker::{Input, Tracker},
        zone::ZoneStatus,
    };

    #[test]
    fn test_initial_scene() {
        let config = TrackerConfig::default();
        let renderer = Renderer::new(&config);
        let scene = renderer.initial_scene(&TrackerState::new(&config));

        assert_eq!(
            scene[0],
            RenderCommand::SetView {
                center: config.origin,
                zoom: 17
            }
        );
        assert!(scene.contains(&RenderCommand::SetPath {
            points: vec![],
            color: HexColor::rgb(0x38, 0xbd, 0xf8)
        }));
        assert!(scene.contains(&RenderCommand::DrawSafeZone {
            center: config.origin,
            radius_m: 150,
            color: HexColor::rgb(0x22, 0xc5, 0x5e)
        }));
        assert!(scene.contains(&RenderCommand::SetText {
            element: ElementId::Mode,
            text: "Bluetooth (BLE)".to_string()
        }));
    }

    #[test]
    fn test_position_update_on_surface() {
        let config = TrackerConfig::default();
        let renderer = Renderer::new(&config);
        let mut tracker = Tracker::new(config.clone());
        let mut surface = RecordingSurface::new();

        let position = config.origin.offset(20.0 * 0.00005);
        let dispatch = tracker.dispatch(Input::Position(position));
        renderer.present(&dispatch.events, &mut surface);

        assert_eq!(surface.text(ElementId::Mode).as_deref(), Some("GPS"));
        assert_eq!(surface.text(ElementId::Dist).as_deref(), Some("156"));
        assert_eq!(surface.text(ElementId::Lat).as_deref(), Some("9.09506"));
        assert_eq!(surface.text(ElementId::Lon).as_deref(), Some("76.49295"));
        assert_eq!(
            surface.text(ElementId::StatusBox).as_deref(),
            Some("STATUS: OUTSIDE SAFE ZONE")
        );
        assert_eq!(surface.class(ElementId::StatusBox), Some("status danger"));

        let commands = surface.commands();
        assert!(commands.contains(&RenderCommand::RecolorSafeZone {
            color: HexColor::rgb(0xef, 0x44, 0x44)
        }));
        assert!(commands.contains(&RenderCommand::ExtendPath { position }));
        assert!(commands.contains(&RenderCommand::PanTo { position }));
    }

    #[test]
    fn test_radius_redraw_uses_status_color() {
        let config = TrackerConfig::default();
        let renderer = Renderer::new(&config);

        let commands = renderer.render(&TrackerEvent::SafeRadiusChanged {
            safe_radius_m: 90,
            status: ZoneStatus::Outside,
        });
        assert_eq!(
            commands,
            [RenderCommand::DrawSafeZone {
                center: config.origin,
                radius_m: 90,
                color: HexColor::rgb(0xef, 0x44, 0x44)
            }]
        );
    }

    #[test]
    fn test_silent_events() {
        let renderer = Renderer::new(&TrackerConfig::default());

        assert!(renderer.render(&TrackerEvent::MovementStopped).is_empty());
        assert!(renderer
            .render(&TrackerEvent::LoraDiscarded { epoch: 3 })
            .is_empty());
        assert_eq!(
            renderer.render(&TrackerEvent::LinkUpdated {
                mode: ConnectionMode::LoRa,
                wifi_available: false
            }),
            [RenderCommand::SetText {
                element: ElementId::Mode,
                text: "LoRa".to_string()
            }]
        );
    }
}
