use std::thread::JoinHandle;

use actix::{Actor, Addr, System};
use safe_zone_core::{
    config::TrackerConfig,
    position::Coordinate,
    render::MapSurface,
    tracker::{Readout, TrackerState},
};
use tokio::sync::oneshot;
use tracing::warn;

use crate::{
    Result, SessionError,
    session::{
        GetReadout, GetState, SetSafeRadius, Shutdown, ToggleMovement, TrackerSession,
        UpdatePosition,
    },
};

/// Start a tracker on a dedicated actix system thread.
///
/// The initial scene is drawn onto `surface` before this returns.
pub async fn start_session(
    config: TrackerConfig,
    surface: Box<dyn MapSurface + Send>,
) -> Result<SessionHandle> {
    let (sender, receiver) = oneshot::channel();

    let thread = std::thread::spawn(move || {
        let system = System::new();
        system.block_on(async move {
            TrackerSession::new(config, surface).with_ready(sender).start();
        });
        system.run()
    });

    let addr = receiver.await.map_err(|_| SessionError::Startup)?;

    Ok(SessionHandle {
        addr,
        thread: Some(thread),
    })
}

/// Owner of a running session. Dropping it stops the session.
pub struct SessionHandle {
    addr: Addr<TrackerSession>,
    thread: Option<JoinHandle<std::io::Result<()>>>,
}

impl SessionHandle {
    pub async fn toggle_movement(&self) -> Result<()> {
        Ok(self.addr.send(ToggleMovement).await?)
    }

    /// Feed a raw value from the radius control. Invalid input is returned as
    /// an error and leaves the radius unchanged.
    pub async fn set_safe_radius(&self, raw: &str) -> Result<()> {
        self.addr.send(SetSafeRadius(raw.to_string())).await??;
        Ok(())
    }

    pub async fn update_position(&self, position: Coordinate) -> Result<()> {
        Ok(self.addr.send(UpdatePosition(position)).await?)
    }

    pub async fn readout(&self) -> Result<Readout> {
        Ok(self.addr.send(GetReadout).await?)
    }

    pub async fn snapshot(&self) -> Result<TrackerState> {
        Ok(self.addr.send(GetState).await?)
    }

    pub async fn path(&self) -> Result<Vec<Coordinate>> {
        Ok(self.snapshot().await?.path().to_vec())
    }

    /// Stop the session and wait for its thread to exit
    pub async fn shutdown(mut self) -> Result<()> {
        self.addr.send(Shutdown).await?;

        if let Some(thread) = self.thread.take() {
            match tokio::task::spawn_blocking(move || thread.join()).await {
                Ok(Ok(Ok(()))) => {}
                Ok(Ok(Err(e))) => warn!(error = %e, "session system exited with an error"),
                Ok(Err(_)) => warn!("session thread panicked"),
                Err(e) => warn!(error = %e, "failed to join session thread"),
            }
        }

        Ok(())
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.addr.do_send(Shutdown);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use safe_zone_core::{
        error::TrackerError,
        link::ConnectionMode,
        render::{ElementId, RecordingSurface, RenderCommand},
        zone::ZoneStatus,
    };

    use super::*;

    /// One tick per minute, so a test only ever sees the first one
    fn slow_ticks() -> TrackerConfig {
        TrackerConfig {
            tick_interval_ms: 60_000,
            lora_delay_ms: 50,
            ..TrackerConfig::default()
        }
    }

    async fn wait_for_path(session: &SessionHandle, len: usize) -> Readout {
        for _ in 0..200 {
            let readout = session.readout().await.unwrap();
            if readout.path_len >= len {
                return readout;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("path never reached {len} points");
    }

    #[tokio::test]
    async fn test_initial_scene_drawn_on_start() {
        let surface = RecordingSurface::new();
        let session = start_session(slow_ticks(), Box::new(surface.clone()))
            .await
            .unwrap();

        let commands = surface.commands();
        assert!(matches!(commands[0], RenderCommand::SetView { zoom: 17, .. }));
        assert_eq!(surface.text(ElementId::Mode).as_deref(), Some("Bluetooth (BLE)"));

        let readout = session.readout().await.unwrap();
        assert_eq!(readout.mode, ConnectionMode::Bluetooth);
        assert_eq!(readout.path_len, 0);

        session.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_movement_ticks_and_falls_back_to_lora() {
        let surface = RecordingSurface::new();
        let config = TrackerConfig {
            // one step is roughly 63 m, past the LoRa threshold
            step_deg: 0.0004,
            ..slow_ticks()
        };
        let origin = config.origin;
        let session = start_session(config, Box::new(surface.clone()))
            .await
            .unwrap();

        session.toggle_movement().await.unwrap();
        let readout = wait_for_path(&session, 1).await;
        assert!(readout.moving);
        assert_eq!(readout.distance_m, Some(63));
        assert_eq!(session.path().await.unwrap(), [origin.offset(0.0004)]);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(session.readout().await.unwrap().mode, ConnectionMode::LoRa);
        assert_eq!(surface.text(ElementId::Mode).as_deref(), Some("LoRa"));

        session.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_returning_cancels_lora_timer() {
        let config = TrackerConfig {
            lora_delay_ms: 150,
            ..slow_ticks()
        };
        let origin = config.origin;
        let session = start_session(config, Box::new(RecordingSurface::new()))
            .await
            .unwrap();

        session.update_position(origin.offset(0.0004)).await.unwrap();
        session.update_position(origin.offset(0.0001)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(400)).await;
        let readout = session.readout().await.unwrap();
        assert_eq!(readout.mode, ConnectionMode::WiFi);
        assert_eq!(readout.path_len, 2);

        session.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_radius_control() {
        let surface = RecordingSurface::new();
        let config = slow_ticks();
        let origin = config.origin;
        let session = start_session(config, Box::new(surface.clone()))
            .await
            .unwrap();

        session.update_position(origin.offset(0.0004)).await.unwrap();
        assert_eq!(session.readout().await.unwrap().status, ZoneStatus::Safe);

        let err = session.set_safe_radius("far").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Tracker(TrackerError::InvalidRadius { .. })
        ));

        session.set_safe_radius("40").await.unwrap();
        let readout = session.readout().await.unwrap();
        assert_eq!(readout.safe_radius_m, 40);
        assert_eq!(readout.status, ZoneStatus::Outside);
        assert!(surface.commands().iter().any(|c| matches!(
            c,
            RenderCommand::DrawSafeZone { radius_m: 40, .. }
        )));
        assert_eq!(
            surface.text(ElementId::StatusBox).as_deref(),
            Some("STATUS: OUTSIDE SAFE ZONE")
        );

        session.shutdown().await.unwrap();
    }
}
