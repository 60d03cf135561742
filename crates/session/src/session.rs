use std::collections::HashMap;

use actix::{
    Actor, ActorContext, Addr, AsyncContext, Context, Handler, Message, MessageResult,
    SpawnHandle, System,
};
use safe_zone_core::{
    config::TrackerConfig,
    error::TrackerError,
    position::Coordinate,
    render::{MapSurface, Renderer},
    tracker::{Dispatch, Effect, Input, Readout, Tracker, TrackerState},
};
use tokio::sync::oneshot;
use tracing::{debug, info};

pub struct TrackerSession {
    tracker: Tracker,
    renderer: Renderer,
    surface: Box<dyn MapSurface + Send>,
    lora_timers: HashMap<u64, SpawnHandle>,
    /// Receives the session's address once the initial scene is drawn
    ready: Option<oneshot::Sender<Addr<TrackerSession>>>,
}

impl TrackerSession {
    pub fn new(config: TrackerConfig, surface: Box<dyn MapSurface + Send>) -> Self {
        Self {
            renderer: Renderer::new(&config),
            tracker: Tracker::new(config),
            surface,
            lora_timers: HashMap::new(),
            ready: None,
        }
    }

    pub fn with_ready(mut self, ready: oneshot::Sender<Addr<TrackerSession>>) -> Self {
        self.ready = Some(ready);
        self
    }

    fn dispatch(&mut self, input: Input, ctx: &mut Context<Self>) {
        let dispatch = self.tracker.dispatch(input);
        self.settle(dispatch, ctx);
    }

    fn settle(&mut self, dispatch: Dispatch, ctx: &mut Context<Self>) {
        let Dispatch { events, effects } = dispatch;
        self.renderer.present(&events, self.surface.as_mut());

        for effect in effects {
            match effect {
                Effect::ScheduleTick { run, after } => {
                    ctx.run_later(after, move |session, ctx| {
                        session.dispatch(Input::Tick { run }, ctx);
                    });
                }
                Effect::ScheduleLora { epoch, after } => {
                    let handle = ctx.run_later(after, move |session, ctx| {
                        session.lora_timers.remove(&epoch);
                        session.dispatch(Input::LoraDue { epoch }, ctx);
                    });
                    self.lora_timers.insert(epoch, handle);
                }
                Effect::CancelLora { epoch } => {
                    if let Some(handle) = self.lora_timers.remove(&epoch) {
                        debug!(epoch, "cancelling LoRa timer");
                        ctx.cancel_future(handle);
                    }
                }
            }
        }
    }
}

impl Actor for TrackerSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(origin = ?self.tracker.config().origin, "tracker session started");
        self.renderer
            .present_initial(self.tracker.state(), self.surface.as_mut());

        if let Some(ready) = self.ready.take() {
            let _ = ready.send(ctx.address());
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            path_len = self.tracker.state().path().len(),
            "tracker session stopped"
        );
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ToggleMovement;

impl Handler<ToggleMovement> for TrackerSession {
    type Result = ();

    fn handle(&mut self, _msg: ToggleMovement, ctx: &mut Self::Context) -> Self::Result {
        self.dispatch(Input::ToggleMovement, ctx);
    }
}

/// Raw value from the radius control
#[derive(Message)]
#[rtype(result = "Result<(), TrackerError>")]
pub struct SetSafeRadius(pub String);

impl Handler<SetSafeRadius> for TrackerSession {
    type Result = Result<(), TrackerError>;

    fn handle(&mut self, msg: SetSafeRadius, ctx: &mut Self::Context) -> Self::Result {
        let dispatch = self.tracker.set_safe_radius(&msg.0)?;
        self.settle(dispatch, ctx);
        Ok(())
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct UpdatePosition(pub Coordinate);

impl Handler<UpdatePosition> for TrackerSession {
    type Result = ();

    fn handle(&mut self, msg: UpdatePosition, ctx: &mut Self::Context) -> Self::Result {
        self.dispatch(Input::Position(msg.0), ctx);
    }
}

#[derive(Message)]
#[rtype(result = "Readout")]
pub struct GetReadout;

impl Handler<GetReadout> for TrackerSession {
    type Result = MessageResult<GetReadout>;

    fn handle(&mut self, _msg: GetReadout, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.tracker.readout())
    }
}

/// A copy of the full tracker state, path included
#[derive(Message)]
#[rtype(result = "TrackerState")]
pub struct GetState;

impl Handler<GetState> for TrackerSession {
    type Result = MessageResult<GetState>;

    fn handle(&mut self, _msg: GetState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.tracker.state().clone())
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Shutdown;

impl Handler<Shutdown> for TrackerSession {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) -> Self::Result {
        ctx.stop();
        System::current().stop();
    }
}
