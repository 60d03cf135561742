//! A deterministic driver that runs a [`Tracker`] on a virtual clock.
//!
//! Timers are kept in due-time order; two timers due at the same instant fire
//! in the order they were scheduled. Nothing here sleeps, so hours of
//! movement can be replayed instantly.

use std::{collections::BTreeMap, time::Duration};

use crate::{
    config::TrackerConfig,
    error::Result,
    tracker::{Dispatch, Effect, Input, Tracker, TrackerEvent},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    Tick { run: u64 },
    Lora { epoch: u64 },
}

impl Timer {
    fn into_input(self) -> Input {
        match self {
            Timer::Tick { run } => Input::Tick { run },
            Timer::Lora { epoch } => Input::LoraDue { epoch },
        }
    }
}

pub struct Simulation {
    tracker: Tracker,
    now: Duration,
    seq: u64,
    timers: BTreeMap<(Duration, u64), Timer>,
}

impl Simulation {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracker: Tracker::new(config),
            now: Duration::ZERO,
            seq: 0,
            timers: BTreeMap::new(),
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Outstanding timers with their due times, soonest first
    pub fn pending_timers(&self) -> impl Iterator<Item = (Duration, Timer)> + '_ {
        self.timers.iter().map(|(&(due, _), &timer)| (due, timer))
    }

    pub fn dispatch(&mut self, input: Input) -> Vec<TrackerEvent> {
        let Dispatch { events, effects } = self.tracker.dispatch(input);
        self.apply_effects(effects);
        events
    }

    pub fn set_safe_radius(&mut self, raw: &str) -> Result<Vec<TrackerEvent>> {
        let Dispatch { events, effects } = self.tracker.set_safe_radius(raw)?;
        self.apply_effects(effects);
        Ok(events)
    }

    /// Move the clock forward, firing every timer that comes due on the way.
    pub fn advance(&mut self, by: Duration) -> Vec<TrackerEvent> {
        let until = self.now + by;
        let mut events = Vec::new();

        while let Some(entry) = self.timers.first_entry() {
            if entry.key().0 > until {
                break;
            }

            let ((due, _), timer) = entry.remove_entry();
            self.now = due;
            events.extend(self.dispatch(timer.into_input()));
        }

        self.now = until;
        events
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleTick { run, after } => self.schedule(after, Timer::Tick { run }),
                Effect::ScheduleLora { epoch, after } => {
                    self.schedule(after, Timer::Lora { epoch })
                }
                Effect::CancelLora { epoch } => {
                    self.timers.retain(|_, timer| *timer != Timer::Lora { epoch });
                }
            }
        }
    }

    fn schedule(&mut self, after: Duration, timer: Timer) {
        self.seq += 1;
        self.timers.insert((self.now + after, self.seq), timer);
    }
}
