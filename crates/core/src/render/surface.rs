use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::render::command::{ElementId, RenderCommand};

/// Anything that can show the tracker: a browser map, a terminal, a test log.
pub trait MapSurface {
    fn apply(&mut self, command: &RenderCommand);
}

impl<S: MapSurface + ?Sized> MapSurface for Box<S> {
    fn apply(&mut self, command: &RenderCommand) {
        (**self).apply(command)
    }
}

/// Writes every command to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSurface;

impl MapSurface for LogSurface {
    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::SetText { element, text } => {
                debug!(target: "surface", %element, text, "set text");
            }
            other => debug!(target: "surface", command = ?other),
        }
    }
}

/// Keeps every command it receives. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Arc<Mutex<Vec<RenderCommand>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.commands
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The most recent text written to an element
    pub fn text(&self, element: ElementId) -> Option<String> {
        self.commands().into_iter().rev().find_map(|command| match command {
            RenderCommand::SetText { element: e, text } if e == element => Some(text),
            _ => None,
        })
    }

    pub fn class(&self, element: ElementId) -> Option<&'static str> {
        self.commands().into_iter().rev().find_map(|command| match command {
            RenderCommand::SetClass { element: e, class } if e == element => Some(class),
            _ => None,
        })
    }
}

impl MapSurface for RecordingSurface {
    fn apply(&mut self, command: &RenderCommand) {
        self.commands
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command.clone());
    }
}
