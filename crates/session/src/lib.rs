//! Real-time driver for a tracker.
//!
//! The tracker lives inside an actix actor on its own thread. User actions and
//! timer callbacks are all messages to that one actor, so state is only ever
//! touched from a single execution context.

mod handle;
pub mod session;

pub use handle::{SessionHandle, start_session};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is no longer running: {0}")]
    Mailbox(#[from] actix::MailboxError),

    #[error(transparent)]
    Tracker(#[from] safe_zone_core::error::TrackerError),

    #[error("session thread exited before it started")]
    Startup,
}

pub type Result<T> = std::result::Result<T, SessionError>;
