//! Session lifecycle: the shared app context and idle-timeout enforcement.

mod context;
mod expiry;
pub mod inactivity;

pub use context::AppContext;
pub use expiry::{SessionExpiryHandler, SESSION_EXPIRED_MESSAGE, SESSION_EXPIRED_TITLE};
pub use inactivity::{InactivityConfig, InactivityMonitor, InactivityState};

use async_trait::async_trait;

/// Ends the current session: clears state and credentials, then returns
/// to the sign-in entry point.
#[async_trait]
pub trait LogoutHandler: Send + Sync {
    async fn logout(&self);
}

/// Invoked by the inactivity monitor when the idle threshold elapses.
#[async_trait]
pub trait InactivityHandler: Send + Sync {
    async fn on_inactive(&self);
}
