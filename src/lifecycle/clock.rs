use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Wrapper type for Actix-web app data.
pub type ClockData = Arc<dyn Clock>;

/// Injectable time source. Every lifecycle transition compares against a
/// deadline, so the clock is a capability rather than a global.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used by the running server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
