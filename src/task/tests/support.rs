//! Shared test helpers for the task module.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

/// Deterministic clock that advances one second per reading.
///
/// Guarantees strictly increasing timestamps so tests can assert that
/// mutations refresh `updated_at`.
pub struct SteppingClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect(
                "fixed test epoch is valid",
            ),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.base + Duration::seconds(tick)
    }
}
