//! Shared fixtures for task unit tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Deterministic clock that advances one second per reading.
///
/// Gives transition tests a strict `updated_at > created_at` ordering
/// without depending on wall-clock resolution.
pub struct SteppingClock {
    base: DateTime<Utc>,
    readings: AtomicI64,
}

impl SteppingClock {
    /// Creates a clock starting at a fixed instant.
    pub fn new() -> Self {
        Self {
            base: Utc
                .with_ymd_and_hms(2026, 1, 15, 8, 0, 0)
                .single()
                .expect("fixed test instant is unambiguous"),
            readings: AtomicI64::new(0),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let reading = self.readings.fetch_add(1, Ordering::SeqCst);
        self.base + Duration::seconds(reading)
    }
}

/// Returns a valid storage location for test tasks.
pub fn input_location(name: &str) -> crate::storage::domain::StorageLocation {
    crate::storage::domain::StorageLocation::new(format!("mem://{name}"))
        .expect("test location is non-empty")
}
