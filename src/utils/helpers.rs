use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a client-side post id (UUID v4, 122 random bits)
pub fn generate_post_id() -> String {
    Uuid::new_v4().to_string()
}

/// Hands out strictly increasing microsecond timestamps, even for calls
/// that land in the same clock tick
#[derive(Debug, Default)]
pub struct StampClock {
    last_micros: AtomicI64,
}

impl StampClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stamp(&self) -> DateTime<Utc> {
        let current = Utc::now().timestamp_micros();
        let previous = self
            .last_micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(current.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        let issued = current.max(previous + 1);

        DateTime::from_timestamp_micros(issued).unwrap_or_else(Utc::now)
    }
}

/// Date shown on post pages, e.g. "October 17, 2026"
pub fn long_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Date shown in dashboard tables and stat cards
pub fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%-m/%-d/%Y").to_string()
}
