//! Periodic persistence cadence for the item and npc registries.
//!
//! The scheduler runs on system-clock checks against UTC minute boundaries
//! rather than an OS timer service, so a tick that arrives late still fires
//! at most once per boundary. The plugin loop polls [`SaveScheduler::due`]
//! from its own task; saving happens inline on that task, never concurrently
//! with command handling.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Default save interval, matching the original ten-minute cadence.
pub const DEFAULT_SAVE_INTERVAL_MINUTES: u32 = 10;

/// Save cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Whether the periodic save runs at all. Disabling it still saves on
    /// shutdown.
    pub enabled: bool,
    /// Minutes between saves. Aligned to UTC minute boundaries.
    pub interval_minutes: u32,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_minutes: DEFAULT_SAVE_INTERVAL_MINUTES,
        }
    }
}

/// Tracks which boundary last fired so polls are idempotent within a minute.
#[derive(Debug)]
pub struct SaveScheduler {
    config: SaveConfig,
    last_fired_boundary: Option<i64>,
}

impl SaveScheduler {
    pub fn new(config: SaveConfig) -> Self {
        Self {
            config,
            last_fired_boundary: None,
        }
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Whether a save should run now. Returns true at most once per aligned
    /// boundary; callers poll this more often than once a minute.
    pub fn due(&mut self, now: DateTime<Utc>) -> bool {
        if !self.config.enabled || self.config.interval_minutes == 0 {
            return false;
        }
        let minute_of_day = now.hour() * 60 + now.minute();
        if minute_of_day % self.config.interval_minutes != 0 {
            return false;
        }
        let boundary = now.ordinal() as i64 * 1440 + minute_of_day as i64;
        if self.last_fired_boundary == Some(boundary) {
            return false;
        }
        self.last_fired_boundary = Some(boundary);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, hour, minute, second).unwrap()
    }

    #[test]
    fn fires_once_per_boundary() {
        let mut scheduler = SaveScheduler::new(SaveConfig::default());
        assert!(scheduler.due(at(12, 10, 0)));
        assert!(!scheduler.due(at(12, 10, 20)));
        assert!(!scheduler.due(at(12, 10, 59)));
        assert!(scheduler.due(at(12, 20, 3)));
    }

    #[test]
    fn skips_off_boundary_minutes() {
        let mut scheduler = SaveScheduler::new(SaveConfig::default());
        assert!(!scheduler.due(at(12, 13, 0)));
        assert!(!scheduler.due(at(12, 19, 30)));
        assert!(scheduler.due(at(12, 30, 0)));
    }

    #[test]
    fn disabled_scheduler_never_fires() {
        let mut scheduler = SaveScheduler::new(SaveConfig {
            enabled: false,
            interval_minutes: 10,
        });
        assert!(!scheduler.due(at(12, 10, 0)));
    }
}
