//! # Countdown Clock
//!
//! Translates `(now, target)` into a [`DisplayState`]. The clock is a pure
//! function: it owns no timer and remembers nothing between calls. Whoever
//! renders countdowns re-invokes [`evaluate`] on its own cadence (the CLI's
//! `watch` does it once per second) and gets the same answer for the same
//! inputs every time.
//!
//! ## Decomposition
//!
//! The whole-second difference `target - now` is split as
//!
//! ```text
//! days    = diff / 86400
//! hours   = (diff % 86400) / 3600
//! minutes = (diff % 3600) / 60
//! seconds = diff % 60
//! ```
//!
//! ## Transitions
//!
//! Once `target <= now` the state is [`DisplayState::Arrived`] and stays that
//! way for every later `now`. A renderer that wants to announce the arrival
//! exactly once keeps the last state it drew and asks
//! [`DisplayState::arrived_since`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

pub const ARRIVED_LABEL: &str = "It's time!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Remaining {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: ((total % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u8,
            minutes: ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            seconds: (total % SECONDS_PER_MINUTE) as u8,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + u64::from(self.hours) * SECONDS_PER_HOUR
            + u64::from(self.minutes) * SECONDS_PER_MINUTE
            + u64::from(self.seconds)
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DisplayState {
    Remaining(Remaining),
    Arrived,
}

impl DisplayState {
    pub fn is_arrived(&self) -> bool {
        matches!(self, DisplayState::Arrived)
    }

    /// Seconds left, zero once arrived.
    pub fn total_seconds(&self) -> u64 {
        match self {
            DisplayState::Remaining(r) => r.total_seconds(),
            DisplayState::Arrived => 0,
        }
    }

    /// True only on the tick that flips `Remaining` to `Arrived`.
    pub fn arrived_since(&self, previous: &DisplayState) -> bool {
        self.is_arrived() && !previous.is_arrived()
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayState::Remaining(r) => fmt::Display::fmt(r, f),
            DisplayState::Arrived => f.write_str(ARRIVED_LABEL),
        }
    }
}

pub fn evaluate(now: DateTime<Utc>, target: DateTime<Utc>) -> DisplayState {
    if target <= now {
        return DisplayState::Arrived;
    }
    // num_seconds truncates toward zero, which is floor for a positive span.
    let diff = target.signed_duration_since(now).num_seconds();
    DisplayState::Remaining(Remaining::from_seconds(diff.max(0) as u64))
}
