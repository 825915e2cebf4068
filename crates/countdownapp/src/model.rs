//! # Domain Model: Countdown Records and Field Normalization
//!
//! A [`CountdownRecord`] is one event: an opaque `id`, display metadata and the
//! `target` instant the countdown runs towards. Callers never build records
//! directly; they hand [`CountdownFields`] to the store, which assigns the id.
//!
//! ## Normalization
//!
//! Input arrives from forms and command lines, so it is messy. Every write goes
//! through [`CountdownFields::normalized`]:
//!
//! | Field         | Rule                                   |
//! |---------------|----------------------------------------|
//! | `title`       | trimmed, blank becomes `Untitled`      |
//! | `description` | trimmed, may stay empty                |
//! | `emoji`       | trimmed, blank becomes `⏳`            |
//! | `color`       | trimmed, blank becomes `#8B5CF6`       |
//!
//! Normalization never fails. Bad input is coerced, not rejected.
//!
//! ## Targets From Form Input
//!
//! Admin input supplies a date (`YYYY-MM-DD`) and an optional time (`HH:MM`),
//! both meant in the operator's local timezone. [`parse_target`] turns that
//! pair into an absolute instant. [`parse_instant`] accepts a full RFC 3339
//! timestamp instead.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CountdownError, Result};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_EMOJI: &str = "⏳";
pub const DEFAULT_COLOR: &str = "#8B5CF6";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownRecord {
    pub id: String,
    pub title: String,
    // Older files may omit the display fields entirely.
    #[serde(default)]
    pub description: String,
    pub target: DateTime<Utc>,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub color: String,
}

impl CountdownRecord {
    /// Build a record from candidate fields, normalizing them on the way in.
    pub fn from_fields(id: String, fields: &CountdownFields) -> Self {
        let fields = fields.normalized();
        Self {
            id,
            title: fields.title,
            description: fields.description,
            target: fields.target,
            emoji: fields.emoji,
            color: fields.color,
        }
    }

    /// Replace every non-id field. The id is never touched.
    pub fn apply(&mut self, fields: &CountdownFields) {
        let fields = fields.normalized();
        self.title = fields.title;
        self.description = fields.description;
        self.target = fields.target;
        self.emoji = fields.emoji;
        self.color = fields.color;
    }

    pub fn fields(&self) -> CountdownFields {
        CountdownFields {
            title: self.title.clone(),
            description: self.description.clone(),
            target: self.target,
            emoji: self.emoji.clone(),
            color: self.color.clone(),
        }
    }
}

/// The caller-supplied, non-identity part of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target: DateTime<Utc>,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub color: String,
}

impl CountdownFields {
    pub fn new(title: impl Into<String>, target: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            target,
            emoji: String::new(),
            color: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn normalized(&self) -> Self {
        Self {
            title: or_default(&self.title, DEFAULT_TITLE),
            description: self.description.trim().to_string(),
            target: self.target,
            emoji: or_default(&self.emoji, DEFAULT_EMOJI),
            color: or_default(&self.color, DEFAULT_COLOR),
        }
    }
}

/// A partial edit: `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target: Option<DateTime<Utc>>,
    pub emoji: Option<String>,
    pub color: Option<String>,
}

impl CountdownPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.target.is_none()
            && self.emoji.is_none()
            && self.color.is_none()
    }

    /// Merge onto existing fields, producing the full replacement set.
    pub fn merge_into(&self, mut fields: CountdownFields) -> CountdownFields {
        if let Some(title) = &self.title {
            fields.title = title.clone();
        }
        if let Some(description) = &self.description {
            fields.description = description.clone();
        }
        if let Some(target) = self.target {
            fields.target = target;
        }
        if let Some(emoji) = &self.emoji {
            fields.emoji = emoji.clone();
        }
        if let Some(color) = &self.color {
            fields.color = color.clone();
        }
        fields
    }
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Fresh record id: 32 lowercase hex chars, safe in URLs and file names.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The example events written when a data file is first created.
pub fn seed_fields(now: DateTime<Utc>) -> Vec<CountdownFields> {
    vec![
        CountdownFields::new("Anniversary", now + Duration::days(30))
            .with_description("Celebrating love and good times")
            .with_emoji("💖")
            .with_color("#FF6EC7"),
        CountdownFields::new("Vacation", now + Duration::days(75))
            .with_description("Sunshine, sea, and serenity")
            .with_emoji("🏝️")
            .with_color("#00D1FF"),
    ]
}

/// Interpret a `YYYY-MM-DD` date and optional `HH:MM` time in the local timezone.
pub fn parse_target(date: &str, time: Option<&str>) -> Result<DateTime<Utc>> {
    let date = date.trim();
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
        CountdownError::InvalidTarget(format!("'{}' is not a YYYY-MM-DD date ({})", date, e))
    })?;

    let clock = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M").map_err(|e| {
            CountdownError::InvalidTarget(format!("'{}' is not a HH:MM time ({})", t, e))
        })?,
        None => NaiveTime::MIN,
    };

    local_to_utc(day.and_time(clock))
}

/// Parse a full RFC 3339 timestamp such as `2030-01-01T09:00:00+01:00`.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            CountdownError::InvalidTarget(format!("'{}' is not an RFC 3339 timestamp ({})", value, e))
        })
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    // In a DST gap the wall-clock time does not exist; in an overlap take the first.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            CountdownError::InvalidTarget(format!("{} does not exist in the local timezone", naive))
        })
}
