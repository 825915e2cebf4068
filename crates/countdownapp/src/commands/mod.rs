//! # Command Layer
//!
//! Every user-facing operation lives in its own submodule as a plain async
//! `run` function over a [`CountdownStore`](crate::store::CountdownStore).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate and normalize what the caller asked for
//! - Call the store, which owns durability and write ordering
//! - Pair records with their clock state when they are meant for display
//! - Return a structured [`CmdResult`]
//!
//! They do no terminal I/O and pick no exit codes. The current time is always
//! a parameter, so the same call renders the same way in a test and in `watch`.
//!
//! ## Testing Strategy
//!
//! Command tests run against `InMemoryStore` and check `CmdResult` contents,
//! including the failure paths (unknown ids, unreadable data, failed writes).
//!
//! ## Command Modules
//!
//! - [`init`]: Create the data file, seeded on first run
//! - [`list`]: All countdowns, soonest first, with their clock state
//! - [`show`]: One countdown by id
//! - [`add`]: Create a countdown
//! - [`update`]: Replace every field of a countdown
//! - [`edit`]: Change some fields, keep the rest
//! - [`delete`]: Remove a countdown
//! - [`export`]: The raw collection as JSON

use crate::clock::{evaluate, DisplayState};
use crate::model::CountdownRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod show;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A record paired with what its countdown shows at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCountdown {
    #[serde(flatten)]
    pub record: CountdownRecord,
    pub state: DisplayState,
}

impl DisplayCountdown {
    pub fn at(record: CountdownRecord, now: DateTime<Utc>) -> Self {
        let state = evaluate(now, record.target);
        Self { record, state }
    }

    /// Re-evaluate against a later instant, keeping the record.
    pub fn tick(&mut self, now: DateTime<Utc>) -> DisplayState {
        let previous = self.state;
        self.state = evaluate(now, self.record.target);
        previous
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Records a mutation wrote, as they now stand (or stood, for deletes).
    pub affected: Vec<CountdownRecord>,
    /// Records to show, with their clock state.
    pub listed: Vec<DisplayCountdown>,
    /// Serialized collection for `export`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, records: Vec<CountdownRecord>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, listed: Vec<DisplayCountdown>) -> Self {
        self.listed = listed;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
