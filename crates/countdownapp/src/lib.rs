//! # countdownapp
//!
//! The UI-agnostic core of `countdown`: a small collection of named events,
//! each counting down to a target instant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────────────────┐
//! │ UI (CLI, …)  │──▶│ api::Countdown │──▶│ commands::*::run          │
//! └──────────────┘   │ Api            │   └────────────┬─────────────┘
//!                    └────────────────┘        ┌───────┴────────┐
//!                                              ▼                ▼
//!                                   store::CountdownStore   clock::evaluate
//!                                   (durable, queued)       (pure)
//! ```
//!
//! - [`store`]: durable, concurrency-safe CRUD over one JSON file. All
//!   mutations pass through a FIFO write queue and land with an atomic
//!   temp-file rename.
//! - [`clock`]: turns `(now, target)` into "n days hh:mm:ss left" or
//!   "arrived". Holds no timer; callers re-evaluate on their own schedule.
//! - [`commands`]: one module per operation, returning structured
//!   [`commands::CmdResult`]s and never printing anything.
//! - [`api`]: the facade UIs talk to.
//! - [`config`]: where the data file lives and whether to seed it.
//!
//! The store and the clock never call each other; commands combine them.

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
