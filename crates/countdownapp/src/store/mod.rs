//! # Storage Layer
//!
//! The countdown collection lives in a single JSON file. This module owns
//! that file: nothing else in the crate reads or writes it.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: raw, blocking, whole-collection I/O.
//!   - [`fs_backend::FsBackend`]: production, one JSON file on disk.
//!   - [`mem_backend::MemBackend`]: tests; can simulate write failures and
//!     corrupt content.
//! - [`countdown_store::CountdownStore`]: the async CRUD surface, generic over
//!   the backend. Owns the write queue.
//!
//! ## Write Queue
//!
//! Every mutation (`insert`, `update_by_id`, `patch_by_id`, `delete_by_id`, and the creation
//! step of `initialize`) waits for its turn on a fair mutex, then loads the
//! current list, applies its change and saves, all before releasing the turn.
//! Turns are granted in request order. A failed write releases its turn like
//! any other, so it cannot wedge the writers behind it.
//!
//! Inside its turn a writer also takes [`backend::StorageBackend::lock`].
//! For `FsBackend` that is an exclusive advisory lock on a sidecar
//! `.countdowns.json.lock`, which serializes writers from other processes
//! (two `countdown add` runs at once) as well as other store instances on
//! the same file.
//!
//! Reads (`list`, `try_list`, `get`) skip the queue. They can miss a write
//! that is still in flight, but they never see a partial file, because every
//! save goes to a temp file that is then renamed over the data file.
//!
//! ## Storage Format
//!
//! ```text
//! countdowns.json
//! [
//!   {
//!     "id": "0f6c…",
//!     "title": "Vacation",
//!     "description": "Sunshine, sea, and serenity",
//!     "target": "2030-07-01T10:00:00Z",
//!     "emoji": "🏝️",
//!     "color": "#00D1FF"
//!   }
//! ]
//! ```

pub mod backend;
pub mod countdown_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::{StorageBackend, WriteLock};
pub use countdown_store::{CountdownStore, FileStore, InMemoryStore};
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
