//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It dispatches, it does not decide: business rules live in
//! `commands/*.rs`, durability and ordering in `store/`.
//!
//! ## Generic Over the Backend
//!
//! `CountdownApi<B: StorageBackend>`:
//! - Production: `CountdownApi<FsBackend>` over a [`FileStore`]
//! - Testing: `CountdownApi<MemBackend>` over an [`InMemoryStore`]
//!
//! Methods take `&self`. The store serializes its own writes, so one api can
//! be shared across tasks (wrap it in an `Arc`).
//!
//! [`FileStore`]: crate::store::FileStore
//! [`InMemoryStore`]: crate::store::InMemoryStore

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{CountdownFields, CountdownPatch};
use crate::store::{CountdownStore, StorageBackend};
use chrono::{DateTime, Utc};

pub struct CountdownApi<B: StorageBackend> {
    store: CountdownStore<B>,
}

impl<B: StorageBackend> CountdownApi<B> {
    pub fn new(store: CountdownStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CountdownStore<B> {
        &self.store
    }

    pub async fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.store).await
    }

    pub async fn list(&self, now: DateTime<Utc>) -> Result<CmdResult> {
        commands::list::run(&self.store, now).await
    }

    pub async fn show(&self, id: &str, now: DateTime<Utc>) -> Result<CmdResult> {
        commands::show::run(&self.store, id, now).await
    }

    pub async fn add(&self, fields: CountdownFields) -> Result<CmdResult> {
        commands::add::run(&self.store, fields).await
    }

    pub async fn update(&self, id: &str, fields: CountdownFields) -> Result<CmdResult> {
        commands::update::run(&self.store, id, fields).await
    }

    pub async fn edit(&self, id: &str, patch: CountdownPatch) -> Result<CmdResult> {
        commands::edit::run(&self.store, id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&self.store, id).await
    }

    pub async fn export(&self) -> Result<CmdResult> {
        commands::export::run(&self.store).await
    }
}
