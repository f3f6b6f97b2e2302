//! Runs the sqlx-backed store on a current-thread tokio runtime owned by the GUI thread.

use anyhow::Context;
use shared::{
    domain::{Item, ItemChanges, ItemId},
    error::ItemError,
};
use storage::Storage;

use crate::backend_bridge::repository::ItemRepository;

pub struct BlockingStore {
    // Dropped before the runtime that drives it.
    storage: Storage,
    runtime: tokio::runtime::Runtime,
}

impl BlockingStore {
    pub fn open(database_url: &str) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build store runtime")?;
        let storage = runtime
            .block_on(Storage::new(database_url))
            .with_context(|| format!("failed to open item store at '{database_url}'"))?;
        Ok(Self { storage, runtime })
    }
}

fn storage_fault(err: anyhow::Error) -> ItemError {
    tracing::warn!("item store fault: {err:#}");
    ItemError::storage_fault(format!("{err:#}"))
}

impl ItemRepository for BlockingStore {
    fn create(&mut self, name: &str, description: &str) -> Result<Item, ItemError> {
        self.runtime
            .block_on(self.storage.create_item(name, description))
            .map_err(storage_fault)
    }

    fn get(&mut self, item_id: ItemId) -> Result<Option<Item>, ItemError> {
        self.runtime
            .block_on(self.storage.get_item(item_id))
            .map_err(storage_fault)
    }

    fn update(
        &mut self,
        item_id: ItemId,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, ItemError> {
        self.runtime
            .block_on(self.storage.update_item(item_id, changes))
            .map_err(storage_fault)
    }

    fn delete(&mut self, item_id: ItemId) -> Result<bool, ItemError> {
        self.runtime
            .block_on(self.storage.delete_item(item_id))
            .map_err(storage_fault)
    }

    fn list_all(&mut self) -> Result<Vec<Item>, ItemError> {
        self.runtime
            .block_on(self.storage.list_items())
            .map_err(storage_fault)
    }
}
