//! Store operations the coordinator depends on.

use shared::{
    domain::{Item, ItemChanges, ItemId},
    error::ItemError,
};

/// Synchronous item store seen from the GUI thread.
///
/// Missing rows are reported as `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// faults in the store itself.
pub trait ItemRepository {
    fn create(&mut self, name: &str, description: &str) -> Result<Item, ItemError>;

    fn get(&mut self, item_id: ItemId) -> Result<Option<Item>, ItemError>;

    fn update(&mut self, item_id: ItemId, changes: &ItemChanges)
        -> Result<Option<Item>, ItemError>;

    fn delete(&mut self, item_id: ItemId) -> Result<bool, ItemError>;

    fn list_all(&mut self) -> Result<Vec<Item>, ItemError>;
}
