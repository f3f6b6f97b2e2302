//! Orchestration of surface events against the item store.

use shared::{
    domain::{ItemChanges, ItemId},
    error::ItemError,
};

use crate::backend_bridge::repository::ItemRepository;
use crate::controller::events::{notice_for_failure, Notice, Operation, ViewEvent};
use crate::ui::surface::PresentationSurface;

pub const MISSING_FIELDS: &str = "Please enter both name and description.";
pub const SELECT_TO_DELETE: &str = "Please select an item to delete.";
pub const SELECT_TO_UPDATE: &str = "Please select an item to update.";

/// Routes each surface event through validate → store call → list refresh → notice.
///
/// Holds no state of its own between events. The list is repopulated only at
/// construction and after a mutation the store confirmed.
pub struct Coordinator<R, V> {
    store: R,
    view: V,
}

impl<R, V> Coordinator<R, V>
where
    R: ItemRepository,
    V: PresentationSurface,
{
    pub fn new(store: R, view: V) -> Self {
        let mut coordinator = Self { store, view };
        if let Err(err) = coordinator.refresh_list() {
            coordinator.report_failure(Operation::Load, &err);
        }
        coordinator
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        tracing::debug!(event = event.name(), "dispatching surface event");

        let (operation, outcome) = match event {
            ViewEvent::AddClicked => (Operation::Add, self.add_item()),
            ViewEvent::DeleteClicked => (Operation::Delete, self.delete_item()),
            ViewEvent::UpdateClicked => (Operation::Update, self.update_item()),
            ViewEvent::SelectionChanged => (Operation::Select, self.show_selected()),
        };

        match outcome {
            Ok(Some(notice)) => self.view.notify(notice),
            Ok(None) => {}
            Err(err) => {
                if operation == Operation::Select {
                    self.view.clear_inputs();
                }
                self.report_failure(operation, &err);
            }
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub fn store(&self) -> &R {
        &self.store
    }

    fn report_failure(&mut self, operation: Operation, err: &ItemError) {
        tracing::warn!(?operation, kind = ?err.kind, "{}", err.message);
        self.view.notify(notice_for_failure(operation, err));
    }

    fn refresh_list(&mut self) -> Result<(), ItemError> {
        let items = self.store.list_all()?;
        self.view.populate(&items);
        Ok(())
    }

    fn require_selection(&self, message: &str) -> Result<ItemId, ItemError> {
        self.view
            .selected_id()
            .ok_or_else(|| ItemError::validation(message))
    }

    fn require_inputs(&self) -> Result<(String, String), ItemError> {
        let (name, description) = self.view.read_inputs();
        if name.is_empty() || description.is_empty() {
            return Err(ItemError::validation(MISSING_FIELDS));
        }
        Ok((name, description))
    }

    fn add_item(&mut self) -> Result<Option<Notice>, ItemError> {
        let (name, description) = self.require_inputs()?;

        let item = self.store.create(&name, &description)?;
        tracing::info!(item_id = item.id.0, "item added");
        self.view.clear_inputs();
        self.refresh_list()?;
        Ok(Some(Notice::success("Item added successfully!")))
    }

    fn delete_item(&mut self) -> Result<Option<Notice>, ItemError> {
        let item_id = self.require_selection(SELECT_TO_DELETE)?;

        if !self.store.delete(item_id)? {
            return Err(ItemError::not_found(item_id));
        }
        tracing::info!(item_id = item_id.0, "item deleted");
        self.refresh_list()?;
        Ok(Some(Notice::success("Item deleted successfully!")))
    }

    fn update_item(&mut self) -> Result<Option<Notice>, ItemError> {
        let item_id = self.require_selection(SELECT_TO_UPDATE)?;
        let (name, description) = self.require_inputs()?;

        let changes = ItemChanges::new(Some(&name), Some(&description));
        if self.store.update(item_id, &changes)?.is_none() {
            return Err(ItemError::not_found(item_id));
        }
        tracing::info!(item_id = item_id.0, "item updated");
        self.view.clear_inputs();
        self.refresh_list()?;
        Ok(Some(Notice::success("Item updated successfully!")))
    }

    fn show_selected(&mut self) -> Result<Option<Notice>, ItemError> {
        let Some(item_id) = self.view.selected_id() else {
            self.view.clear_inputs();
            return Ok(None);
        };

        let item = self
            .store
            .get(item_id)?
            .ok_or_else(|| ItemError::not_found(item_id))?;
        self.view.set_inputs(&item.name, &item.description);
        Ok(None)
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
