use super::*;

use shared::{
    domain::Item,
    error::{ErrorKind, ItemError},
};
use storage::MEMORY_DATABASE_URL;

use crate::backend_bridge::BlockingStore;
use crate::controller::events::NoticeSeverity;

#[derive(Default)]
struct ScriptedStore {
    items: Vec<Item>,
    next_id: i64,
    fault: Option<String>,
    list_fault: Option<String>,
    create_calls: usize,
    get_calls: usize,
    update_calls: usize,
    delete_calls: usize,
    list_calls: usize,
}

impl ScriptedStore {
    fn with_items(names: &[(&str, &str)]) -> Self {
        let mut store = Self::default();
        for (name, description) in names {
            store.insert(name, description);
        }
        store
    }

    fn insert(&mut self, name: &str, description: &str) -> Item {
        self.next_id += 1;
        let item = Item {
            id: ItemId(self.next_id),
            name: name.to_string(),
            description: description.to_string(),
        };
        self.items.push(item.clone());
        item
    }

    fn check_fault(&self) -> Result<(), ItemError> {
        match &self.fault {
            Some(message) => Err(ItemError::storage_fault(message.clone())),
            None => Ok(()),
        }
    }
}

impl ItemRepository for ScriptedStore {
    fn create(&mut self, name: &str, description: &str) -> Result<Item, ItemError> {
        self.create_calls += 1;
        self.check_fault()?;
        Ok(self.insert(name, description))
    }

    fn get(&mut self, item_id: ItemId) -> Result<Option<Item>, ItemError> {
        self.get_calls += 1;
        self.check_fault()?;
        Ok(self.items.iter().find(|item| item.id == item_id).cloned())
    }

    fn update(
        &mut self,
        item_id: ItemId,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, ItemError> {
        self.update_calls += 1;
        self.check_fault()?;
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name() {
            item.name = name.to_string();
        }
        if let Some(description) = changes.description() {
            item.description = description.to_string();
        }
        Ok(Some(item.clone()))
    }

    fn delete(&mut self, item_id: ItemId) -> Result<bool, ItemError> {
        self.delete_calls += 1;
        self.check_fault()?;
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        Ok(self.items.len() != before)
    }

    fn list_all(&mut self) -> Result<Vec<Item>, ItemError> {
        self.list_calls += 1;
        self.check_fault()?;
        if let Some(message) = &self.list_fault {
            return Err(ItemError::storage_fault(message.clone()));
        }
        Ok(self.items.clone())
    }
}

#[derive(Default)]
struct RecordingSurface {
    rows: Vec<Item>,
    selected: Option<ItemId>,
    name: String,
    description: String,
    notices: Vec<Notice>,
    populate_calls: usize,
    clear_calls: usize,
}

impl RecordingSurface {
    fn type_inputs(&mut self, name: &str, description: &str) {
        self.name = name.to_string();
        self.description = description.to_string();
    }

    fn last_notice(&self) -> &Notice {
        self.notices.last().expect("a notice was shown")
    }
}

impl PresentationSurface for RecordingSurface {
    fn populate(&mut self, items: &[Item]) {
        self.populate_calls += 1;
        self.rows = items.to_vec();
    }

    fn selected_id(&self) -> Option<ItemId> {
        self.selected
    }

    fn read_inputs(&self) -> (String, String) {
        (self.name.clone(), self.description.clone())
    }

    fn set_inputs(&mut self, name: &str, description: &str) {
        self.type_inputs(name, description);
    }

    fn clear_inputs(&mut self) {
        self.clear_calls += 1;
        self.name.clear();
        self.description.clear();
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

fn coordinator_with(items: &[(&str, &str)]) -> Coordinator<ScriptedStore, RecordingSurface> {
    Coordinator::new(ScriptedStore::with_items(items), RecordingSurface::default())
}

#[test]
fn construction_populates_the_list_once() {
    let coordinator = coordinator_with(&[("lamp", "brass"), ("mug", "blue")]);

    assert_eq!(coordinator.store().list_calls, 1);
    assert_eq!(coordinator.view().populate_calls, 1);
    assert_eq!(coordinator.view().rows.len(), 2);
    assert!(coordinator.view().notices.is_empty());
}

#[test]
fn failed_initial_load_is_reported() {
    let store = ScriptedStore {
        fault: Some("unable to open database file".to_string()),
        ..ScriptedStore::default()
    };
    let coordinator = Coordinator::new(store, RecordingSurface::default());

    assert_eq!(coordinator.view().populate_calls, 0);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::error("Failed to load items: unable to open database file")
    );
}

#[test]
fn add_with_empty_name_never_reaches_the_store() {
    let mut coordinator = coordinator_with(&[]);
    coordinator.view_mut().type_inputs("", "desc");

    coordinator.dispatch(ViewEvent::AddClicked);

    assert_eq!(coordinator.store().create_calls, 0);
    assert_eq!(coordinator.view().populate_calls, 1);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::warning(MISSING_FIELDS)
    );
}

#[test]
fn add_creates_clears_and_refreshes() {
    let mut coordinator = coordinator_with(&[]);
    coordinator.view_mut().type_inputs("lamp", "brass");

    coordinator.dispatch(ViewEvent::AddClicked);

    assert_eq!(coordinator.store().create_calls, 1);
    assert_eq!(coordinator.view().populate_calls, 2);
    assert_eq!(coordinator.view().rows.len(), 1);
    assert_eq!(coordinator.view().rows[0].name, "lamp");
    assert_eq!(coordinator.view().read_inputs(), (String::new(), String::new()));
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::success("Item added successfully!")
    );
}

#[test]
fn add_failure_shows_error_and_leaves_list_stale() {
    let mut coordinator = coordinator_with(&[]);
    coordinator.view_mut().type_inputs("lamp", "brass");
    set_fault(&mut coordinator, "disk I/O error".to_string());

    coordinator.dispatch(ViewEvent::AddClicked);

    let view = coordinator.view();
    assert_eq!(view.populate_calls, 1);
    assert_eq!(view.clear_calls, 0);
    assert_eq!(view.read_inputs(), ("lamp".to_string(), "brass".to_string()));
    let notice = view.last_notice();
    assert_eq!(notice.severity, NoticeSeverity::Error);
    assert_eq!(notice.message, "Failed to add item: disk I/O error");
}

#[test]
fn add_is_reported_failed_when_the_refresh_fails() {
    let mut coordinator = coordinator_with(&[]);
    coordinator.view_mut().type_inputs("lamp", "brass");
    coordinator.store.list_fault = Some("database disk image is malformed".to_string());

    coordinator.dispatch(ViewEvent::AddClicked);

    assert_eq!(coordinator.store().create_calls, 1);
    assert_eq!(coordinator.store().items.len(), 1);
    let view = coordinator.view();
    assert_eq!(view.read_inputs(), (String::new(), String::new()));
    assert_eq!(view.clear_calls, 1);
    assert_eq!(view.populate_calls, 1);
    assert!(view
        .notices
        .iter()
        .all(|notice| notice.severity != NoticeSeverity::Success));
    assert_eq!(
        view.notices,
        vec![Notice::error(
            "Failed to add item: database disk image is malformed"
        )]
    );
}

#[test]
fn delete_failure_shows_error_and_leaves_list_stale() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);
    coordinator.view_mut().selected = Some(ItemId(1));
    set_fault(&mut coordinator, "database is locked".to_string());

    coordinator.dispatch(ViewEvent::DeleteClicked);

    assert_eq!(coordinator.store().delete_calls, 1);
    assert_eq!(coordinator.view().populate_calls, 1);
    assert_eq!(coordinator.view().rows.len(), 1);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::error("Failed to delete item: database is locked")
    );
}

#[test]
fn delete_without_selection_warns() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);

    coordinator.dispatch(ViewEvent::DeleteClicked);

    assert_eq!(coordinator.store().delete_calls, 0);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::warning(SELECT_TO_DELETE)
    );
}

#[test]
fn delete_of_vanished_item_reports_not_found_without_refresh() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);
    coordinator.view_mut().selected = Some(ItemId(42));

    coordinator.dispatch(ViewEvent::DeleteClicked);

    assert_eq!(coordinator.store().delete_calls, 1);
    assert_eq!(coordinator.view().populate_calls, 1);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::error("Item not found.")
    );
}

#[test]
fn delete_removes_and_refreshes() {
    let mut coordinator = coordinator_with(&[("lamp", "brass"), ("mug", "blue")]);
    coordinator.view_mut().selected = Some(ItemId(1));

    coordinator.dispatch(ViewEvent::DeleteClicked);

    assert_eq!(coordinator.view().populate_calls, 2);
    assert_eq!(coordinator.view().rows.len(), 1);
    assert_eq!(coordinator.view().rows[0].name, "mug");
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::success("Item deleted successfully!")
    );
}

#[test]
fn update_checks_selection_before_fields() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);

    coordinator.dispatch(ViewEvent::UpdateClicked);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::warning(SELECT_TO_UPDATE)
    );

    coordinator.view_mut().selected = Some(ItemId(1));
    coordinator.view_mut().type_inputs("lamp", "");
    coordinator.dispatch(ViewEvent::UpdateClicked);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::warning(MISSING_FIELDS)
    );
    assert_eq!(coordinator.store().update_calls, 0);
}

#[test]
fn update_of_vanished_item_reports_not_found() {
    let mut coordinator = coordinator_with(&[]);
    coordinator.view_mut().selected = Some(ItemId(7));
    coordinator.view_mut().type_inputs("lamp", "brass");

    coordinator.dispatch(ViewEvent::UpdateClicked);

    assert_eq!(coordinator.store().update_calls, 1);
    assert_eq!(coordinator.view().populate_calls, 1);
    assert_eq!(coordinator.view().clear_calls, 0);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::error("Item not found.")
    );
}

#[test]
fn update_failure_shows_error_message() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);
    coordinator.view_mut().selected = Some(ItemId(1));
    coordinator.view_mut().type_inputs("lamp", "steel");
    set_fault(&mut coordinator, "database is locked".to_string());

    coordinator.dispatch(ViewEvent::UpdateClicked);

    assert_eq!(coordinator.view().populate_calls, 1);
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::error("Failed to update item: database is locked")
    );
}

#[test]
fn selection_fills_inputs_from_the_store() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);
    coordinator.view_mut().selected = Some(ItemId(1));

    coordinator.dispatch(ViewEvent::SelectionChanged);

    assert_eq!(
        coordinator.view().read_inputs(),
        ("lamp".to_string(), "brass".to_string())
    );
    assert!(coordinator.view().notices.is_empty());
}

#[test]
fn selection_of_vanished_item_clears_and_reports() {
    let mut coordinator = coordinator_with(&[]);
    coordinator.view_mut().type_inputs("stale", "text");
    coordinator.view_mut().selected = Some(ItemId(3));

    coordinator.dispatch(ViewEvent::SelectionChanged);

    assert_eq!(coordinator.view().read_inputs(), (String::new(), String::new()));
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::error("Selected item not found.")
    );
}

#[test]
fn selection_store_failure_clears_and_reports() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);
    coordinator.view_mut().type_inputs("stale", "text");
    coordinator.view_mut().selected = Some(ItemId(1));
    set_fault(&mut coordinator, "no such table: items".to_string());

    coordinator.dispatch(ViewEvent::SelectionChanged);

    assert_eq!(coordinator.view().read_inputs(), (String::new(), String::new()));
    assert_eq!(
        coordinator.view().last_notice(),
        &Notice::error("Failed to get item: no such table: items")
    );
}

#[test]
fn select_then_deselect_clears_inputs_silently() {
    let mut coordinator = coordinator_with(&[("lamp", "brass")]);
    coordinator.view_mut().selected = Some(ItemId(1));
    coordinator.dispatch(ViewEvent::SelectionChanged);
    assert_eq!(coordinator.view().read_inputs().0, "lamp");

    coordinator.view_mut().selected = None;
    coordinator.dispatch(ViewEvent::SelectionChanged);

    assert_eq!(coordinator.view().read_inputs(), (String::new(), String::new()));
    assert!(coordinator.view().notices.is_empty());
    assert_eq!(coordinator.store().get_calls, 1);
}

#[test]
fn validation_errors_use_the_validation_kind() {
    let coordinator = coordinator_with(&[]);
    let err = coordinator
        .require_selection(SELECT_TO_DELETE)
        .expect_err("nothing selected");
    assert_eq!(err.kind, ErrorKind::ValidationFault);
}

#[test]
fn end_to_end_add_select_update_delete_against_sqlite() {
    let store = BlockingStore::open(MEMORY_DATABASE_URL).expect("store");
    let mut coordinator = Coordinator::new(store, RecordingSurface::default());
    assert!(coordinator.view().rows.is_empty());

    coordinator.view_mut().type_inputs("A", "desc");
    coordinator.dispatch(ViewEvent::AddClicked);
    assert_eq!(coordinator.view().rows.len(), 1);
    let item_id = coordinator.view().rows[0].id;

    coordinator.view_mut().selected = Some(item_id);
    coordinator.dispatch(ViewEvent::SelectionChanged);
    assert_eq!(
        coordinator.view().read_inputs(),
        ("A".to_string(), "desc".to_string())
    );

    coordinator.view_mut().type_inputs("B", "desc");
    coordinator.dispatch(ViewEvent::UpdateClicked);
    assert_eq!(coordinator.view().rows.len(), 1);
    assert_eq!(coordinator.view().rows[0].name, "B");
    assert_eq!(coordinator.view().rows[0].id, item_id);

    coordinator.dispatch(ViewEvent::DeleteClicked);
    assert!(coordinator.view().rows.is_empty());

    let titles: Vec<_> = coordinator
        .view()
        .notices
        .iter()
        .map(|notice| notice.title())
        .collect();
    assert_eq!(titles, vec!["Success", "Success", "Success"]);
}

fn set_fault(coordinator: &mut Coordinator<ScriptedStore, RecordingSurface>, message: String) {
    coordinator.store.fault = Some(message);
}
