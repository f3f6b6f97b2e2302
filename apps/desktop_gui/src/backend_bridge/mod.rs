//! Bridge between the synchronous GUI thread and the async item store.

pub mod repository;
pub mod runtime;

pub use repository::ItemRepository;
pub use runtime::BlockingStore;
