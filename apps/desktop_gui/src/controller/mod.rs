//! Controller layer: surface events, notices, and orchestration against the item store.

pub mod events;
pub mod orchestration;
