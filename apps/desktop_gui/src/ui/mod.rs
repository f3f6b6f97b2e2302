//! UI layer: app shell, startup configuration, and the egui presentation surface.

pub mod app;
pub mod surface;

pub use app::{ItemManagerApp, StartupConfig};
