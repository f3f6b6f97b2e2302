use std::path::PathBuf;

use eframe::egui;
use storage::{database_url_for_path, MEMORY_DATABASE_URL};

use crate::backend_bridge::{BlockingStore, ItemRepository};
use crate::controller::orchestration::Coordinator;
use crate::ui::surface::EguiSurface;

pub const APP_TITLE: &str = "Item Manager";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// SQLite file path or url; wins over `data_dir`.
    pub database: Option<String>,
    pub in_memory: bool,
    pub data_dir: Option<PathBuf>,
}

impl StartupConfig {
    pub fn database_url(&self) -> anyhow::Result<String> {
        if self.in_memory {
            return Ok(MEMORY_DATABASE_URL.to_string());
        }
        if let Some(database) = &self.database {
            return Ok(database.clone());
        }
        let paths = AppPaths::from_startup(self)?;
        tracing::debug!(
            data_root = %paths.data_root.display(),
            "using default item database location"
        );
        Ok(database_url_for_path(&paths.db_path))
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn from_startup(startup: &StartupConfig) -> anyhow::Result<Self> {
        let root = if let Some(p) = &startup.data_dir {
            p.clone()
        } else {
            let base = dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
            base.join("item_manager")
        };

        Ok(Self {
            db_path: root.join("items.sqlite3"),
            data_root: root,
        })
    }
}

pub struct ItemManagerApp<R = BlockingStore> {
    coordinator: Coordinator<R, EguiSurface>,
}

impl<R: ItemRepository> ItemManagerApp<R> {
    pub fn new(store: R) -> Self {
        Self {
            coordinator: Coordinator::new(store, EguiSurface::new()),
        }
    }

    #[cfg(test)]
    pub fn coordinator(&self) -> &Coordinator<R, EguiSurface> {
        &self.coordinator
    }

    /// Renders one frame and runs every event it produced, including follow-up
    /// selection changes raised while the list was repopulated.
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut events = self.coordinator.view_mut().show(ctx);
        let handled_any = !events.is_empty();
        while !events.is_empty() {
            for event in events {
                self.coordinator.dispatch(event);
            }
            events = self.coordinator.view_mut().take_events();
        }
        if handled_any {
            ctx.request_repaint();
        }
    }
}

impl<R: ItemRepository> eframe::App for ItemManagerApp<R> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }
}
