use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::BlockingStore;
use crate::ui::{app::APP_TITLE, ItemManagerApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "item-manager", about = "Desktop manager for a list of named items")]
struct Cli {
    /// SQLite database file (or sqlite:// url). Defaults to the per-user data dir.
    #[arg(long, value_name = "PATH")]
    database: Option<String>,
    /// Keep items in memory only; nothing is written to disk.
    #[arg(long, conflicts_with = "database")]
    in_memory: bool,
    /// Directory holding the default database when --database is not given.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Cli {
    fn startup(self) -> StartupConfig {
        StartupConfig {
            database: self.database,
            in_memory: self.in_memory,
            data_dir: self.data_dir,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let startup = Cli::parse().startup();
    let database_url = startup.database_url()?;
    tracing::info!(database_url = %database_url, "opening item store");
    let store = BlockingStore::open(&database_url)
        .with_context(|| format!("item manager could not start with '{database_url}'"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([400.0, 500.0])
            .with_min_inner_size([320.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ItemManagerApp::new(store)))),
    )
    .map_err(|err| anyhow::anyhow!("item manager window failed: {err}"))
}
