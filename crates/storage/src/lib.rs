use anyhow::{bail, Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{Item, ItemChanges, ItemId};

pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_ITEM_TABLE: &str = "items";

/// Explicit definition of the item table handed to [`Storage`] at construction.
///
/// The column layout is fixed (`id INTEGER PRIMARY KEY, name TEXT, description TEXT`);
/// only the table name varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table: String,
}

impl TableSchema {
    pub fn new(table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        let mut chars = table.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_head || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            bail!("invalid item table name '{table}'");
        }
        Ok(Self { table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn create_table_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id          INTEGER PRIMARY KEY,
                name        TEXT,
                description TEXT
            )",
            self.table
        )
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            table: DEFAULT_ITEM_TABLE.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
    schema: TableSchema,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_schema(database_url, TableSchema::default()).await
    }

    pub async fn with_schema(database_url: &str, schema: TableSchema) -> Result<Self> {
        let database_url = prepare_database_url(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(&database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);
        // A single long-lived connection: the GUI is the only reader/writer, and an
        // in-memory database disappears with its last connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;

        sqlx::query(&schema.create_table_sql())
            .execute(&pool)
            .await
            .with_context(|| format!("failed to ensure table '{}' exists", schema.table()))?;
        tracing::info!(table = schema.table(), database_url = %database_url, "item table ready");

        Ok(Self { pool, schema })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_item(&self, name: &str, description: &str) -> Result<Item> {
        let sql = format!(
            "INSERT INTO {} (name, description) VALUES (?, ?) RETURNING id, name, description",
            self.schema.table()
        );
        let row = sqlx::query(&sql)
            .bind(name)
            .bind(description)
            .fetch_one(&self.pool)
            .await
            .context("failed to insert item")?;
        let item = item_from_row(&row)?;
        tracing::debug!(item_id = item.id.0, "created item");
        Ok(item)
    }

    pub async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>> {
        let sql = format!(
            "SELECT id, name, description FROM {} WHERE id = ?",
            self.schema.table()
        );
        let row = sqlx::query(&sql)
            .bind(item_id.0)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load item {item_id}"))?;
        row.as_ref().map(item_from_row).transpose()
    }

    /// Applies the non-empty fields of `changes`. Returns `None` when the row does not exist.
    pub async fn update_item(
        &self,
        item_id: ItemId,
        changes: &ItemChanges,
    ) -> Result<Option<Item>> {
        if changes.is_empty() {
            return self.get_item(item_id).await;
        }

        let sql = format!(
            "UPDATE {} SET name = COALESCE(?, name), description = COALESCE(?, description)
             WHERE id = ?
             RETURNING id, name, description",
            self.schema.table()
        );
        let row = sqlx::query(&sql)
            .bind(changes.name())
            .bind(changes.description())
            .bind(item_id.0)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to update item {item_id}"))?;

        let item = row.as_ref().map(item_from_row).transpose()?;
        if item.is_some() {
            tracing::debug!(item_id = item_id.0, "updated item");
        }
        Ok(item)
    }

    pub async fn delete_item(&self, item_id: ItemId) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.schema.table());
        let result = sqlx::query(&sql)
            .bind(item_id.0)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete item {item_id}"))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(item_id = item_id.0, "deleted item");
        }
        Ok(deleted)
    }

    pub async fn list_items(&self) -> Result<Vec<Item>> {
        let sql = format!(
            "SELECT id, name, description FROM {} ORDER BY id ASC",
            self.schema.table()
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list items")?;
        rows.iter().map(item_from_row).collect()
    }

    pub async fn count_items(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.schema.table());
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .context("failed to count items")?;
        Ok(count)
    }
}

fn item_from_row(row: &SqliteRow) -> Result<Item> {
    Ok(Item {
        id: ItemId(row.try_get::<i64, _>("id")?),
        name: row
            .try_get::<Option<String>, _>("name")?
            .unwrap_or_default(),
        description: row
            .try_get::<Option<String>, _>("description")?
            .unwrap_or_default(),
    })
}

/// Turns a plain path or loosely written sqlite url into a `sqlite://` url and
/// makes sure the parent directory of a file database exists.
pub fn prepare_database_url(raw_database_url: &str) -> Result<String> {
    let database_url = normalize_database_url(raw_database_url);
    ensure_sqlite_parent_dir_exists(&database_url)?;
    Ok(database_url)
}

pub fn database_url_for_path(path: &Path) -> String {
    normalize_database_url(&path.to_string_lossy())
}

/// `:memory:`, `sqlite::memory:` and its query-string variants all name a
/// transient database with no file behind it.
fn is_memory_url(database_url: &str) -> bool {
    database_url == ":memory:" || database_url.starts_with(MEMORY_DATABASE_URL)
}

fn normalize_database_url(raw_database_url: &str) -> String {
    let raw = raw_database_url.trim();
    if raw.is_empty() || raw == ":memory:" {
        return MEMORY_DATABASE_URL.to_string();
    }
    if is_memory_url(raw) || raw.contains("://") {
        return raw.to_string();
    }

    let path = raw.strip_prefix("sqlite:").unwrap_or(raw);
    format!("sqlite://{}", path.replace('\\', "/"))
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(parent) = sqlite_path(database_url)
        .and_then(|path| path.parent().map(Path::to_path_buf))
        .filter(|parent| !parent.as_os_str().is_empty())
    else {
        return Ok(());
    };

    fs::create_dir_all(&parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory_url(database_url) {
        return None;
    }

    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
