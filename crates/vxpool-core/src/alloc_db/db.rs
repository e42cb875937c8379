//! SQLite-backed allocation database: connection, migrations and locking.
//!
//! Row CRUD lives in `records`; reconciliation and allocation build on top.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, Transaction};
use std::path::Path;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed allocation database.
///
/// The default database file is stored under the XDG state directory:
/// `~/.local/state/vxpool/allocations.db` on Debian.
#[derive(Clone)]
pub struct AllocDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl AllocDb {
    /// Open (or create) the default allocation database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vxpool")?;
        let db_path = xdg_dirs.place_state_file("allocations.db")?;
        Self::open_at(&db_path).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;
        let db = AllocDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vni_allocations (
                vni INTEGER PRIMARY KEY NOT NULL,
                allocated BOOLEAN NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS ix_vni_allocations_allocated
            ON vni_allocations (allocated);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Begin a transaction that already holds the database write lock.
    ///
    /// SQLite has no row locks. Issuing a write before any read takes the
    /// RESERVED lock up front, which gives the same guarantee as
    /// `SELECT ... FOR UPDATE`: no other writer can touch any row until this
    /// transaction commits or rolls back. Dropping the transaction rolls back.
    pub(crate) async fn begin_locked(&self) -> Result<Transaction<'static, Sqlite>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE vni_allocations SET allocated = allocated WHERE 0")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<AllocDb> {
    // Single connection to avoid in-memory pool handing back a different empty DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = AllocDb { pool };
    db.migrate().await?;
    Ok(db)
}
