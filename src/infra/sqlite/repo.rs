use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::usecase::ports::repo::{PreferenceRepository, RepoError};

pub fn upsert_column_visibility(
    db_path: &Path,
    table: &str,
    visibility: &BTreeMap<String, bool>,
) -> Result<()> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start column visibility transaction")?;

    tx.execute(
        "DELETE FROM column_visibility WHERE table_name = ?1",
        [table],
    )
    .context("failed to clear existing column visibility")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO column_visibility(table_name, column_name, visible)
             VALUES (?1, ?2, ?3)",
        )
        .context("failed to prepare column visibility insert")?;

    for (column, visible) in visibility {
        let value = if *visible { 1 } else { 0 };
        insert_stmt
            .execute(params![table, column, value])
            .context("failed to insert column visibility")?;
    }

    drop(insert_stmt);
    tx.commit()
        .context("failed to commit column visibility updates")?;
    Ok(())
}

pub fn load_column_visibility(db_path: &Path, table: &str) -> Result<BTreeMap<String, bool>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT column_name, visible
             FROM column_visibility
             WHERE table_name = ?1
             ORDER BY column_name ASC",
        )
        .context("failed to prepare column visibility query")?;

    let visibility_iter = stmt
        .query_map([table], |row| {
            let column: String = row.get(0)?;
            let visible: i64 = row.get(1)?;
            Ok((column, visible != 0))
        })
        .context("failed to query column visibility")?;

    let mut visibility = BTreeMap::new();
    for item in visibility_iter {
        let (column, visible) = item.context("failed to read column visibility row")?;
        visibility.insert(column, visible);
    }

    Ok(visibility)
}

const SESSION_ID_KEY: &str = "session_id";

pub fn load_setting(db_path: &Path, key: &str) -> Result<Option<String>> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT value FROM app_setting WHERE key = ?1", [key], |row| {
        row.get(0)
    })
    .optional()
    .with_context(|| format!("failed to load setting {key}"))
}

pub fn store_setting(db_path: &Path, key: &str, value: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO app_setting(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        params![key, value],
    )
    .with_context(|| format!("failed to store setting {key}"))?;
    Ok(())
}

pub struct SqlitePreferences {
    pub db_path: PathBuf,
}

impl PreferenceRepository for SqlitePreferences {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn load_column_visibility(&self, table: &str) -> Result<BTreeMap<String, bool>, RepoError> {
        load_column_visibility(&self.db_path, table)
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn upsert_column_visibility(
        &self,
        table: &str,
        visibility: &BTreeMap<String, bool>,
    ) -> Result<(), RepoError> {
        upsert_column_visibility(&self.db_path, table, visibility)
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn load_session_id(&self) -> Result<Option<String>, RepoError> {
        load_setting(&self.db_path, SESSION_ID_KEY)
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn store_session_id(&self, session_id: &str) -> Result<(), RepoError> {
        store_setting(&self.db_path, SESSION_ID_KEY, session_id)
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }
}
