//! SQLite-backed fact store.
//!
//! Each state is one row whose `funfacts` column holds the fact list as a
//! JSON array, mirroring the single-document layout `{ stateCode, funfacts }`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::FactStore;
use crate::error::{StatesError, StatesResult};
use crate::models::FactEntry;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS fun_facts (
    state_code TEXT PRIMARY KEY NOT NULL,
    funfacts   TEXT NOT NULL DEFAULT '[]'
)";

/// Fact store persisted in a SQLite database.
///
/// `rusqlite` is blocking, so every call runs on the tokio blocking pool.
#[derive(Clone)]
pub struct SqliteFactStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFactStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> StatesResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StatesResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StatesResult<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, op: F) -> StatesResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StatesResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StatesError::storage("database connection poisoned"))?;
            op(&guard)
        })
        .await
        .map_err(|e| StatesError::storage(format!("storage task failed: {e}")))?
    }
}

fn decode_facts(state_code: &str, raw: &str) -> StatesResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        StatesError::storage(format!("corrupt funfacts document for '{state_code}': {e}"))
    })
}

fn encode_facts(funfacts: &[String]) -> StatesResult<String> {
    serde_json::to_string(funfacts).map_err(|e| StatesError::storage(e.to_string()))
}

#[async_trait]
impl FactStore for SqliteFactStore {
    async fn find(&self, state_code: &str) -> StatesResult<Option<FactEntry>> {
        let code = state_code.to_string();
        self.with_conn(move |conn| {
            let raw: Option<String> = conn
                .query_row(
                    "SELECT funfacts FROM fun_facts WHERE state_code = ?1",
                    params![code],
                    |row| row.get(0),
                )
                .optional()?;
            match raw {
                Some(raw) => {
                    let funfacts = decode_facts(&code, &raw)?;
                    Ok(Some(FactEntry::new(code, funfacts)))
                }
                None => Ok(None),
            }
        })
        .await
    }

    async fn find_all(&self) -> StatesResult<Vec<FactEntry>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT state_code, funfacts FROM fun_facts ORDER BY state_code")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            let mut entries = Vec::new();
            for row in rows {
                let (code, raw) = row?;
                let funfacts = decode_facts(&code, &raw)?;
                entries.push(FactEntry::new(code, funfacts));
            }
            debug!(entries = entries.len(), "Loaded all fun facts documents");
            Ok(entries)
        })
        .await
    }

    async fn upsert(&self, entry: FactEntry) -> StatesResult<FactEntry> {
        self.with_conn(move |conn| {
            let raw = encode_facts(&entry.funfacts)?;
            conn.execute(
                "INSERT INTO fun_facts (state_code, funfacts) VALUES (?1, ?2)
                 ON CONFLICT(state_code) DO UPDATE SET funfacts = excluded.funfacts",
                params![entry.state_code, raw],
            )?;
            Ok(entry)
        })
        .await
    }

    async fn save(&self, entry: FactEntry) -> StatesResult<FactEntry> {
        self.with_conn(move |conn| {
            let raw = encode_facts(&entry.funfacts)?;
            let changed = conn.execute(
                "UPDATE fun_facts SET funfacts = ?2 WHERE state_code = ?1",
                params![entry.state_code, raw],
            )?;
            if changed == 0 {
                return Err(StatesError::storage(format!(
                    "no fun facts document for state code '{}'",
                    entry.state_code
                )));
            }
            Ok(entry)
        })
        .await
    }
}
