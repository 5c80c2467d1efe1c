#[cfg(feature = "sqlite")]
use super::KvBackend;
#[cfg(feature = "sqlite")]
use rusqlite::Connection;
#[cfg(feature = "sqlite")]
use rusqlite::OptionalExtension;
#[cfg(feature = "sqlite")]
use rusqlite::params;

#[cfg(feature = "sqlite")]
fn init_db(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

#[cfg(feature = "sqlite")]
fn open_conn(path: &std::path::Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

/// Key-value table in a SQLite file; one row per collection.
#[cfg(feature = "sqlite")]
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: std::path::PathBuf,
}

#[cfg(feature = "sqlite")]
impl SqliteBackend {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl KvBackend for SqliteBackend {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let conn = open_conn(&self.path)?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let conn = open_conn(&self.path)?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
