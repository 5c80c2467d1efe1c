use crate::backend::FileBackend;
use crate::backend::KvBackend;
use crate::backend::MemoryBackend;

#[cfg(feature = "sqlite")]
use crate::backend::SqliteBackend;

/// Backend selection for kitchen store persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    File,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Parse a backend name: `memory`, `file` or `sqlite` (case-insensitive).
/// Unknown names, and `sqlite` when it is not compiled in, select `File`.
pub fn parse_backend(value: &str) -> Backend {
    match value.trim().to_ascii_lowercase().as_str() {
        "memory" => Backend::Memory,
        #[cfg(feature = "sqlite")]
        "sqlite" => Backend::Sqlite,
        _ => Backend::File,
    }
}

/// Choose backend using env `KITCHEN_STORE_BACKEND`; defaults to `File`.
pub fn choose_backend_from_env() -> Backend {
    parse_backend(&std::env::var("KITCHEN_STORE_BACKEND").unwrap_or_default())
}

/// Build a backend scoped to a user profile under `<home>/.kitchen/store/`.
/// Paths can be overridden via env:
/// - `KITCHEN_STORE_DIR` for the file backend directory
/// - `KITCHEN_STORE_DB` for the SQLite file path
pub fn open_profile_backend(
    home_dir: &std::path::Path,
    backend: Option<Backend>,
) -> anyhow::Result<Box<dyn KvBackend>> {
    let base = home_dir.join(".kitchen").join("store");
    let be = backend.unwrap_or_else(choose_backend_from_env);
    tracing::debug!(backend = ?be, "opening kitchen store backend");
    let kv: Box<dyn KvBackend> = match be {
        Backend::Memory => Box::new(MemoryBackend::new()),
        Backend::File => {
            let dir = std::env::var("KITCHEN_STORE_DIR")
                .map(std::path::PathBuf::from)
                .unwrap_or(base);
            Box::new(FileBackend::new(dir))
        }
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let path = std::env::var("KITCHEN_STORE_DB")
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|_| base.join("kitchen.db"));
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            Box::new(SqliteBackend::new(path))
        }
    };
    Ok(kv)
}

/// [`open_profile_backend`] for the current user's home directory.
pub fn open_default_backend(backend: Option<Backend>) -> anyhow::Result<Box<dyn KvBackend>> {
    let Some(home) = dirs::home_dir() else {
        anyhow::bail!("could not determine the home directory");
    };
    open_profile_backend(&home, backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        assert_eq!(parse_backend("memory"), Backend::Memory);
        assert_eq!(parse_backend(" MEMORY "), Backend::Memory);
        assert_eq!(parse_backend("file"), Backend::File);
        assert_eq!(parse_backend(""), Backend::File);
        assert_eq!(parse_backend("postgres"), Backend::File);
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn parses_sqlite_when_compiled() {
        assert_eq!(parse_backend("sqlite"), Backend::Sqlite);
    }

    #[cfg(not(feature = "sqlite"))]
    #[test]
    fn sqlite_falls_back_to_file() {
        assert_eq!(parse_backend("sqlite"), Backend::File);
    }
}
