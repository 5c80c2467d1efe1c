//! String-keyed, string-valued durable maps the kitchen store persists into.
//!
//! The store is the only caller. Each key holds one whole collection snapshot
//! and every `set` overwrites the previous value wholesale.

pub trait KvBackend: Send + Sync {
    /// Returns `None` when nothing has ever been stored under `key`.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

impl<T: KvBackend + ?Sized> KvBackend for Box<T> {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set(key, value)
    }
}

pub mod file;
pub mod memory;
pub mod sqlite;

pub use file::FileBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBackend;
