//! Synchronous string-keyed storage that outlives a single run.
//!
//! The engine only ever talks to [`KeyValueStore`]; which backend sits behind
//! it is decided by the caller.

mod file;
mod memory;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Error raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage file {} is corrupted: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn delete(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}
