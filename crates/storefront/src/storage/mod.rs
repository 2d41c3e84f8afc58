//! Key-value storage backends.
//!
//! The cart and theme are persisted the way a browser would keep them in
//! `localStorage`: each lives in a single named slot holding a string value.
//! [`KeyValueStorage`] abstracts over where those slots live:
//!
//! - [`MemoryStorage`] - in-process map, for tests and ephemeral sessions
//! - [`JsonFileStorage`] - one JSON object on disk, used by the CLI
//! - `LocalStorage` - `window.localStorage` (`web` feature, `wasm32` only)
//!
//! Storage is shared by reference: all methods take `&self`, so one backend
//! can serve both the cart store and the theme store.
//!
//! # Limitations
//!
//! Several tabs or processes writing the same storage are last-writer-wins.
//! There is no locking or versioning of slot values.

mod file;
mod memory;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

use std::rc::Rc;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::LocalStorage;

/// Storage slot names.
pub mod keys {
    /// Slot holding the serialized cart.
    pub const CART: &str = "shoppingCart";

    /// Slot holding the theme preference.
    pub const THEME: &str = "theme";
}

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("storage file is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No storage is available in this environment.
    #[error("storage is unavailable")]
    Unavailable,

    /// The backend reported an error.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A string key-value store with `localStorage` semantics.
pub trait KeyValueStorage {
    /// Read a slot. Returns `None` if the slot has never been written or was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
