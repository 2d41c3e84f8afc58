//! Cartkeeper Storefront library.
//!
//! Browser-side storefront state, independent of any DOM:
//!
//! - [`cart`] - Persistent cart store, change observers, command dispatch and
//!   the display model renderers draw from
//! - [`theme`] - Light/dark preference
//! - [`storage`] - `localStorage`-style key-value backends
//! - [`config`] - Environment configuration
//!
//! Everything is single-threaded and synchronous: each operation reads and
//! writes storage before returning.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod storage;
pub mod theme;

pub use cart::{CartCommand, CartStore, CommandOutcome, RawProduct};
pub use config::StorefrontConfig;
pub use error::CartError;
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use theme::{ThemeStore, ThemeSurface};
