//! Cartkeeper Core - Shared types library.
//!
//! This crate provides the domain types used across all Cartkeeper components:
//! - `storefront` - Cart store, theme preference and storage backends
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations on them - no I/O,
//! no storage access, no logging. This keeps it lightweight and allows it to
//! be used anywhere, including `wasm32` builds.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, validated products, cart lines and themes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
