//! Theme preference commands.
//!
//! # Usage
//!
//! ```bash
//! ck-cli theme show --prefers-dark
//! ck-cli theme set light
//! ck-cli theme toggle
//! ```
//!
//! The CLI has no color-scheme signal of its own; `--prefers-dark` supplies
//! it for when no preference is stored.

#![allow(clippy::print_stdout)]

use cartkeeper_core::Theme;
use cartkeeper_storefront::storage::StorageError;
use cartkeeper_storefront::theme::{THEME_ATTRIBUTE, ThemeAttributes};
use cartkeeper_storefront::{JsonFileStorage, StorefrontConfig, ThemeStore};

fn open(config: &StorefrontConfig) -> ThemeStore<JsonFileStorage> {
    ThemeStore::with_key(
        JsonFileStorage::new(&config.data_file),
        config.theme_key.clone(),
    )
}

fn print_applied(surface: &ThemeAttributes) {
    if let Some(theme) = surface.theme {
        println!("{THEME_ATTRIBUTE}=\"{theme}\"");
    }
}

/// Print the active theme and whether it came from a stored preference.
pub fn show(config: &StorefrontConfig, prefers_dark: bool) {
    let store = open(config);
    let mut surface = ThemeAttributes::default();
    let theme = store.apply_on_load(prefers_dark, &mut surface);

    let source = if store.stored().is_some() {
        "saved preference"
    } else {
        "system preference"
    };
    println!("{theme} ({source})");
    print_applied(&surface);
}

/// Save a theme preference.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn set(config: &StorefrontConfig, theme: Theme) -> Result<(), StorageError> {
    let store = open(config);
    let mut surface = ThemeAttributes::default();
    store.select(theme, &mut surface)?;

    println!("Theme set to {theme}");
    print_applied(&surface);
    Ok(())
}

/// Flip between dark and light.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn toggle(config: &StorefrontConfig, prefers_dark: bool) -> Result<(), StorageError> {
    let store = open(config);
    let mut surface = ThemeAttributes::default();
    let theme = store.toggle(prefers_dark, &mut surface)?;

    println!("Theme set to {theme}");
    print_applied(&surface);
    Ok(())
}
