//! Light/dark theme preference.
//!
//! The preference lives in its own slot (`"theme"` by default) as the raw
//! literal `dark` or `light`. When nothing is stored, the environment's
//! color-scheme signal decides; detecting that signal is the caller's job.

use cartkeeper_core::Theme;

use crate::storage::{KeyValueStorage, StorageError, keys};

/// Document attribute that carries the active theme.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Element ID of the theme toggle control.
pub const THEME_SWITCH_ID: &str = "theme-switch";

/// Something that displays the active theme.
pub trait ThemeSurface {
    /// Show `theme`: set the document attribute and the toggle state.
    fn apply_theme(&mut self, theme: Theme);
}

/// In-memory surface recording what was applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeAttributes {
    /// Value of [`THEME_ATTRIBUTE`], if set.
    pub theme: Option<Theme>,
    /// Whether the toggle control is checked (dark).
    pub toggle_checked: bool,
}

impl ThemeSurface for ThemeAttributes {
    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
        self.toggle_checked = theme.is_dark();
    }
}

/// Persisted theme preference.
#[derive(Debug)]
pub struct ThemeStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ThemeStore<S> {
    /// Create a store using the default `"theme"` slot.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, keys::THEME)
    }

    /// Create a store using a custom slot name.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The stored preference.
    ///
    /// An absent or empty slot and read failures mean no preference. Any
    /// other value than `dark` is a light preference.
    #[must_use]
    pub fn stored(&self) -> Option<Theme> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read theme slot");
                return None;
            }
        };
        if raw.is_empty() {
            return None;
        }

        Some(raw.parse::<Theme>().unwrap_or_else(|e| {
            tracing::debug!(key = %self.key, error = %e, "Unknown stored theme, using light");
            Theme::Light
        }))
    }

    /// The stored preference, or the environment's when none is stored.
    #[must_use]
    pub fn resolve(&self, system_prefers_dark: bool) -> Theme {
        self.stored()
            .unwrap_or_else(|| Theme::from_prefers_dark(system_prefers_dark))
    }

    /// Resolve and apply the theme at startup. Nothing is persisted.
    pub fn apply_on_load(
        &self,
        system_prefers_dark: bool,
        surface: &mut impl ThemeSurface,
    ) -> Theme {
        let theme = self.resolve(system_prefers_dark);
        surface.apply_theme(theme);
        tracing::debug!(%theme, "Theme applied");
        theme
    }

    /// Persist `theme` as the preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn set(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set_item(&self.key, theme.as_str())?;
        tracing::info!(%theme, "Theme preference saved");
        Ok(())
    }

    /// Persist `theme` and apply it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; the surface is left
    /// untouched in that case.
    pub fn select(&self, theme: Theme, surface: &mut impl ThemeSurface) -> Result<(), StorageError> {
        self.set(theme)?;
        surface.apply_theme(theme);
        Ok(())
    }

    /// Flip the current theme, persist and apply it. Returns the new theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn toggle(
        &self,
        system_prefers_dark: bool,
        surface: &mut impl ThemeSurface,
    ) -> Result<Theme, StorageError> {
        let theme = self.resolve(system_prefers_dark).toggled();
        self.select(theme, surface)?;
        Ok(theme)
    }
}

/// Theme surface for the browser document.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::DocumentThemeSurface;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web {
    use web_sys::wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlInputElement};

    use super::{THEME_ATTRIBUTE, THEME_SWITCH_ID, Theme, ThemeSurface};
    use crate::storage::StorageError;

    /// Sets [`THEME_ATTRIBUTE`] on `<html>` and syncs the toggle checkbox.
    #[derive(Debug, Clone)]
    pub struct DocumentThemeSurface {
        root: Element,
        toggle: Option<HtmlInputElement>,
    }

    impl DocumentThemeSurface {
        /// Attach to the current document.
        ///
        /// # Errors
        ///
        /// Returns [`StorageError::Unavailable`] outside a browser document.
        pub fn new() -> Result<Self, StorageError> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or(StorageError::Unavailable)?;
            let root = document
                .document_element()
                .ok_or(StorageError::Unavailable)?;
            let toggle = document
                .get_element_by_id(THEME_SWITCH_ID)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
            Ok(Self { root, toggle })
        }
    }

    impl ThemeSurface for DocumentThemeSurface {
        fn apply_theme(&mut self, theme: Theme) {
            if let Err(e) = self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
                tracing::warn!(error = ?e, "Failed to set theme attribute");
            }
            if let Some(toggle) = &self.toggle {
                toggle.set_checked(theme.is_dark());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_nothing_stored_follows_system() {
        let store = ThemeStore::new(MemoryStorage::new());
        assert_eq!(store.stored(), None);
        assert_eq!(store.resolve(true), Theme::Dark);
        assert_eq!(store.resolve(false), Theme::Light);
    }

    #[test]
    fn test_stored_overrides_system() {
        let store = ThemeStore::new(MemoryStorage::new());
        store.set(Theme::Light).unwrap();
        assert_eq!(store.resolve(true), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_value_is_light() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::THEME, "sepia").unwrap();
        let store = ThemeStore::new(storage);

        assert_eq!(store.stored(), Some(Theme::Light));
        assert_eq!(store.resolve(true), Theme::Light);
    }

    #[test]
    fn test_empty_stored_value_follows_system() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::THEME, "").unwrap();
        let store = ThemeStore::new(storage);

        assert_eq!(store.stored(), None);
        assert_eq!(store.resolve(true), Theme::Dark);
    }

    #[test]
    fn test_apply_on_load_does_not_persist() {
        let store = ThemeStore::new(MemoryStorage::new());
        let mut surface = ThemeAttributes::default();

        assert_eq!(store.apply_on_load(true, &mut surface), Theme::Dark);
        assert_eq!(surface.theme, Some(Theme::Dark));
        assert!(surface.toggle_checked);
        assert_eq!(store.stored(), None);
    }

    #[test]
    fn test_toggle_persists_and_applies() {
        let store = ThemeStore::new(MemoryStorage::new());
        let mut surface = ThemeAttributes::default();

        assert_eq!(store.toggle(false, &mut surface).unwrap(), Theme::Dark);
        assert_eq!(store.stored(), Some(Theme::Dark));
        assert!(surface.toggle_checked);

        assert_eq!(store.toggle(false, &mut surface).unwrap(), Theme::Light);
        assert_eq!(store.stored(), Some(Theme::Light));
        assert!(!surface.toggle_checked);
    }

    #[test]
    fn test_stored_as_raw_literal() {
        let storage = Rc::new(MemoryStorage::new());
        let store = ThemeStore::new(Rc::clone(&storage));
        store.set(Theme::Dark).unwrap();

        assert_eq!(storage.get_item(keys::THEME).unwrap().as_deref(), Some("dark"));
    }
}
