//! Boundaries between the theme controller and its environment.
//!
//! The controller never touches browser globals directly. Storage, the
//! color-scheme media signal, the document root and host navigation are
//! injected through these traits so the same controller runs in the browser,
//! during SSR and under test.

use thiserror::Error;

use super::preference::ResolvedTheme;
use crate::bus::ThemeChanged;

/// Faults reported by platform adapters. None of these are fatal; the
/// controller logs them and falls back to defaults.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("preference storage is unavailable")]
    StorageUnavailable,

    #[error("preference storage failed: {0}")]
    Storage(String),

    #[error("color-scheme media query is unavailable")]
    MediaQueryUnavailable,

    #[error("document root is unavailable")]
    DocumentUnavailable,

    #[error("failed to dispatch theme event: {0}")]
    Dispatch(String),
}

/// Durable single-key storage for the preference string.
pub trait PreferenceStore {
    fn load(&self) -> Result<Option<String>, ThemeError>;
    fn save(&self, value: &str) -> Result<(), ThemeError>;
    fn clear(&self) -> Result<(), ThemeError>;
}

/// The environment's "prefers dark" signal.
pub trait ColorSchemeSource {
    /// Current scheme, `None` when it cannot be detected.
    fn current(&self) -> Option<ResolvedTheme>;

    /// Register for scheme changes. Dropping the returned guard unsubscribes.
    fn watch(&self, on_change: Box<dyn FnMut(ResolvedTheme)>) -> Result<Subscription, ThemeError>;
}

/// The document-wide representation of the resolved theme.
pub trait DocumentSink {
    fn set_dark_marker(&self, dark: bool) -> Result<(), ThemeError>;
    fn dispatch_theme_changed(&self, event: &ThemeChanged) -> Result<(), ThemeError>;
}

/// The host's "page content replaced without a reload" notification.
pub trait NavigationSource {
    fn watch(&self, on_navigated: Box<dyn FnMut()>) -> Result<Subscription, ThemeError>;
}

/// RAII listener registration. Whatever the adapter stores in here is
/// dropped (and the listener removed) when the subscription is dropped.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    pub fn new<G: 'static>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn detached() -> Self {
        Self::new(())
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
