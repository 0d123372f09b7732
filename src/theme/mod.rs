//! Light/dark/system theme preference.
//!
//! - `preference` - the value types and the pure resolution rule
//! - `controller` - the stateful controller and its shared handle
//! - `ports` - traits for storage, environment, document and navigation
//! - `memory` - in-process adapters (SSR and tests)
//! - `web` - browser adapters (wasm32 only)

pub mod controller;
pub mod memory;
pub mod ports;
pub mod preference;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::{ThemeController, ThemeHandle};
pub use ports::{ColorSchemeSource, DocumentSink, NavigationSource, PreferenceStore, Subscription, ThemeError};
pub use preference::{compute_theme, ResolvedTheme, ThemePreference, ThemeSnapshot};
