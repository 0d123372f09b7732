//! Shared UI components.

pub mod layout;
pub mod nav;
pub mod theme;

pub use layout::Layout;
pub use nav::Nav;
pub use theme::{ThemeSwitcher, ThemeToggle};
