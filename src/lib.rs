//! Site front-end
//!
//! Client-side behaviour for a small static marketing site.
//!
//! This library provides:
//! - A light/dark/system theme controller with injectable storage,
//!   color-scheme and document adapters
//! - A broadcast bus for `theme-changed` notifications
//! - Dioxus pages, layout and theme switcher components
//! - An axum server rendering the page shells (`server` feature)

pub mod app;
pub mod bus;
pub mod config;
#[cfg(feature = "server")]
pub mod server;
pub mod theme;
