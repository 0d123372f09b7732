//! Dioxus application entry point.
//!
//! Provides the root App component. The theme provider sits above the
//! router so one controller serves every page.

use dioxus::prelude::*;

pub mod components;
pub mod pages;
pub mod theme;

use pages::{Home, Privacy, Refund, Terms};
use theme::ThemeRoot;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    rsx! {
        ThemeRoot {
            Router::<Route> {}
        }
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/privacy")]
    Privacy {},
    #[route("/terms")]
    Terms {},
    #[route("/refund")]
    Refund {},
}
