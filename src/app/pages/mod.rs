//! Page components.

mod home;
mod legal;

pub use home::Home;
pub use legal::{Privacy, Refund, Terms};

use dioxus::prelude::*;

/// Server-renderable pages, one per route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SitePage {
    Home,
    Privacy,
    Terms,
    Refund,
}

impl SitePage {
    pub const ALL: [SitePage; 4] = [SitePage::Home, SitePage::Privacy, SitePage::Terms, SitePage::Refund];

    pub fn path(&self) -> &'static str {
        match self {
            SitePage::Home => "/",
            SitePage::Privacy => "/privacy",
            SitePage::Terms => "/terms",
            SitePage::Refund => "/refund",
        }
    }

    pub fn render(&self) -> Element {
        match self {
            SitePage::Home => rsx! { Home {} },
            SitePage::Privacy => rsx! { Privacy {} },
            SitePage::Terms => rsx! { Terms {} },
            SitePage::Refund => rsx! { Refund {} },
        }
    }
}
