//! Navigation component for the site.

use dioxus::prelude::*;

use super::theme::ThemeToggle;

/// Site pages in navigation order: (id, href, label)
pub const NAV_ITEMS: &[(&str, &str, &str)] = &[
    ("home", "/", "Home"),
    ("privacy", "/privacy", "Privacy"),
    ("terms", "/terms", "Terms"),
    ("refund", "/refund", "Refund"),
];

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "home", "terms")
    pub active: String,
}

#[component]
pub fn Nav(props: NavProps) -> Element {
    rsx! {
        nav { class: "site-nav",
            ul {
                li {
                    strong { "Site" }
                }
            }
            ul {
                for (id, href, label) in NAV_ITEMS.iter().copied() {
                    li { key: "{id}",
                        if props.active == id {
                            a { href: "{href}", "aria-current": "page", strong { "{label}" } }
                        } else {
                            a { href: "{href}", "{label}" }
                        }
                    }
                }
                li { ThemeToggle {} }
            }
        }
    }
}
