//! Layout component wrapping all pages.

use dioxus::prelude::*;

use super::nav::Nav;
use super::theme::ThemeSwitcher;
use crate::app::theme::use_theme;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Active navigation item ID
    pub nav_active: String,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
///
/// Mounting a layout means the page content was replaced, so the resolved
/// theme is re-applied to the document.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("SITE_VERSION");
    let full_title = format!("{} - Site", props.title);

    let theme = use_theme();
    use_effect(move || theme.navigated());

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }

        Nav { active: props.nav_active.clone() }
        main { class: "max-w-5xl mx-auto px-4 mt-4",
            {props.children}
        }
        footer { class: "max-w-5xl mx-auto px-4 text-center py-3",
            ThemeSwitcher {}
            small { class: "text-muted", "v{version}" }
        }
    }
}
