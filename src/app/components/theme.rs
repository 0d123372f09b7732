//! Theme switcher and toggle components.

use dioxus::prelude::*;

use crate::app::theme::use_theme;
use crate::theme::ThemePreference;

/// Three-way switcher (light / dark / system). The active choice is marked
/// with `aria-pressed`.
#[component]
pub fn ThemeSwitcher() -> Element {
    let theme = use_theme();
    let stored = theme.stored();

    rsx! {
        div { class: "theme-switcher", role: "group", aria_label: "Theme",
            for preference in [ThemePreference::Light, ThemePreference::Dark, ThemePreference::System] {
                button {
                    key: "{preference}",
                    id: "theme-{preference}",
                    r#type: "button",
                    class: if stored == preference { "active" } else { "" },
                    aria_pressed: if stored == preference { "true" } else { "false" },
                    onclick: move |_| theme.set(preference),
                    "{preference.label()}"
                }
            }
        }
    }
}

/// Single button cycling system -> light -> dark. The icon follows the
/// resolved theme so "system" still shows what is on screen.
#[component]
pub fn ThemeToggle() -> Element {
    let theme = use_theme();
    let snapshot = theme.get();
    let icon = if theme.is_resolved_to_dark() { "\u{263E}" } else { "\u{2600}" };
    let title = format!("Theme: {} (click to change)", snapshot.stored.label());

    rsx! {
        button {
            class: "theme-toggle",
            r#type: "button",
            title: "{title}",
            aria_label: "{title}",
            "data-theme-stored": "{snapshot.stored}",
            onclick: move |_| theme.toggle(),
            "{icon}"
        }
    }
}
