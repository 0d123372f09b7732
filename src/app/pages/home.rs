//! Home page component.

use dioxus::prelude::*;

use crate::app::components::Layout;

#[component]
pub fn Home() -> Element {
    rsx! {
        Layout { title: "Home".to_string(), nav_active: "home".to_string(),
            section { class: "hero",
                h1 { "Welcome" }
                p { "Pick a theme below, or let your system decide." }
            }
        }
    }
}
