//! Legal pages (privacy, terms, refund). Copy is maintained outside this repo.

use dioxus::prelude::*;

use crate::app::components::Layout;

#[derive(Props, Clone, PartialEq)]
struct LegalPageProps {
    title: String,
    nav_active: String,
    summary: String,
}

#[component]
fn LegalPage(props: LegalPageProps) -> Element {
    rsx! {
        Layout { title: props.title.clone(), nav_active: props.nav_active.clone(),
            article { class: "prose",
                h1 { "{props.title}" }
                p { "{props.summary}" }
            }
        }
    }
}

#[component]
pub fn Privacy() -> Element {
    rsx! {
        LegalPage {
            title: "Privacy Policy".to_string(),
            nav_active: "privacy".to_string(),
            summary: "The only thing this site stores in your browser is your theme choice.".to_string(),
        }
    }
}

#[component]
pub fn Terms() -> Element {
    rsx! {
        LegalPage {
            title: "Terms of Service".to_string(),
            nav_active: "terms".to_string(),
            summary: "Terms governing use of this site and its products.".to_string(),
        }
    }
}

#[component]
pub fn Refund() -> Element {
    rsx! {
        LegalPage {
            title: "Refund Policy".to_string(),
            nav_active: "refund".to_string(),
            summary: "How to request a refund and what qualifies.".to_string(),
        }
    }
}
