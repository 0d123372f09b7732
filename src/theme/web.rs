//! Browser adapters (wasm32 only).
//!
//! localStorage, `matchMedia`, the `<html>` class list and DOM events.
//! Every lookup that can fail maps to a [`ThemeError`] so the controller can
//! degrade instead of throwing.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::controller::{ThemeController, ThemeHandle};
use super::ports::{ColorSchemeSource, DocumentSink, NavigationSource, PreferenceStore, Subscription, ThemeError};
use super::preference::ResolvedTheme;
use crate::bus::{SharedBus, ThemeChanged};
use crate::config::{ThemeConfig, THEME_CONFIG_ELEMENT_ID};

fn window() -> Result<web_sys::Window, ThemeError> {
    web_sys::window().ok_or(ThemeError::DocumentUnavailable)
}

fn document() -> Result<web_sys::Document, ThemeError> {
    window()?.document().ok_or(ThemeError::DocumentUnavailable)
}

/// Read the JSON config the server embedded in the page, or defaults.
pub fn theme_config_from_document() -> ThemeConfig {
    let embedded = document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(THEME_CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match embedded {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Invalid embedded theme config, using defaults: {}", e);
            ThemeConfig::default()
        }),
        None => ThemeConfig::default(),
    }
}

/// Build a controller wired to the real browser and initialize it.
pub fn browser_theme_handle(config: &ThemeConfig, bus: SharedBus) -> ThemeHandle {
    let controller = ThemeController::new(
        Box::new(LocalStorageStore::new(&config.storage_key)),
        Rc::new(MediaQueryScheme::new(&config.media_query)),
        Box::new(DocumentRoot::new(&config.dark_class, &config.event_name)),
        bus,
    );
    let handle = ThemeHandle::new(controller);
    handle.initialize(Some(&DocumentEventNavigation::new(&config.navigation_event)));
    handle
}

pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }

    fn storage(&self) -> Result<web_sys::Storage, ThemeError> {
        // local_storage() throws when storage is disabled by the user agent
        match window()?.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            _ => Err(ThemeError::StorageUnavailable),
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>, ThemeError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| ThemeError::Storage(format!("{:?}", e)))
    }

    fn save(&self, value: &str) -> Result<(), ThemeError> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|e| ThemeError::Storage(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), ThemeError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| ThemeError::Storage(format!("{:?}", e)))
    }
}

pub struct MediaQueryScheme {
    query: String,
}

impl MediaQueryScheme {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
        }
    }

    fn media_query_list(&self) -> Result<web_sys::MediaQueryList, ThemeError> {
        match window()?.match_media(&self.query) {
            Ok(Some(list)) => Ok(list),
            _ => Err(ThemeError::MediaQueryUnavailable),
        }
    }
}

/// Removes an event listener when dropped.
struct ListenerGuard {
    target: web_sys::EventTarget,
    event: String,
    // Kept alive for as long as the listener is registered
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn listen(
    target: web_sys::EventTarget,
    event: &str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
) -> Result<Subscription, ThemeError> {
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| ThemeError::Dispatch(format!("{:?}", e)))?;
    Ok(Subscription::new(ListenerGuard {
        target,
        event: event.to_string(),
        closure,
    }))
}

impl ColorSchemeSource for MediaQueryScheme {
    fn current(&self) -> Option<ResolvedTheme> {
        self.media_query_list()
            .ok()
            .map(|list| ResolvedTheme::from_prefers_dark(list.matches()))
    }

    fn watch(&self, mut on_change: Box<dyn FnMut(ResolvedTheme)>) -> Result<Subscription, ThemeError> {
        let list = self.media_query_list()?;
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            match event.dyn_ref::<web_sys::MediaQueryListEvent>() {
                Some(change) => on_change(ResolvedTheme::from_prefers_dark(change.matches())),
                None => tracing::warn!("Unexpected color-scheme event: {}", event.type_()),
            }
        }) as Box<dyn FnMut(_)>);
        listen(list.into(), "change", closure)
    }
}

pub struct DocumentRoot {
    dark_class: String,
    event_name: String,
}

impl DocumentRoot {
    pub fn new(dark_class: &str, event_name: &str) -> Self {
        Self {
            dark_class: dark_class.to_string(),
            event_name: event_name.to_string(),
        }
    }
}

impl DocumentSink for DocumentRoot {
    fn set_dark_marker(&self, dark: bool) -> Result<(), ThemeError> {
        let root = document()?
            .document_element()
            .ok_or(ThemeError::DocumentUnavailable)?;
        let classes = root.class_list();
        let result = if dark {
            classes.add_1(&self.dark_class)
        } else {
            classes.remove_1(&self.dark_class)
        };
        result.map_err(|e| ThemeError::Dispatch(format!("{:?}", e)))
    }

    fn dispatch_theme_changed(&self, event: &ThemeChanged) -> Result<(), ThemeError> {
        let detail = serde_wasm_bindgen::to_value(event).map_err(|e| ThemeError::Dispatch(e.to_string()))?;
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        let custom = web_sys::CustomEvent::new_with_event_init_dict(&self.event_name, &init)
            .map_err(|e| ThemeError::Dispatch(format!("{:?}", e)))?;
        document()?
            .dispatch_event(&custom)
            .map(|_| ())
            .map_err(|e| ThemeError::Dispatch(format!("{:?}", e)))
    }
}

/// Host navigation announced as a DOM event on `document`.
pub struct DocumentEventNavigation {
    event_name: String,
}

impl DocumentEventNavigation {
    pub fn new(event_name: &str) -> Self {
        Self {
            event_name: event_name.to_string(),
        }
    }
}

impl NavigationSource for DocumentEventNavigation {
    fn watch(&self, mut on_navigated: Box<dyn FnMut()>) -> Result<Subscription, ThemeError> {
        let doc = document()?;
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            on_navigated();
        }) as Box<dyn FnMut(_)>);
        listen(doc.into(), &self.event_name, closure)
    }
}
