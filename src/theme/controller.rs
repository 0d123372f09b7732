//! The theme preference controller.
//!
//! `ThemeController` is the single source of truth for the active theme. It
//! bridges durable storage, the environment's color-scheme signal and the
//! document root. `ThemeHandle` shares one controller between the UI and
//! the listeners registered at initialization.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::ports::{ColorSchemeSource, DocumentSink, NavigationSource, PreferenceStore, Subscription};
use super::preference::{compute_theme, ResolvedTheme, ThemePreference, ThemeSnapshot};
use crate::bus::{SharedBus, ThemeChanged};

/// Owns the stored preference and the resolved theme applied to the document.
pub struct ThemeController {
    store: Box<dyn PreferenceStore>,
    scheme: Rc<dyn ColorSchemeSource>,
    document: Box<dyn DocumentSink>,
    bus: SharedBus,
    stored: ThemePreference,
    current: ResolvedTheme,
    initialized: bool,
}

impl ThemeController {
    pub fn new(
        store: Box<dyn PreferenceStore>,
        scheme: Rc<dyn ColorSchemeSource>,
        document: Box<dyn DocumentSink>,
        bus: SharedBus,
    ) -> Self {
        Self {
            store,
            scheme,
            document,
            bus,
            stored: ThemePreference::System,
            current: ResolvedTheme::Light,
            initialized: false,
        }
    }

    /// Load the stored preference, resolve it and apply it to the document.
    ///
    /// Storage faults and unknown stored values both mean `System`.
    pub fn initialize(&mut self) {
        if self.initialized {
            tracing::warn!("Theme controller already initialized, ignoring");
            return;
        }
        self.initialized = true;

        self.stored = match self.store.load() {
            Ok(Some(value)) => {
                let parsed = ThemePreference::parse(&value);
                if parsed.as_str() != value {
                    tracing::debug!("Ignoring unknown stored theme {:?}", value);
                }
                parsed
            }
            Ok(None) => ThemePreference::System,
            Err(e) => {
                tracing::warn!("Theme storage read failed, using system: {}", e);
                ThemePreference::System
            }
        };

        self.current = self.compute(self.stored);
        tracing::debug!("Theme initialized: stored={} resolved={}", self.stored, self.current);
        self.apply();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Persist, resolve and apply a new preference.
    pub fn set_theme(&mut self, preference: ThemePreference) {
        self.stored = preference;

        let persisted = match preference.stored_value() {
            Some(value) => self.store.save(value),
            None => self.store.clear(),
        };
        if let Err(e) = persisted {
            // Preference still holds for this session
            tracing::warn!("Failed to persist theme {}: {}", preference, e);
        }

        self.current = self.compute(preference);
        tracing::debug!("Theme set: stored={} resolved={}", self.stored, self.current);
        self.apply();
    }

    /// String entry point for untyped bindings. Unknown values are ignored
    /// without touching state or emitting anything.
    pub fn set_theme_str(&mut self, value: &str) -> bool {
        match ThemePreference::parse_strict(value) {
            Some(preference) => {
                self.set_theme(preference);
                true
            }
            None => {
                tracing::warn!("Ignoring invalid theme {:?}", value);
                false
            }
        }
    }

    pub fn set_light(&mut self) {
        self.set_theme(ThemePreference::Light);
    }

    pub fn set_dark(&mut self) {
        self.set_theme(ThemePreference::Dark);
    }

    pub fn set_system(&mut self) {
        self.set_theme(ThemePreference::System);
    }

    /// Cycle system -> light -> dark -> system.
    ///
    /// Anything unrecognised was already mapped to `System` on load, so the
    /// cycle always restarts from there.
    pub fn toggle(&mut self) {
        self.set_theme(self.stored.next());
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot::new(self.stored, self.current)
    }

    /// Alias of [`snapshot`](Self::snapshot) for template-style bindings.
    pub fn get(&self) -> ThemeSnapshot {
        self.snapshot()
    }

    pub fn stored(&self) -> ThemePreference {
        self.stored
    }

    pub fn current(&self) -> ResolvedTheme {
        self.current
    }

    pub fn is_light(&self) -> bool {
        self.stored == ThemePreference::Light
    }

    pub fn is_dark(&self) -> bool {
        self.stored == ThemePreference::Dark
    }

    pub fn is_system(&self) -> bool {
        self.stored == ThemePreference::System
    }

    /// Resolved lightness. While on `System` this is the theme last applied,
    /// so it always agrees with the document marker.
    pub fn is_resolved_to_light(&self) -> bool {
        if self.is_system() {
            return self.current == ResolvedTheme::Light;
        }
        self.is_light()
    }

    pub fn is_resolved_to_dark(&self) -> bool {
        if self.is_system() {
            return self.current == ResolvedTheme::Dark;
        }
        self.is_dark()
    }

    /// Environment scheme flipped. Only matters while following the system.
    pub fn on_scheme_changed(&mut self, scheme: ResolvedTheme) {
        if self.stored != ThemePreference::System {
            tracing::trace!("Ignoring scheme change to {} (stored={})", scheme, self.stored);
            return;
        }
        self.current = scheme;
        tracing::debug!("System scheme changed, resolved={}", self.current);
        self.apply();
    }

    /// Host replaced page content; re-apply the cached resolved theme.
    pub fn on_navigated(&mut self) {
        tracing::trace!("Re-applying theme {} after navigation", self.current);
        self.apply();
    }

    pub fn bus(&self) -> &SharedBus {
        &self.bus
    }

    fn compute(&self, preference: ThemePreference) -> ResolvedTheme {
        match preference {
            // Only consult the environment when it matters
            ThemePreference::System => compute_theme(preference, self.scheme.current()),
            _ => compute_theme(preference, None),
        }
    }

    fn apply(&self) {
        let theme = self.current;
        if let Err(e) = self.document.set_dark_marker(theme.is_dark()) {
            tracing::warn!("Failed to apply theme marker: {}", e);
        }

        let event = ThemeChanged { theme };
        if let Err(e) = self.document.dispatch_theme_changed(&event) {
            tracing::warn!("{}", e);
        }
        self.bus.publish(event);
    }
}

/// Shared handle to a single controller plus the listeners it owns.
///
/// Listeners hold only a weak reference to the controller; dropping the last
/// handle (or calling [`shutdown`](Self::shutdown)) removes them.
#[derive(Clone)]
pub struct ThemeHandle {
    inner: Rc<RefCell<ThemeController>>,
    subscriptions: Rc<RefCell<Vec<Subscription>>>,
}

impl ThemeHandle {
    pub fn new(controller: ThemeController) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
            subscriptions: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Initialize the controller and subscribe to environment and host
    /// navigation changes. Intended to run exactly once per document.
    pub fn initialize(&self, navigation: Option<&dyn NavigationSource>) {
        if self.inner.borrow().is_initialized() {
            tracing::warn!("Theme handle already initialized, ignoring");
            return;
        }
        self.inner.borrow_mut().initialize();

        let scheme = Rc::clone(&self.inner.borrow().scheme);
        let weak = Rc::downgrade(&self.inner);
        match scheme.watch(Box::new(move |theme: ResolvedTheme| {
            with_controller(&weak, |c| c.on_scheme_changed(theme))
        })) {
            Ok(sub) => self.subscriptions.borrow_mut().push(sub),
            Err(e) => tracing::warn!("Not following system scheme changes: {}", e),
        }

        if let Some(navigation) = navigation {
            let weak = Rc::downgrade(&self.inner);
            match navigation.watch(Box::new(move || with_controller(&weak, |c| c.on_navigated()))) {
                Ok(sub) => self.subscriptions.borrow_mut().push(sub),
                Err(e) => tracing::warn!("Not re-applying theme on navigation: {}", e),
            }
        }
    }

    /// Remove every listener registered by [`initialize`](Self::initialize).
    pub fn shutdown(&self) {
        let count = self.subscriptions.borrow().len();
        self.subscriptions.borrow_mut().clear();
        tracing::debug!("Theme listeners removed ({})", count);
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    pub fn set_theme(&self, preference: ThemePreference) {
        self.inner.borrow_mut().set_theme(preference);
    }

    pub fn set_light(&self) {
        self.inner.borrow_mut().set_light();
    }

    pub fn set_dark(&self) {
        self.inner.borrow_mut().set_dark();
    }

    pub fn set_system(&self) {
        self.inner.borrow_mut().set_system();
    }

    pub fn toggle(&self) {
        self.inner.borrow_mut().toggle();
    }

    pub fn on_navigated(&self) {
        self.inner.borrow_mut().on_navigated();
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.inner.borrow().snapshot()
    }

    pub fn is_resolved_to_light(&self) -> bool {
        self.inner.borrow().is_resolved_to_light()
    }

    pub fn is_resolved_to_dark(&self) -> bool {
        self.inner.borrow().is_resolved_to_dark()
    }

    pub fn bus(&self) -> SharedBus {
        self.inner.borrow().bus().clone()
    }
}

fn with_controller(weak: &Weak<RefCell<ThemeController>>, f: impl FnOnce(&mut ThemeController)) {
    let Some(controller) = weak.upgrade() else {
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut c) => f(&mut c),
        // Event fired from inside a controller call; the outer call applies state
        Err(_) => tracing::warn!("Theme controller busy, dropping re-entrant event"),
    };
}
