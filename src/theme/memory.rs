//! In-memory adapters.
//!
//! Used for server-side rendering (where there is no browser) and as test
//! fakes. Each adapter is a cheap clone around shared state, so a test can
//! hand one clone to the controller and inspect another.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::ports::{ColorSchemeSource, DocumentSink, NavigationSource, PreferenceStore, Subscription, ThemeError};
use super::preference::ResolvedTheme;
use crate::bus::ThemeChanged;

/// Single-slot store. `fail()` makes every call report a storage fault,
/// like a browser with storage disabled.
#[derive(Clone, Default)]
pub struct MemoryStore {
    value: Rc<RefCell<Option<String>>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        let store = Self::default();
        *store.value.borrow_mut() = Some(value.to_string());
        store
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    pub fn fail(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> Result<(), ThemeError> {
        if self.failing.get() {
            return Err(ThemeError::StorageUnavailable);
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, ThemeError> {
        self.check()?;
        Ok(self.value())
    }

    fn save(&self, value: &str) -> Result<(), ThemeError> {
        self.check()?;
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ThemeError> {
        self.check()?;
        *self.value.borrow_mut() = None;
        Ok(())
    }
}

type SchemeListener = Rc<RefCell<Box<dyn FnMut(ResolvedTheme)>>>;

/// Controllable color-scheme signal. `set` notifies watchers synchronously.
#[derive(Clone, Default)]
pub struct FakeColorScheme {
    scheme: Rc<Cell<Option<ResolvedTheme>>>,
    listeners: Rc<RefCell<Vec<(u64, SchemeListener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl FakeColorScheme {
    pub fn new(scheme: Option<ResolvedTheme>) -> Self {
        let fake = Self::default();
        fake.scheme.set(scheme);
        fake
    }

    pub fn light() -> Self {
        Self::new(Some(ResolvedTheme::Light))
    }

    pub fn dark() -> Self {
        Self::new(Some(ResolvedTheme::Dark))
    }

    /// An environment that cannot report a scheme at all.
    pub fn undetectable() -> Self {
        Self::new(None)
    }

    /// Change the reported scheme and notify watchers.
    pub fn set(&self, scheme: ResolvedTheme) {
        self.scheme.set(Some(scheme));
        // Snapshot so listeners can be added or dropped while notifying
        let listeners: Vec<SchemeListener> =
            self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            (&mut *listener.borrow_mut())(scheme);
        }
    }

    pub fn watcher_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ColorSchemeSource for FakeColorScheme {
    fn current(&self) -> Option<ResolvedTheme> {
        self.scheme.get()
    }

    fn watch(&self, on_change: Box<dyn FnMut(ResolvedTheme)>) -> Result<Subscription, ThemeError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(on_change))));

        let listeners = Rc::clone(&self.listeners);
        Ok(Subscription::new(OnDrop(Some(Box::new(move || {
            listeners.borrow_mut().retain(|(other, _)| *other != id);
        })))))
    }
}

/// Records what the controller did to the document.
#[derive(Clone, Default)]
pub struct RecordingDocument {
    dark: Rc<Cell<bool>>,
    events: Rc<RefCell<Vec<ThemeChanged>>>,
}

impl RecordingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dark marker is currently present.
    pub fn has_dark_marker(&self) -> bool {
        self.dark.get()
    }

    pub fn events(&self) -> Vec<ThemeChanged> {
        self.events.borrow().clone()
    }
}

impl DocumentSink for RecordingDocument {
    fn set_dark_marker(&self, dark: bool) -> Result<(), ThemeError> {
        self.dark.set(dark);
        Ok(())
    }

    fn dispatch_theme_changed(&self, event: &ThemeChanged) -> Result<(), ThemeError> {
        self.events.borrow_mut().push(*event);
        Ok(())
    }
}

/// Host navigation signal driven by hand.
#[derive(Clone, Default)]
pub struct ManualNavigation {
    listeners: Rc<RefCell<Vec<(u64, Rc<RefCell<Box<dyn FnMut()>>>)>>>,
    next_id: Rc<Cell<u64>>,
}

impl ManualNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigated(&self) {
        let listeners: Vec<_> = self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            (&mut *listener.borrow_mut())();
        }
    }

    pub fn watcher_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl NavigationSource for ManualNavigation {
    fn watch(&self, on_navigated: Box<dyn FnMut()>) -> Result<Subscription, ThemeError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(on_navigated))));

        let listeners = Rc::clone(&self.listeners);
        Ok(Subscription::new(OnDrop(Some(Box::new(move || {
            listeners.borrow_mut().retain(|(other, _)| *other != id);
        })))))
    }
}

/// Runs a closure once when dropped.
struct OnDrop(Option<Box<dyn FnOnce()>>);

impl Drop for OnDrop {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}
