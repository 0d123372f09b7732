//! Theme context for the Dioxus UI.
//!
//! Owns the single theme controller for the document and exposes its state
//! as a signal, so components re-render on every applied change, including
//! ones that did not come from a click (system scheme flips, navigation).

use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;

use crate::bus::create_bus;
use crate::theme::{ResolvedTheme, ThemeHandle, ThemePreference, ThemeSnapshot};

/// Global theme state shared via context
#[derive(Clone, Copy)]
pub struct ThemeContext {
    handle: Signal<ThemeHandle>,
    snapshot: Signal<ThemeSnapshot>,
}

impl ThemeContext {
    /// Current state (subscribes the caller to changes)
    pub fn get(&self) -> ThemeSnapshot {
        (self.snapshot)()
    }

    pub fn stored(&self) -> ThemePreference {
        self.get().stored
    }

    pub fn current(&self) -> ResolvedTheme {
        self.get().current
    }

    pub fn is_light(&self) -> bool {
        self.get().is_light
    }

    pub fn is_dark(&self) -> bool {
        self.get().is_dark
    }

    pub fn is_system(&self) -> bool {
        self.get().is_system
    }

    pub fn is_resolved_to_light(&self) -> bool {
        let _ = self.get();
        self.handle.peek().is_resolved_to_light()
    }

    pub fn is_resolved_to_dark(&self) -> bool {
        let _ = self.get();
        self.handle.peek().is_resolved_to_dark()
    }

    pub fn set(&self, preference: ThemePreference) {
        self.handle.peek().set_theme(preference);
        self.refresh();
    }

    pub fn set_light(&self) {
        self.set(ThemePreference::Light);
    }

    pub fn set_dark(&self) {
        self.set(ThemePreference::Dark);
    }

    pub fn set_system(&self) {
        self.set(ThemePreference::System);
    }

    pub fn toggle(&self) {
        self.handle.peek().toggle();
        self.refresh();
    }

    /// Page content was swapped in place; re-apply the resolved theme
    pub fn navigated(&self) {
        self.handle.peek().on_navigated();
    }

    fn refresh(&self) {
        let mut snapshot = self.snapshot;
        snapshot.set(self.handle.peek().snapshot());
    }
}

/// Initialize theme context provider - call once at app root
pub fn use_theme_provider() -> ThemeContext {
    use_theme_provider_with(create_handle)
}

/// Same as [`use_theme_provider`] over a caller-built handle. `create` runs
/// once, on first render.
pub fn use_theme_provider_with(create: impl FnOnce() -> ThemeHandle) -> ThemeContext {
    let handle = use_signal(create);
    let snapshot = use_signal(|| handle.peek().snapshot());

    let ctx = ThemeContext { handle, snapshot };
    use_context_provider(|| ctx);

    // Follow changes the UI did not initiate
    use_hook(move || {
        let mut rx = handle.peek().bus().subscribe();
        spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(_) | Err(RecvError::Lagged(_)) => {
                        let mut snapshot = snapshot;
                        snapshot.set(handle.peek().snapshot());
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    });

    ctx
}

/// Get theme context - use in any component
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}

/// Wraps children with the theme provider. Used as the app root and as the
/// root of server-rendered pages.
#[component]
pub fn ThemeRoot(children: Element) -> Element {
    use_theme_provider();

    rsx! {
        {children}
    }
}

#[cfg(target_arch = "wasm32")]
fn create_handle() -> ThemeHandle {
    let config = crate::theme::web::theme_config_from_document();
    crate::theme::web::browser_theme_handle(&config, create_bus())
}

/// No browser on the server: render as "system" with no detectable scheme.
/// The boot script in the page head sets the real marker before paint.
#[cfg(not(target_arch = "wasm32"))]
fn create_handle() -> ThemeHandle {
    memory_handle(crate::theme::memory::FakeColorScheme::undetectable())
}

#[cfg(not(target_arch = "wasm32"))]
fn memory_handle(scheme: crate::theme::memory::FakeColorScheme) -> ThemeHandle {
    use crate::theme::memory::{MemoryStore, RecordingDocument};
    use crate::theme::ThemeController;
    use std::rc::Rc;

    let controller = ThemeController::new(
        Box::new(MemoryStore::new()),
        Rc::new(scheme),
        Box::new(RecordingDocument::new()),
        create_bus(),
    );
    let handle = ThemeHandle::new(controller);
    handle.initialize(None);
    handle
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::app::components::{ThemeSwitcher, ThemeToggle};
    use crate::theme::memory::FakeColorScheme;
    use std::cell::Cell;
    use std::time::Duration;

    thread_local! {
        static CONTEXT: Cell<Option<ThemeContext>> = const { Cell::new(None) };
    }

    #[component]
    fn CaptureContext() -> Element {
        let ctx = use_theme();
        use_hook(move || CONTEXT.with(|c| c.set(Some(ctx))));
        rsx! {}
    }

    #[allow(non_snake_case)]
    fn SwitcherApp() -> Element {
        rsx! {
            ThemeRoot {
                CaptureContext {}
                ThemeSwitcher {}
                ThemeToggle {}
            }
        }
    }

    #[allow(non_snake_case)]
    fn FollowerApp(scheme: FakeColorScheme) -> Element {
        use_theme_provider_with(move || memory_handle(scheme));
        rsx! {
            ThemeToggle {}
        }
    }

    fn captured() -> ThemeContext {
        CONTEXT.with(Cell::get).expect("context captured on first render")
    }

    /// Let pending tasks and dirty scopes run, then re-render.
    async fn settle(dom: &mut VirtualDom) {
        tokio::time::timeout(Duration::from_secs(1), dom.wait_for_work())
            .await
            .expect("dom should have pending work");
        let _ = dom.render_immediate_to_vec();
    }

    /// Opening tag of the element with the given id.
    fn tag<'a>(html: &'a str, id: &str) -> &'a str {
        let at = html.find(&format!(r#"id="{id}""#)).expect("element rendered");
        let start = html[..at].rfind('<').unwrap();
        let end = at + html[at..].find('>').unwrap();
        &html[start..=end]
    }

    fn pressed(html: &str, id: &str) -> bool {
        tag(html, id).contains(r#"aria-pressed="true""#)
    }

    #[tokio::test]
    async fn test_set_dark_moves_pressed_button() {
        let mut dom = VirtualDom::new(SwitcherApp);
        dom.rebuild_in_place();

        let html = dioxus::ssr::render(&dom);
        assert!(pressed(&html, "theme-system"));
        assert!(!pressed(&html, "theme-dark"));
        assert!(html.contains("\u{2600}"));

        let ctx = captured();
        dom.in_runtime(|| ctx.set_dark());
        settle(&mut dom).await;

        let html = dioxus::ssr::render(&dom);
        assert!(pressed(&html, "theme-dark"));
        assert!(tag(&html, "theme-dark").contains(r#"class="active""#));
        assert!(!pressed(&html, "theme-system"));
        assert!(!pressed(&html, "theme-light"));
        assert!(html.contains("\u{263E}"));
    }

    #[tokio::test]
    async fn test_toggle_refreshes_controls() {
        let mut dom = VirtualDom::new(SwitcherApp);
        dom.rebuild_in_place();
        let ctx = captured();

        dom.in_runtime(|| ctx.toggle());
        settle(&mut dom).await;
        let html = dioxus::ssr::render(&dom);
        assert!(pressed(&html, "theme-light"));
        assert!(html.contains(r#"data-theme-stored="light""#));
        assert!(html.contains("\u{2600}"));

        dom.in_runtime(|| ctx.toggle());
        settle(&mut dom).await;
        let html = dioxus::ssr::render(&dom);
        assert!(pressed(&html, "theme-dark"));
        assert!(html.contains(r#"data-theme-stored="dark""#));
        assert!(html.contains("\u{263E}"));
    }

    #[tokio::test]
    async fn test_system_scheme_change_rerenders_toggle() {
        let scheme = FakeColorScheme::light();
        let mut dom = VirtualDom::new_with_props(FollowerApp, scheme.clone());
        dom.rebuild_in_place();

        let html = dioxus::ssr::render(&dom);
        assert!(html.contains("\u{2600}"));

        // Not started by the UI; only the bus follower sees it
        scheme.set(ResolvedTheme::Dark);
        settle(&mut dom).await;

        let html = dioxus::ssr::render(&dom);
        assert!(html.contains("\u{263E}"));
        assert!(html.contains(r#"data-theme-stored="system""#));
    }
}
