use super::geometry_store::GeometryStore;
use super::observers::ObserverRegistry;
use super::platform::{Application, Displays, NativeWindow};
use super::window_lifecycle::WindowController;
use crate::error::{ShellError, ShellResult};
use crate::models::{ControllerPhase, GeometryEventKind, Rect, ShellSettings, WindowState};
use std::collections::BTreeMap;

pub const MAIN_WINDOW_LABEL: &str = "main";

/// Application delegate: routes OS activation callbacks and window events to
/// the controllers it owns, keyed by window label.
pub struct AppLifecycle<A, D, W, G>
where
    A: Application,
    D: Displays,
    W: NativeWindow,
    G: GeometryStore,
{
    app: A,
    displays: D,
    settings: ShellSettings,
    observers: ObserverRegistry,
    windows: BTreeMap<String, WindowController<W, G>>,
    main_label: String,
}

impl<A, D, W, G> AppLifecycle<A, D, W, G>
where
    A: Application,
    D: Displays,
    W: NativeWindow,
    G: GeometryStore,
{
    pub fn new(app: A, displays: D, settings: ShellSettings) -> Self {
        Self {
            app,
            displays,
            settings,
            observers: ObserverRegistry::new(),
            windows: BTreeMap::new(),
            main_label: MAIN_WINDOW_LABEL.to_string(),
        }
    }

    pub fn controller(&self, label: &str) -> Option<&WindowController<W, G>> {
        self.windows.get(label)
    }

    pub fn window_state(&self, label: &str) -> Option<WindowState> {
        self.windows.get(label).and_then(|c| c.window_state())
    }

    fn controller_mut(&mut self, label: &str) -> ShellResult<&mut WindowController<W, G>> {
        self.windows
            .get_mut(label)
            .ok_or_else(|| ShellError::UnknownWindow(label.to_string()))
    }

    /// Takes ownership of a window. A torn-down window of the same label is replaced.
    pub fn attach_window(&mut self, window: W, store: G) -> ShellResult<()> {
        let label = window.label().to_string();
        if let Some(existing) = self.windows.get(&label) {
            if existing.phase() != ControllerPhase::TornDown {
                return Err(ShellError::AlreadyInitialized(label));
            }
        }

        let controller = WindowController::new(
            window,
            store,
            self.settings.chrome.clone(),
            self.settings.geometry_policy(),
        );
        self.windows.insert(label, controller);
        Ok(())
    }

    pub fn initialize(&mut self, label: &str) -> ShellResult<Rect> {
        let screens = self.displays.screens();
        let controller = self
            .windows
            .get_mut(label)
            .ok_or_else(|| ShellError::UnknownWindow(label.to_string()))?;
        controller.initialize(&screens, &mut self.observers)
    }

    /// Returns true when the event reached a registered observer and was persisted.
    pub fn geometry_event(&mut self, label: &str, kind: GeometryEventKind) -> bool {
        if !self.observers.is_observing(label, kind) {
            return false;
        }
        match self.windows.get_mut(label) {
            Some(controller) => controller.geometry_changed(),
            None => false,
        }
    }

    /// Last visible window closed. The app stays resident unless configured otherwise.
    pub fn should_terminate_after_last_window_closed(&mut self) -> bool {
        for controller in self.windows.values_mut() {
            controller.mark_hidden();
        }
        let terminate = !self.settings.keep_running_after_last_window_closed;
        log::info!(
            "last window closed, {}",
            if terminate { "terminating" } else { "staying resident" }
        );
        terminate
    }

    /// Dock icon click or relaunch. Always reports the reopen as handled.
    pub fn handle_reopen(&mut self, has_visible_windows: bool) -> bool {
        if !has_visible_windows {
            self.bring_main_to_front();
        }
        true
    }

    pub fn did_become_active(&mut self) {
        if self.app.any_window_visible() {
            return;
        }
        self.bring_main_to_front();
    }

    pub fn supports_secure_restorable_state(&self) -> bool {
        true
    }

    fn bring_main_to_front(&mut self) -> bool {
        let Some(controller) = self.windows.get_mut(&self.main_label) else {
            return false;
        };
        controller.reactivate(&self.app)
    }

    pub fn show_window(&mut self, label: &str) -> ShellResult<()> {
        let app = &self.app;
        let controller = self
            .windows
            .get_mut(label)
            .ok_or_else(|| ShellError::UnknownWindow(label.to_string()))?;
        controller.reactivate(app);
        Ok(())
    }

    pub fn hide_window(&mut self, label: &str) -> ShellResult<()> {
        self.controller_mut(label)?.hide();
        Ok(())
    }

    /// Flips the window's logical visibility and returns the new state.
    pub fn toggle_window(&mut self, label: &str) -> ShellResult<Option<WindowState>> {
        let visible = self.controller_mut(label)?.window().is_visible();
        if visible {
            self.hide_window(label)?;
        } else {
            self.show_window(label)?;
        }
        Ok(self.window_state(label))
    }

    pub fn teardown_all(&mut self) {
        for controller in self.windows.values_mut() {
            controller.teardown(&mut self.observers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fakes::{FakeApp, FakeDisplays, FakeWindow, WindowCall};
    use crate::core::geometry_store::{frame_key_for, SettingsGeometryStore};
    use crate::core::settings_store::{MemorySettingsStore, SettingsStore};
    use crate::models::{Screen, ScreenSet};
    use std::sync::Arc;

    type Lifecycle =
        AppLifecycle<FakeApp, FakeDisplays, FakeWindow, SettingsGeometryStore<MemorySettingsStore>>;

    struct Harness {
        lifecycle: Lifecycle,
        app: FakeApp,
        displays: FakeDisplays,
        settings: Arc<MemorySettingsStore>,
        main: FakeWindow,
    }

    fn laptop() -> ScreenSet {
        ScreenSet::new(vec![Screen::new(
            Rect::new(0.0, 0.0, 1440.0, 900.0),
            Rect::new(0.0, 25.0, 1440.0, 800.0),
            true,
        )])
    }

    fn store_for(settings: &Arc<MemorySettingsStore>, label: &str) -> SettingsGeometryStore<MemorySettingsStore> {
        SettingsGeometryStore::new(
            Arc::clone(settings),
            frame_key_for("windowFrame", label, MAIN_WINDOW_LABEL),
        )
    }

    fn harness() -> Harness {
        let app = FakeApp::new();
        let displays = FakeDisplays::new(laptop());
        let settings = Arc::new(MemorySettingsStore::new());
        let mut lifecycle = AppLifecycle::new(app.clone(), displays.clone(), ShellSettings::default());

        let main = FakeWindow::new(MAIN_WINDOW_LABEL);
        app.track(&main);
        lifecycle
            .attach_window(main.clone(), store_for(&settings, MAIN_WINDOW_LABEL))
            .expect("attach");
        lifecycle.initialize(MAIN_WINDOW_LABEL).expect("initialize");

        Harness {
            lifecycle,
            app,
            displays,
            settings,
            main,
        }
    }

    #[test]
    fn first_launch_centers_default_frame() {
        let h = harness();
        assert_eq!(h.main.frame(), Some(Rect::new(420.0, 225.0, 600.0, 400.0)));
        assert_eq!(
            h.lifecycle.window_state(MAIN_WINDOW_LABEL),
            Some(WindowState::Visible)
        );
        assert!(h.main.is_visible());
    }

    #[test]
    fn moved_window_is_restored_on_next_launch() {
        let mut h = harness();
        h.main.user_moves_to(Rect::new(50.0, 50.0, 800.0, 600.0));
        assert!(h.lifecycle.geometry_event(MAIN_WINDOW_LABEL, GeometryEventKind::Moved));
        assert_eq!(
            h.settings.get("windowFrame").as_deref(),
            Some("{{50, 50}, {800, 600}}")
        );

        // next process, same settings area
        let mut next = AppLifecycle::new(FakeApp::new(), h.displays.clone(), ShellSettings::default());
        let window = FakeWindow::new(MAIN_WINDOW_LABEL);
        next.attach_window(window.clone(), store_for(&h.settings, MAIN_WINDOW_LABEL))
            .expect("attach");
        let frame = next.initialize(MAIN_WINDOW_LABEL).expect("initialize");
        assert_eq!(frame, Rect::new(50.0, 50.0, 800.0, 600.0));
    }

    #[test]
    fn every_event_is_persisted_in_order() {
        let mut h = harness();
        let frames = [
            Rect::new(100.0, 100.0, 600.0, 400.0),
            Rect::new(100.0, 100.0, 700.0, 450.0),
            Rect::new(120.0, 90.0, 700.0, 450.0),
        ];
        let kinds = [
            GeometryEventKind::Moved,
            GeometryEventKind::Resized,
            GeometryEventKind::Moved,
        ];
        for (frame, kind) in frames.iter().zip(kinds) {
            h.main.user_moves_to(*frame);
            assert!(h.lifecycle.geometry_event(MAIN_WINDOW_LABEL, kind));
            assert_eq!(
                h.lifecycle
                    .controller(MAIN_WINDOW_LABEL)
                    .and_then(|c| c.store().load(&laptop())),
                Some(*frame)
            );
        }
    }

    #[test]
    fn display_change_falls_back_to_default() {
        let h = harness();
        h.settings
            .set("windowFrame", "{{2000, 100}, {800, 600}}")
            .expect("set");
        h.displays.replace(ScreenSet::empty());

        let mut next = AppLifecycle::new(FakeApp::new(), h.displays.clone(), ShellSettings::default());
        next.attach_window(FakeWindow::new(MAIN_WINDOW_LABEL), store_for(&h.settings, MAIN_WINDOW_LABEL))
            .expect("attach");
        let frame = next.initialize(MAIN_WINDOW_LABEL).expect("initialize");
        assert_eq!(frame, Rect::new(100.0, 100.0, 600.0, 400.0));
    }

    #[test]
    fn last_window_closed_keeps_running() {
        let mut h = harness();
        h.main.user_closes();
        assert!(!h.lifecycle.should_terminate_after_last_window_closed());
        assert_eq!(
            h.lifecycle.window_state(MAIN_WINDOW_LABEL),
            Some(WindowState::Hidden)
        );
        assert_eq!(h.app.activations(), 0);
    }

    #[test]
    fn terminate_policy_follows_settings() {
        let settings = ShellSettings {
            keep_running_after_last_window_closed: false,
            ..ShellSettings::default()
        };
        let mut lifecycle: Lifecycle =
            AppLifecycle::new(FakeApp::new(), FakeDisplays::new(laptop()), settings);
        assert!(lifecycle.should_terminate_after_last_window_closed());
    }

    #[test]
    fn reopen_without_visible_windows_brings_main_front() {
        let mut h = harness();
        h.main.user_closes();
        h.lifecycle.should_terminate_after_last_window_closed();
        let before = h.main.calls().len();

        assert!(h.lifecycle.handle_reopen(false));
        assert!(h.main.is_visible());
        assert_eq!(&h.main.calls()[before..], &[WindowCall::OrderFront]);
        assert_eq!(h.app.activations(), 1);
        assert_eq!(
            h.lifecycle.window_state(MAIN_WINDOW_LABEL),
            Some(WindowState::Visible)
        );
    }

    #[test]
    fn reopen_with_visible_windows_changes_nothing() {
        let mut h = harness();
        let before = h.main.calls().len();
        assert!(h.lifecycle.handle_reopen(true));
        assert_eq!(h.main.calls().len(), before);
        assert_eq!(h.app.activations(), 0);
    }

    #[test]
    fn became_active_only_acts_when_nothing_is_visible() {
        let mut h = harness();
        let inspector = FakeWindow::new("inspector");
        h.app.track(&inspector);
        h.lifecycle
            .attach_window(inspector.clone(), store_for(&h.settings, "inspector"))
            .expect("attach");
        h.lifecycle.initialize("inspector").expect("initialize");

        h.main.user_closes();
        h.lifecycle.did_become_active();
        assert_eq!(h.app.activations(), 0);
        assert!(!h.main.is_visible());

        inspector.user_closes();
        h.lifecycle.did_become_active();
        assert_eq!(h.app.activations(), 1);
        assert!(h.main.is_visible());
        assert!(!inspector.is_visible());
    }

    #[test]
    fn secure_restorable_state_is_supported() {
        let h = harness();
        assert!(h.lifecycle.supports_secure_restorable_state());
    }

    #[test]
    fn windows_persist_under_their_own_keys() {
        let mut h = harness();
        let inspector = FakeWindow::new("inspector");
        h.lifecycle
            .attach_window(inspector.clone(), store_for(&h.settings, "inspector"))
            .expect("attach");
        h.lifecycle.initialize("inspector").expect("initialize");

        inspector.user_moves_to(Rect::new(300.0, 200.0, 500.0, 500.0));
        assert!(h.lifecycle.geometry_event("inspector", GeometryEventKind::Resized));
        assert_eq!(h.settings.get("windowFrame"), None);
        assert_eq!(
            h.settings.get("windowFrame.inspector").as_deref(),
            Some("{{300, 200}, {500, 500}}")
        );
    }

    #[test]
    fn unknown_windows_are_reported() {
        let mut h = harness();
        assert!(matches!(
            h.lifecycle.initialize("missing"),
            Err(ShellError::UnknownWindow(_))
        ));
        assert!(matches!(
            h.lifecycle.hide_window("missing"),
            Err(ShellError::UnknownWindow(label)) if label == "missing"
        ));
        assert!(!h.lifecycle.geometry_event("missing", GeometryEventKind::Moved));
    }

    #[test]
    fn duplicate_attach_is_rejected_until_teardown() {
        let mut h = harness();
        let again = FakeWindow::new(MAIN_WINDOW_LABEL);
        assert!(h
            .lifecycle
            .attach_window(again.clone(), store_for(&h.settings, MAIN_WINDOW_LABEL))
            .is_err());

        h.lifecycle.teardown_all();
        h.lifecycle
            .attach_window(again, store_for(&h.settings, MAIN_WINDOW_LABEL))
            .expect("reattach");
        assert_eq!(
            h.lifecycle.controller(MAIN_WINDOW_LABEL).map(|c| c.phase()),
            Some(ControllerPhase::Uninitialized)
        );
    }

    #[test]
    fn teardown_stops_persisting() {
        let mut h = harness();
        h.lifecycle.teardown_all();
        h.main.user_moves_to(Rect::new(50.0, 50.0, 800.0, 600.0));
        assert!(!h.lifecycle.geometry_event(MAIN_WINDOW_LABEL, GeometryEventKind::Moved));
        assert_eq!(h.settings.get("windowFrame"), None);
        // second teardown is harmless
        h.lifecycle.teardown_all();
    }

    #[test]
    fn toggle_hides_then_shows() {
        let mut h = harness();
        assert_eq!(
            h.lifecycle.toggle_window(MAIN_WINDOW_LABEL).expect("toggle"),
            Some(WindowState::Hidden)
        );
        assert!(!h.main.is_visible());
        assert_eq!(
            h.lifecycle.toggle_window(MAIN_WINDOW_LABEL).expect("toggle"),
            Some(WindowState::Visible)
        );
        assert_eq!(h.app.activations(), 1);
    }
}
