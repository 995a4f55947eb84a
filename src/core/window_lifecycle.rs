use super::geometry_store::{default_frame_with, GeometryStore};
use super::observers::{ObserverRegistry, ObserverToken};
use super::platform::{Application, NativeWindow};
use crate::error::{ShellError, ShellResult};
use crate::models::{
    ChromeConfig, ControllerPhase, GeometryEventKind, GeometryPolicy, Rect, ScreenSet, WindowState,
};

/// Owns one top-level window: frame restore, chrome, geometry persistence and
/// show/activate transitions.
pub struct WindowController<W: NativeWindow, G: GeometryStore> {
    window: W,
    store: G,
    chrome: ChromeConfig,
    policy: GeometryPolicy,
    phase: ControllerPhase,
    tokens: Vec<ObserverToken>,
}

impl<W: NativeWindow, G: GeometryStore> WindowController<W, G> {
    pub fn new(window: W, store: G, chrome: ChromeConfig, policy: GeometryPolicy) -> Self {
        Self {
            window,
            store,
            chrome,
            policy,
            phase: ControllerPhase::Uninitialized,
            tokens: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        self.window.label()
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn window_state(&self) -> Option<WindowState> {
        self.phase.window_state()
    }

    pub fn initialize(
        &mut self,
        screens: &ScreenSet,
        observers: &mut ObserverRegistry,
    ) -> ShellResult<Rect> {
        if self.phase != ControllerPhase::Uninitialized {
            return Err(ShellError::AlreadyInitialized(self.label().to_string()));
        }

        let (frame, restored) = match self.store.load(screens) {
            Some(frame) => (frame, true),
            None => (default_frame_with(screens, &self.policy), false),
        };

        self.window.attach_content();
        self.window.set_frame(frame);
        self.window.apply_chrome(&self.chrome);

        let label = self.window.label().to_string();
        for kind in [GeometryEventKind::Moved, GeometryEventKind::Resized] {
            self.tokens.push(observers.register(&label, kind));
        }

        self.window.order_front();
        self.phase = ControllerPhase::Configured(WindowState::Visible);
        log::info!(
            "window {} configured at {:?} ({})",
            label,
            frame,
            if restored { "restored" } else { "default" }
        );
        Ok(frame)
    }

    /// Persists the current frame. Every event writes; nothing is coalesced.
    pub fn geometry_changed(&mut self) -> bool {
        if !self.phase.is_configured() {
            return false;
        }
        let Some(frame) = self.window.frame() else {
            log::debug!("window {} has no readable frame", self.label());
            return false;
        };
        self.store.save(frame);
        true
    }

    /// Order front, make key and activate the app.
    pub fn reactivate<A: Application>(&mut self, app: &A) -> bool {
        if !self.phase.is_configured() {
            return false;
        }
        self.window.order_front();
        app.activate();
        self.phase = ControllerPhase::Configured(WindowState::Visible);
        log::info!("window {} brought to front", self.label());
        true
    }

    pub fn hide(&mut self) -> bool {
        if !self.phase.is_configured() {
            return false;
        }
        self.window.order_out();
        self.mark_hidden();
        true
    }

    /// Records that the OS already took the window off screen.
    pub fn mark_hidden(&mut self) {
        if self.phase.is_configured() {
            self.phase = ControllerPhase::Configured(WindowState::Hidden);
        }
    }

    /// Drops move/resize observers. Safe before initialize and when repeated.
    pub fn teardown(&mut self, observers: &mut ObserverRegistry) {
        for token in self.tokens.drain(..) {
            observers.remove(token);
        }
        if self.phase != ControllerPhase::TornDown {
            log::info!("window {} torn down", self.label());
        }
        self.phase = ControllerPhase::TornDown;
    }
}
