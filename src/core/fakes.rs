//! In-memory stand-ins for the windowing toolkit, driven by synthetic events.

use super::platform::{Application, Displays, NativeWindow};
use crate::models::{ChromeConfig, Rect, ScreenSet};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum WindowCall {
    AttachContent,
    SetFrame(Rect),
    ApplyChrome(ChromeConfig),
    OrderFront,
    OrderOut,
}

#[derive(Debug, Default)]
struct WindowInner {
    frame: Option<Rect>,
    visible: bool,
    calls: Vec<WindowCall>,
}

#[derive(Debug, Clone)]
pub struct FakeWindow {
    label: String,
    inner: Arc<Mutex<WindowInner>>,
}

impl FakeWindow {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            inner: Arc::new(Mutex::new(WindowInner::default())),
        }
    }

    pub fn calls(&self) -> Vec<WindowCall> {
        self.inner.lock().calls.clone()
    }

    /// The user dragged or resized the window; the OS updates the frame.
    pub fn user_moves_to(&self, frame: Rect) {
        self.inner.lock().frame = Some(frame);
    }

    /// The user closed the window behind the controller's back.
    pub fn user_closes(&self) {
        self.inner.lock().visible = false;
    }
}

impl NativeWindow for FakeWindow {
    fn label(&self) -> &str {
        &self.label
    }

    fn attach_content(&self) {
        self.inner.lock().calls.push(WindowCall::AttachContent);
    }

    fn set_frame(&self, frame: Rect) {
        let mut inner = self.inner.lock();
        inner.frame = Some(frame);
        inner.calls.push(WindowCall::SetFrame(frame));
    }

    fn frame(&self) -> Option<Rect> {
        self.inner.lock().frame
    }

    fn apply_chrome(&self, chrome: &ChromeConfig) {
        self.inner
            .lock()
            .calls
            .push(WindowCall::ApplyChrome(chrome.clone()));
    }

    fn is_visible(&self) -> bool {
        self.inner.lock().visible
    }

    fn order_front(&self) {
        let mut inner = self.inner.lock();
        inner.visible = true;
        inner.calls.push(WindowCall::OrderFront);
    }

    fn order_out(&self) {
        let mut inner = self.inner.lock();
        inner.visible = false;
        inner.calls.push(WindowCall::OrderOut);
    }
}

#[derive(Debug, Default)]
struct AppInner {
    activations: usize,
    windows: Vec<FakeWindow>,
}

/// Tracks activations and reports visibility across every window it knows.
#[derive(Debug, Clone, Default)]
pub struct FakeApp {
    inner: Arc<Mutex<AppInner>>,
}

impl FakeApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, window: &FakeWindow) {
        self.inner.lock().windows.push(window.clone());
    }

    pub fn activations(&self) -> usize {
        self.inner.lock().activations
    }
}

impl Application for FakeApp {
    fn activate(&self) {
        self.inner.lock().activations += 1;
    }

    fn any_window_visible(&self) -> bool {
        self.inner.lock().windows.iter().any(|w| w.is_visible())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeDisplays {
    screens: Arc<Mutex<ScreenSet>>,
}

impl FakeDisplays {
    pub fn new(screens: ScreenSet) -> Self {
        Self {
            screens: Arc::new(Mutex::new(screens)),
        }
    }

    pub fn replace(&self, screens: ScreenSet) {
        *self.screens.lock() = screens;
    }
}

impl Displays for FakeDisplays {
    fn screens(&self) -> ScreenSet {
        self.screens.lock().clone()
    }
}
