//! Seams to the windowing toolkit. The lifecycle core only talks to these.

use crate::models::{ChromeConfig, Rect, ScreenSet};

pub trait NativeWindow {
    fn label(&self) -> &str;
    /// Attaches the embedded UI surface. Called once, before frame and chrome.
    fn attach_content(&self);
    fn set_frame(&self, frame: Rect);
    fn frame(&self) -> Option<Rect>;
    fn apply_chrome(&self, chrome: &ChromeConfig);
    fn is_visible(&self) -> bool;
    /// Show, raise and make key.
    fn order_front(&self);
    fn order_out(&self);
}

pub trait Application {
    /// Brings the whole app to the foreground, ignoring other apps.
    fn activate(&self);
    fn any_window_visible(&self) -> bool;
}

pub trait Displays {
    fn screens(&self) -> ScreenSet;
}
