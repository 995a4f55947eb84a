//! Tauri host: the webview window, app handle and monitors behind the core's
//! platform traits.

use crate::core::platform::{Application, Displays, NativeWindow};
use crate::core::{AppLifecycle, JsonSettingsStore, SettingsGeometryStore};
use crate::models::{ChromeConfig, Rect, Screen, ScreenSet};
use parking_lot::Mutex;
use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Manager, Monitor, PhysicalPosition, PhysicalSize,
    Position, Size, WebviewWindow,
};

pub type ShellLifecycle =
    AppLifecycle<AppHandle, AppHandle, WebviewWindow, SettingsGeometryStore<JsonSettingsStore>>;

/// Managed state; all lifecycle transitions go through this lock.
pub struct LifecycleState(pub Mutex<ShellLifecycle>);

impl LifecycleState {
    pub fn new(lifecycle: ShellLifecycle) -> Self {
        Self(Mutex::new(lifecycle))
    }
}

pub fn with_lifecycle<T>(app: &AppHandle, f: impl FnOnce(&mut ShellLifecycle) -> T) -> Option<T> {
    let state = app.try_state::<LifecycleState>()?;
    let mut lifecycle = state.0.lock();
    Some(f(&mut lifecycle))
}

/// For callbacks that a lifecycle transition can trigger on the same thread
/// (e.g. `Resized` while a frame is being applied). Skips instead of deadlocking.
pub fn try_with_lifecycle<T>(
    app: &AppHandle,
    f: impl FnOnce(&mut ShellLifecycle) -> T,
) -> Option<T> {
    let state = app.try_state::<LifecycleState>()?;
    let Some(mut lifecycle) = state.0.try_lock() else {
        log::debug!("lifecycle busy, skipping re-entrant window event");
        return None;
    };
    Some(f(&mut lifecycle))
}

fn rounded_chrome_script(chrome: &ChromeConfig) -> String {
    let mut css = String::from("html,body{background:transparent;}");
    if chrome.clip_to_corners && chrome.corner_radius > 0.0 {
        css.push_str(&format!(
            "html{{border-radius:{r}px;overflow:hidden;}}body{{border-radius:{r}px;overflow:hidden;min-height:100vh;}}",
            r = chrome.corner_radius
        ));
    }
    let drag = if chrome.movable_by_background {
        "document.body.setAttribute('data-tauri-drag-region','');"
    } else {
        ""
    };
    format!(
        "(function(){{var s=document.createElement('style');s.textContent={css:?};document.head.appendChild(s);{drag}}})();",
        css = css,
        drag = drag
    )
}

fn warn_on_err<E: std::fmt::Display>(label: &str, what: &str, res: Result<(), E>) {
    if let Err(e) = res {
        log::warn!("window {}: failed to {}: {}", label, what, e);
    }
}

impl NativeWindow for WebviewWindow {
    fn label(&self) -> &str {
        WebviewWindow::label(self)
    }

    fn attach_content(&self) {
        // The webview is attached when the builder creates the window; only
        // make sure it isn't shown before frame and chrome are in place.
        warn_on_err(WebviewWindow::label(self), "hide", self.hide());
    }

    fn set_frame(&self, frame: Rect) {
        let label = WebviewWindow::label(self);
        warn_on_err(
            label,
            "set size",
            self.set_size(Size::Logical(LogicalSize {
                width: frame.width,
                height: frame.height,
            })),
        );
        warn_on_err(
            label,
            "set position",
            self.set_position(Position::Logical(LogicalPosition {
                x: frame.x,
                y: frame.y,
            })),
        );
    }

    fn frame(&self) -> Option<Rect> {
        // `set_size` sizes the content area; read the same measure back.
        let pos = self.outer_position().ok()?;
        let size = self.inner_size().ok()?;
        let sf = self.scale_factor().ok()?;
        content_frame(pos, size, sf)
    }

    fn apply_chrome(&self, chrome: &ChromeConfig) {
        let label = WebviewWindow::label(self);
        warn_on_err(label, "set decorations", self.set_decorations(chrome.decorations));
        warn_on_err(label, "set shadow", self.set_shadow(chrome.shadow));
        if chrome.transparent_background {
            warn_on_err(
                label,
                "clear background",
                self.set_background_color(Some(tauri::window::Color(0, 0, 0, 0))),
            );
        }
        #[cfg(target_os = "macos")]
        if chrome.transparent_title_bar {
            warn_on_err(
                label,
                "set title bar style",
                self.set_title_bar_style(tauri::TitleBarStyle::Transparent),
            );
        }
        warn_on_err(label, "inject chrome", self.eval(&rounded_chrome_script(chrome)));
    }

    fn is_visible(&self) -> bool {
        WebviewWindow::is_visible(self).unwrap_or(false)
    }

    fn order_front(&self) {
        let label = WebviewWindow::label(self);
        warn_on_err(label, "show", self.show());
        warn_on_err(label, "unminimize", self.unminimize());
        warn_on_err(label, "focus", self.set_focus());
    }

    fn order_out(&self) {
        warn_on_err(WebviewWindow::label(self), "hide", self.hide());
    }
}

impl Application for AppHandle {
    fn activate(&self) {
        #[cfg(target_os = "macos")]
        if let Err(e) = self.show() {
            log::warn!("failed to activate app: {}", e);
        }
    }

    fn any_window_visible(&self) -> bool {
        self.webview_windows()
            .values()
            .any(|w| w.is_visible().unwrap_or(false))
    }
}

fn logical_rect(x: i32, y: i32, width: u32, height: u32, sf: f64) -> Rect {
    let sf = if sf.is_finite() && sf > 0.0 { sf } else { 1.0 };
    Rect::new(
        x as f64 / sf,
        y as f64 / sf,
        width as f64 / sf,
        height as f64 / sf,
    )
}

fn content_frame(pos: PhysicalPosition<i32>, inner: PhysicalSize<u32>, sf: f64) -> Option<Rect> {
    if !(sf.is_finite() && sf > 0.0) {
        return None;
    }
    let frame = logical_rect(pos.x, pos.y, inner.width, inner.height, sf);
    (!frame.is_empty()).then_some(frame)
}

fn screen_from_monitor(monitor: &Monitor, primary: Option<&Monitor>) -> Screen {
    let sf = monitor.scale_factor();
    let pos = monitor.position();
    let size = monitor.size();
    let work = monitor.work_area();
    let is_primary = primary.is_some_and(|p| p.position() == pos && p.size() == size);
    Screen::new(
        logical_rect(pos.x, pos.y, size.width, size.height, sf),
        logical_rect(
            work.position.x,
            work.position.y,
            work.size.width,
            work.size.height,
            sf,
        ),
        is_primary,
    )
}

impl Displays for AppHandle {
    fn screens(&self) -> ScreenSet {
        let monitors = match self.available_monitors() {
            Ok(monitors) => monitors,
            Err(e) => {
                log::warn!("failed to list monitors: {}", e);
                return ScreenSet::empty();
            }
        };
        let primary = self.primary_monitor().ok().flatten();
        ScreenSet::new(
            monitors
                .iter()
                .map(|m| screen_from_monitor(m, primary.as_ref()))
                .collect(),
        )
    }
}
