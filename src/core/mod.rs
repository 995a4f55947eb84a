pub mod app_lifecycle;
pub mod app_log;
pub mod frame_codec;
pub mod geometry_store;
pub mod observers;
pub mod platform;
pub mod settings_store;
pub mod shell_config;
pub mod window_lifecycle;

#[cfg(test)]
pub(crate) mod fakes;

pub use app_lifecycle::{AppLifecycle, MAIN_WINDOW_LABEL};
pub use geometry_store::{default_frame, GeometryStore, SettingsGeometryStore};
pub use platform::{Application, Displays, NativeWindow};
pub use settings_store::{JsonSettingsStore, MemorySettingsStore, SettingsStore};
pub use window_lifecycle::WindowController;
