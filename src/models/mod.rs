pub mod frame;
pub mod screen;
pub mod settings;
pub mod window_state;

pub use frame::{Point, Rect, Size};
pub use screen::{Screen, ScreenSet};
pub use settings::{ChromeConfig, GeometryPolicy, ShellSettings};
pub use window_state::{ControllerPhase, GeometryEventKind, WindowState};
