use super::{Point, Size};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FRAME_KEY: &str = "windowFrame";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub transparent_background: bool,
    pub decorations: bool,
    pub shadow: bool,
    pub movable_by_background: bool,
    pub transparent_title_bar: bool,
    pub corner_radius: f64,
    pub clip_to_corners: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            transparent_background: true,
            decorations: false,
            shadow: true,
            movable_by_background: true,
            transparent_title_bar: true,
            corner_radius: 50.0,
            clip_to_corners: true,
        }
    }
}

/// Bounds used to accept a persisted frame or build a fresh one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryPolicy {
    pub default_size: Size,
    /// Saved frames must be strictly wider and taller than this.
    pub min_valid_extent: f64,
    pub fallback_origin: Point,
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        Self {
            default_size: Size::new(600.0, 400.0),
            min_valid_extent: 100.0,
            fallback_origin: Point { x: 100.0, y: 100.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    pub frame_key: String,
    pub default_size: Size,
    pub min_valid_extent: f64,
    pub fallback_origin: Point,
    pub chrome: ChromeConfig,
    pub keep_running_after_last_window_closed: bool,
    pub log_level: String,
}

impl Default for ShellSettings {
    fn default() -> Self {
        let policy = GeometryPolicy::default();
        Self {
            frame_key: DEFAULT_FRAME_KEY.to_string(),
            default_size: policy.default_size,
            min_valid_extent: policy.min_valid_extent,
            fallback_origin: policy.fallback_origin,
            chrome: ChromeConfig::default(),
            keep_running_after_last_window_closed: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn normalize_frame_key(key: String) -> String {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        DEFAULT_FRAME_KEY.to_string()
    } else {
        trimmed.to_string()
    }
}

fn normalize_default_size(size: Size) -> Size {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(size.width) && ok(size.height) {
        size
    } else {
        GeometryPolicy::default().default_size
    }
}

fn normalize_min_valid_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.clamp(0.0, 10_000.0)
    } else {
        GeometryPolicy::default().min_valid_extent
    }
}

fn normalize_fallback_origin(origin: Point) -> Point {
    if origin.x.is_finite() && origin.y.is_finite() {
        origin
    } else {
        GeometryPolicy::default().fallback_origin
    }
}

fn normalize_corner_radius(radius: f64) -> f64 {
    if radius.is_finite() {
        radius.clamp(0.0, 500.0)
    } else {
        ChromeConfig::default().corner_radius
    }
}

fn normalize_log_level(level: String) -> String {
    let level = level.trim().to_ascii_lowercase();
    match level.as_str() {
        "off" | "error" | "warn" | "info" | "debug" | "trace" => level,
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}

impl ShellSettings {
    pub fn normalized(mut self) -> Self {
        self.frame_key = normalize_frame_key(self.frame_key);
        self.default_size = normalize_default_size(self.default_size);
        self.min_valid_extent = normalize_min_valid_extent(self.min_valid_extent);
        self.fallback_origin = normalize_fallback_origin(self.fallback_origin);
        self.chrome.corner_radius = normalize_corner_radius(self.chrome.corner_radius);
        self.log_level = normalize_log_level(self.log_level);
        self
    }

    pub fn geometry_policy(&self) -> GeometryPolicy {
        GeometryPolicy {
            default_size: self.default_size,
            min_valid_extent: self.min_valid_extent,
            fallback_origin: self.fallback_origin,
        }
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
