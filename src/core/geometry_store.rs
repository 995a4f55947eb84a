use super::frame_codec::{format_frame, parse_frame};
use super::settings_store::SettingsStore;
use crate::models::{GeometryPolicy, Rect, ScreenSet};
use std::fmt;
use std::sync::Arc;

/// Persists the window frame and hands it back only while it is still usable.
pub trait GeometryStore {
    fn load(&self, screens: &ScreenSet) -> Option<Rect>;
    fn save(&self, frame: Rect);
}

/// Why a persisted frame was not used. Expected on cold start, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRejection {
    Missing,
    Malformed,
    Degenerate,
    Offscreen,
}

impl fmt::Display for FrameRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrameRejection::Missing => "missing",
            FrameRejection::Malformed => "malformed",
            FrameRejection::Degenerate => "degenerate size",
            FrameRejection::Offscreen => "not on any attached screen",
        };
        f.write_str(s)
    }
}

pub fn validate_frame(
    frame: Rect,
    screens: &ScreenSet,
    policy: &GeometryPolicy,
) -> Result<Rect, FrameRejection> {
    if frame.is_empty()
        || frame.width <= policy.min_valid_extent
        || frame.height <= policy.min_valid_extent
    {
        return Err(FrameRejection::Degenerate);
    }
    if !screens.intersects_any(&frame) {
        return Err(FrameRejection::Offscreen);
    }
    Ok(frame)
}

/// 600x400 centered on the main screen's visible area, or at (100, 100)
/// when no screen is known.
pub fn default_frame(screens: &ScreenSet) -> Rect {
    default_frame_with(screens, &GeometryPolicy::default())
}

pub fn default_frame_with(screens: &ScreenSet, policy: &GeometryPolicy) -> Rect {
    match screens.main() {
        Some(screen) => screen.visible_frame.centered(policy.default_size),
        None => Rect::from_origin_size(policy.fallback_origin, policy.default_size),
    }
}

/// Storage key for a window; the main window keeps the bare key.
pub fn frame_key_for(base: &str, label: &str, main_label: &str) -> String {
    if label == main_label {
        base.to_string()
    } else {
        format!("{}.{}", base, label)
    }
}

pub struct SettingsGeometryStore<S: SettingsStore> {
    settings: Arc<S>,
    key: String,
    policy: GeometryPolicy,
}

impl<S: SettingsStore> SettingsGeometryStore<S> {
    pub fn new(settings: Arc<S>, key: impl Into<String>) -> Self {
        Self::with_policy(settings, key, GeometryPolicy::default())
    }

    pub fn with_policy(settings: Arc<S>, key: impl Into<String>, policy: GeometryPolicy) -> Self {
        Self {
            settings,
            key: key.into(),
            policy,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn policy(&self) -> &GeometryPolicy {
        &self.policy
    }

    pub fn resolve(&self, screens: &ScreenSet) -> Result<Rect, FrameRejection> {
        let raw = self.settings.get(&self.key).ok_or(FrameRejection::Missing)?;
        let frame = parse_frame(&raw).ok_or(FrameRejection::Malformed)?;
        validate_frame(frame, screens, &self.policy)
    }
}

impl<S: SettingsStore> GeometryStore for SettingsGeometryStore<S> {
    fn load(&self, screens: &ScreenSet) -> Option<Rect> {
        match self.resolve(screens) {
            Ok(frame) => Some(frame),
            Err(reason) => {
                log::debug!("no saved frame for {}: {}", self.key, reason);
                None
            }
        }
    }

    fn save(&self, frame: Rect) {
        if frame.is_empty() {
            log::debug!("not saving empty frame for {}: {:?}", self.key, frame);
            return;
        }
        if let Err(e) = self.settings.set(&self.key, &format_frame(&frame)) {
            log::warn!("failed to save frame for {}: {}", self.key, e);
        }
    }
}
