use super::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub frame: Rect,
    /// Area left over after the menu bar, dock or taskbar.
    pub visible_frame: Rect,
    #[serde(default)]
    pub primary: bool,
}

impl Screen {
    pub fn new(frame: Rect, visible_frame: Rect, primary: bool) -> Self {
        Self {
            frame,
            visible_frame,
            primary,
        }
    }
}

/// Displays attached right now. Never cached across launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenSet {
    screens: Vec<Screen>,
}

impl ScreenSet {
    pub fn new(screens: Vec<Screen>) -> Self {
        Self { screens }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The primary screen, falling back to the first attached one.
    pub fn main(&self) -> Option<&Screen> {
        self.screens
            .iter()
            .find(|s| s.primary)
            .or_else(|| self.screens.first())
    }

    pub fn intersects_any(&self, frame: &Rect) -> bool {
        self.screens.iter().any(|s| s.frame.intersects(frame))
    }
}
