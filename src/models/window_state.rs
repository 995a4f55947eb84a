use serde::{Deserialize, Serialize};

/// The controller's logical view of visibility. The OS owns the real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowState {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "phase", content = "state")]
pub enum ControllerPhase {
    Uninitialized,
    Configured(WindowState),
    TornDown,
}

impl ControllerPhase {
    pub fn window_state(&self) -> Option<WindowState> {
        match self {
            ControllerPhase::Configured(state) => Some(*state),
            _ => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, ControllerPhase::Configured(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryEventKind {
    Moved,
    Resized,
}
