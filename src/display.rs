//! Display adapter - turns the request state into what the response panel shows

use crate::app::state::RequestState;

/// Renderable content of the response panel
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DisplayPanel {
    /// Nothing fetched yet
    #[default]
    Placeholder,
    Loading { label: String },
    Error { label: String, message: String },
    /// Pretty-printed payload
    Data { label: String, body: String },
}

impl DisplayPanel {
    pub fn from_state(state: &RequestState) -> Self {
        match state {
            RequestState::Idle => DisplayPanel::Placeholder,
            RequestState::Loading { label } => DisplayPanel::Loading {
                label: label.clone(),
            },
            RequestState::Error { label, message } => DisplayPanel::Error {
                label: label.clone(),
                message: message.clone(),
            },
            RequestState::Success { label, payload } => DisplayPanel::Data {
                label: label.clone(),
                body: serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string()),
            },
        }
    }

    /// Endpoint the panel content belongs to
    pub fn label(&self) -> Option<&str> {
        match self {
            DisplayPanel::Placeholder => None,
            DisplayPanel::Loading { label }
            | DisplayPanel::Error { label, .. }
            | DisplayPanel::Data { label, .. } => Some(label),
        }
    }
}
