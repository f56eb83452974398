//! Render state - data structure sent from App layer to UI for rendering

use crate::catalog::ParamSchema;
use crate::display::DisplayPanel;
use crate::messages::ui_events::{InputMode, Panel};
use crate::params::Field;

/// One line of the endpoint list
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRow {
    pub label: String,
    pub path: String,
    pub kind: ParamSchema,
}

/// One visible parameter input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub field: Field,
    pub value: String,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Endpoint list
    pub endpoints: Vec<EndpointRow>,
    pub highlighted_endpoint: usize,
    pub selected_endpoint: Option<usize>,

    // Parameters of the selected endpoint
    pub fields: Vec<FieldRow>,
    pub selected_field: usize,
    pub params_summary: String,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Response
    pub display: DisplayPanel,
    pub response_scroll: u16,
    pub is_loading: bool,
    pub last_time_ms: Option<u64>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            endpoints: Vec::new(),
            highlighted_endpoint: 0,
            selected_endpoint: None,
            fields: Vec::new(),
            selected_field: 0,
            params_summary: String::new(),
            active_panel: Panel::Endpoints,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            display: DisplayPanel::Placeholder,
            response_scroll: 0,
            is_loading: false,
            last_time_ms: None,
            show_help: false,
        }
    }
}
