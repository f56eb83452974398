//! App state - pure data structure with no I/O logic

use crate::catalog::{EndpointCatalog, EndpointDescriptor};
use crate::config::{Settings, StalePolicy};
use crate::display::DisplayPanel;
use crate::messages::render::{EndpointRow, FieldRow};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::params::{self, Field, InputState};

/// Lifecycle of the last dispatched fetch.
///
/// `label` is always the label captured when the request was dispatched,
/// not the endpoint currently selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        label: String,
    },
    Success {
        label: String,
        payload: serde_json::Value,
    },
    Error {
        label: String,
        message: String,
    },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            RequestState::Idle => None,
            RequestState::Loading { label }
            | RequestState::Success { label, .. }
            | RequestState::Error { label, .. } => Some(label),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Endpoint data
    pub catalog: EndpointCatalog,
    pub selected_endpoint: Option<usize>,
    pub inputs: InputState,
    pub lookback_days: u32,

    // Request lifecycle
    pub request: RequestState,
    pub stale_policy: StalePolicy,
    pub next_request_id: u64,
    pub latest_request_id: Option<u64>,
    pub last_time_ms: Option<u64>,

    // UI state
    pub highlighted_endpoint: usize,
    pub selected_field: usize,
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub response_scroll: u16,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(catalog: EndpointCatalog, settings: &Settings) -> Self {
        AppState {
            catalog,
            selected_endpoint: None,
            inputs: InputState::default(),
            lookback_days: settings.lookback_days,
            request: RequestState::Idle,
            stale_policy: settings.stale_responses,
            next_request_id: 1,
            latest_request_id: None,
            last_time_ms: None,
            highlighted_endpoint: 0,
            selected_field: 0,
            active_panel: Panel::Endpoints,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            response_scroll: 0,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// The active descriptor, if any
    pub fn selected(&self) -> Option<&EndpointDescriptor> {
        self.selected_endpoint.and_then(|i| self.catalog.list().get(i))
    }

    /// Inputs the selected endpoint shows
    pub fn visible_fields(&self) -> &'static [Field] {
        self.selected()
            .map(|ep| params::visible_fields(ep.params))
            .unwrap_or(&[])
    }

    /// Field under the cursor in the parameters panel
    pub fn current_field(&self) -> Option<Field> {
        self.visible_fields().get(self.selected_field).copied()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let endpoints = self
            .catalog
            .list()
            .iter()
            .map(|ep| EndpointRow {
                label: ep.label.clone(),
                path: ep.path.clone(),
                kind: ep.params,
            })
            .collect();

        let fields = self
            .visible_fields()
            .iter()
            .map(|field| FieldRow {
                field: *field,
                value: self.inputs.get(*field).to_string(),
            })
            .collect();

        let params_summary = self
            .selected()
            .map(|ep| params::summary(ep.params, &self.inputs))
            .unwrap_or_default();

        RenderState {
            endpoints,
            highlighted_endpoint: self.highlighted_endpoint,
            selected_endpoint: self.selected_endpoint,
            fields,
            selected_field: self.selected_field,
            params_summary,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            display: DisplayPanel::from_state(&self.request),
            response_scroll: self.response_scroll,
            is_loading: self.is_loading(),
            last_time_ms: self.last_time_ms,
            show_help: self.show_help,
        }
    }
}
