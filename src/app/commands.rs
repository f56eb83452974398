//! Command handlers - business logic for processing UI events

use chrono::{DateTime, Utc};

use crate::app::state::RequestState;
use crate::app::AppState;
use crate::config::StalePolicy;
use crate::error::{CatalogError, FetchError};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::params::{self, Field};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    pub fn next_endpoint(&mut self) {
        let len = self.catalog.len();
        if len > 0 {
            self.highlighted_endpoint = (self.highlighted_endpoint + 1) % len;
        }
    }

    pub fn prev_endpoint(&mut self) {
        let len = self.catalog.len();
        if len > 0 {
            self.highlighted_endpoint = self.highlighted_endpoint
                .checked_sub(1)
                .unwrap_or(len - 1);
        }
    }

    pub fn next_field(&mut self) {
        let len = self.visible_fields().len();
        if len > 0 {
            self.selected_field = (self.selected_field + 1) % len;
            self.cursor_to_end();
        }
    }

    pub fn prev_field(&mut self) {
        let len = self.visible_fields().len();
        if len > 0 {
            self.selected_field = self.selected_field
                .checked_sub(1)
                .unwrap_or(len - 1);
            self.cursor_to_end();
        }
    }

    // ========================
    // Endpoint selection
    // ========================

    /// Make `index` the active endpoint and reset its inputs to the default
    /// window. The request state is left alone, so the previous result stays
    /// on screen until the next fetch.
    pub fn select_endpoint(&mut self, index: usize, now: DateTime<Utc>) -> Result<(), CatalogError> {
        let endpoint = self.catalog.get(index)?;
        let schema = endpoint.params;
        tracing::debug!(index, label = %endpoint.label, ?schema, "Selecting endpoint");

        self.selected_endpoint = Some(index);
        self.highlighted_endpoint = index;
        self.inputs.reset_for(schema, now, self.lookback_days);
        self.selected_field = 0;
        self.input_mode = InputMode::Normal;
        self.cursor_position = 0;
        Ok(())
    }

    /// Select the endpoint under the list cursor
    pub fn select_highlighted(&mut self, now: DateTime<Utc>) -> Result<(), CatalogError> {
        self.select_endpoint(self.highlighted_endpoint, now)?;
        if !self.visible_fields().is_empty() {
            self.active_panel = Panel::Params;
        }
        Ok(())
    }

    // ========================
    // Input editing
    // ========================

    /// Set one input of the selected endpoint. No validation: whatever is
    /// here goes out on the next fetch. Returns false, leaving the inputs
    /// untouched, when the selected endpoint does not show `field`.
    pub fn update_input(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.visible_fields().contains(&field) {
            tracing::debug!(?field, "Ignoring input for a field the endpoint does not take");
            return false;
        }
        self.inputs.set(field, value);
        true
    }

    pub fn start_editing(&mut self) {
        if self.current_field().is_some() {
            self.input_mode = InputMode::Editing;
            self.cursor_to_end();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(field) = self.current_field() {
            let input = self.inputs.get(field);
            if self.cursor_position > 0 {
                self.cursor_position = input[..self.cursor_position]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
            }
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(field) = self.current_field() {
            let input = self.inputs.get(field);
            if self.cursor_position < input.len() {
                self.cursor_position = input[self.cursor_position..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| self.cursor_position + i)
                    .unwrap_or(input.len());
            }
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(field) = self.current_field() {
            let mut value = self.inputs.get(field).to_string();
            let cursor_pos = self.cursor_position.min(value.len());
            value.insert(cursor_pos, c);
            self.update_input(field, value);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.current_field() {
            if self.cursor_position > 0 {
                let mut value = self.inputs.get(field).to_string();
                let cursor_pos = self.cursor_position.min(value.len());
                let prev_pos = value[..cursor_pos]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                value.remove(prev_pos);
                self.update_input(field, value);
                self.cursor_position = prev_pos;
            }
        }
    }

    fn cursor_to_end(&mut self) {
        self.cursor_position = self
            .current_field()
            .map(|field| self.inputs.get(field).len())
            .unwrap_or(0);
    }

    // ========================
    // Fetching
    // ========================

    /// Snapshot the selected endpoint and its resolved parameters into a
    /// fetch command and move to `Loading`.
    ///
    /// Does not refuse while another fetch is in flight; the UI disables the
    /// trigger in that state.
    pub fn trigger_fetch(&mut self) -> Result<NetworkCommand, FetchError> {
        let (label, path, params) = {
            let endpoint = self.selected().ok_or(FetchError::NoSelection)?;
            (
                endpoint.label.clone(),
                endpoint.path.clone(),
                params::resolve(endpoint.params, &self.inputs),
            )
        };

        let id = self.next_id();
        self.latest_request_id = Some(id);
        self.request = RequestState::Loading { label: label.clone() };
        self.response_scroll = 0;
        self.last_time_ms = None;

        Ok(NetworkCommand::Fetch {
            id,
            label,
            path,
            params,
        })
    }

    // ========================
    // Response handling
    // ========================

    /// Record a fetch outcome. Returns false when the stale response policy
    /// discarded it.
    pub fn handle_response(&mut self, response: NetworkResponse) -> bool {
        let id = response.id();
        if self.stale_policy == StalePolicy::Latest && self.latest_request_id != Some(id) {
            tracing::debug!(
                id,
                latest = ?self.latest_request_id,
                label = response.label(),
                "Discarding superseded response"
            );
            return false;
        }

        self.last_time_ms = Some(response.time_ms());
        self.request = match response {
            NetworkResponse::Success { label, payload, .. } => {
                RequestState::Success { label, payload }
            }
            NetworkResponse::Error { label, error, .. } => RequestState::Error {
                label,
                message: error.to_string(),
            },
        };
        self.response_scroll = 0;
        true
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
