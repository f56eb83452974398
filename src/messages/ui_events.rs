//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Endpoint list
    NextEndpoint,
    PrevEndpoint,
    SelectEndpoint,

    // Parameter fields
    NextField,
    PrevField,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Request
    Fetch,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Endpoints,
    Params,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Endpoints => Panel::Params,
            Panel::Params => Panel::Response,
            Panel::Response => Panel::Endpoints,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Endpoints => Panel::Response,
            Panel::Params => Panel::Endpoints,
            Panel::Response => Panel::Params,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context.
///
/// The fetch keys are dropped while a request is loading.
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    is_loading: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('f') | KeyCode::Char('s') if !is_loading => Some(UiEvent::Fetch),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Endpoints => Some(UiEvent::SelectEndpoint),
                Panel::Params => Some(UiEvent::StartEditing),
                Panel::Response => None,
            },
            KeyCode::Up => match active_panel {
                Panel::Endpoints => Some(UiEvent::PrevEndpoint),
                Panel::Params => Some(UiEvent::PrevField),
                Panel::Response => Some(UiEvent::ScrollUp),
            },
            KeyCode::Down => match active_panel {
                Panel::Endpoints => Some(UiEvent::NextEndpoint),
                Panel::Params => Some(UiEvent::NextField),
                Panel::Response => Some(UiEvent::ScrollDown),
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
