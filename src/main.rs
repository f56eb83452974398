//! Oura Explorer - Actor-based terminal client for the Oura API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use oura_explorer::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_FILE};
use oura_explorer::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use oura_explorer::ui::{highlight_json, kind_color, panel_border, render_field};
use oura_explorer::{
    AppActor, AppState, DisplayPanel, HttpTransport, NetworkActor, NetworkCommand,
    NetworkResponse, RenderState, Settings, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    let catalog = settings.catalog()?;

    // Initialize logging to file
    let log_dir = settings
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = settings
        .log_file
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(
        version = APP_VERSION,
        base_url = %settings.base_url,
        path_prefix = %settings.path_prefix,
        endpoints = catalog.len(),
        policy = ?settings.stale_responses,
        "Starting"
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(HttpTransport::new(&settings), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(catalog, &settings), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.is_loading,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(main_chunks[1]);

    draw_endpoints(f, state, columns[0]);

    let param_height = (state.fields.len() as u16).max(1) + 2;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(param_height), Constraint::Min(5)])
        .split(columns[1]);

    draw_params(f, state, right[0]);
    draw_response(f, state, right[1]);

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )];
    if state.is_loading {
        spans.push(Span::styled(" [...]", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_endpoints(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Endpoints;

    let items: Vec<ListItem> = state.endpoints.iter()
        .enumerate()
        .map(|(i, ep)| {
            let marker = if state.selected_endpoint == Some(i) { "> " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(ep.label.clone()),
                Span::styled(format!("  {}", ep.kind.as_str()), Style::default().fg(kind_color(ep.kind))),
            ]))
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().bold()
    };

    let list = List::new(items)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(is_focused, false))
            .title(format!(" Endpoints ({}) ", state.endpoints.len())))
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    list_state.select(Some(state.highlighted_endpoint));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_params(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Params;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;

    let label = state.selected_endpoint
        .and_then(|i| state.endpoints.get(i))
        .map(|ep| format!(" {} {} ", ep.label, ep.path))
        .unwrap_or_else(|| String::from(" Parameters "));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(is_focused, is_editing))
        .title(label)
        .title_bottom(Line::from(format!(" {} ", state.params_summary)).right_aligned());

    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.fields.is_empty() {
        let hint = Paragraph::new("No parameters - fetches current data")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); state.fields.len()])
        .split(inner);

    for (i, row) in state.fields.iter().enumerate() {
        let is_selected = is_focused && i == state.selected_field;
        f.render_widget(
            render_field(row.field.label(), &row.value, is_selected, is_editing),
            rows[i],
        );
    }

    // Cursor
    if is_editing {
        if let Some(row_area) = rows.get(state.selected_field) {
            let max_x = row_area.x + row_area.width.saturating_sub(1);
            let cursor_x = (row_area.x + 16 + state.cursor_position as u16).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, row_area.y));
        }
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Response;

    let time_text = state.last_time_ms
        .map(|ms| format!(" {}ms ", ms))
        .unwrap_or_default();

    let (title, lines): (String, Vec<Line>) = match &state.display {
        DisplayPanel::Placeholder => (
            String::from(" Response "),
            QUICK_REFERENCE.lines().map(Line::from).collect(),
        ),
        DisplayPanel::Loading { label } => (
            format!(" {} ", label),
            vec![Line::from(Span::styled(
                format!("Fetching {}...", label),
                Style::default().fg(Color::Yellow),
            ))],
        ),
        DisplayPanel::Error { label, message } => (
            format!(" {} - error ", label),
            vec![
                Line::from(Span::styled("Request failed", Style::default().fg(Color::Red).bold())),
                Line::from(""),
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
            ],
        ),
        DisplayPanel::Data { label, body } => (format!(" Data for: {} ", label), highlight_json(body)),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(is_focused, false))
        .title(title)
        .title_bottom(Line::from(time_text).right_aligned());

    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

const QUICK_REFERENCE: &str = r#"Quick Reference:
────────────────────────────
  Enter Select endpoint / edit field
  f     Fetch
  Tab   Next panel
  ?     Full help
  q     Quit
────────────────────────────
Select an endpoint and press 'f' to fetch its data."#;

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... (fetch disabled until the response arrives) "
    } else if state.input_mode == InputMode::Editing {
        " Esc/Enter:stop editing | arrows:move | Tab:next field "
    } else {
        " Tab:panel | Enter:select/edit | f:fetch | ?:help | q:quit "
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = format!(r#"
 {} {} - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Move in list / fields, scroll response

 ENDPOINTS
   Enter / e          Select highlighted endpoint

 PARAMETERS
   Enter / e          Edit field
   Esc / Enter        Stop editing
   Tab                Next field while editing

 REQUEST
   f / s              Fetch selected endpoint

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#, APP_NAME, APP_VERSION);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
