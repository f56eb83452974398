//! Rendering helpers shared by the terminal front end

use ratatui::{prelude::*, widgets::*};

use crate::catalog::ParamSchema;

/// Border style for a panel given focus and editing state
pub fn panel_border(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders a labelled single-line input
pub fn render_field<'a>(label: &'a str, value: &'a str, is_selected: bool, is_editing: bool) -> Paragraph<'a> {
    let label_style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    let value_style = if is_selected && is_editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{:<16}", label), label_style),
        Span::styled(value, value_style),
    ]))
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let chars = line.chars();
        let mut current = String::new();
        let mut in_string = false;
        let mut is_key = false;

        for c in chars {
            match c {
                '"' => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }

                    if in_string {
                        // End of string
                        current.push(c);
                        let color = if is_key { Color::Cyan } else { Color::Green };
                        spans.push(Span::styled(current.clone(), Style::default().fg(color)));
                        current.clear();
                        in_string = false;
                        is_key = false;
                    } else {
                        // Start of string
                        in_string = true;
                        current.push(c);
                        // Check if this is a key (followed by :)
                        is_key = line[line.find('"').unwrap_or(0)..].contains("\":");
                    }
                }
                ':' if !in_string => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    spans.push(Span::styled(":", Style::default().fg(Color::White)));
                }
                '{' | '}' | '[' | ']' if !in_string => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    spans.push(Span::styled(
                        c.to_string(),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                '0'..='9' | '-' | '.' if !in_string => {
                    if !current.is_empty()
                        && !current
                            .chars()
                            .all(|x| x.is_ascii_digit() || x == '-' || x == '.')
                    {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    current.push(c);
                }
                't' | 'r' | 'u' | 'e' | 'f' | 'a' | 'l' | 's' | 'n' if !in_string => {
                    current.push(c);
                    // Check for true, false, null
                    if current == "true" || current == "false" || current == "null" {
                        spans.push(Span::styled(
                            current.clone(),
                            Style::default().fg(Color::Magenta),
                        ));
                        current.clear();
                    }
                }
                _ => {
                    current.push(c);
                }
            }
        }

        if !current.is_empty() {
            // Color numbers
            if current
                .chars()
                .all(|c| c.is_ascii_digit() || c == '-' || c == '.')
            {
                spans.push(Span::styled(current, Style::default().fg(Color::Yellow)));
            } else {
                spans.push(Span::raw(current));
            }
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Color for a parameter shape shown in the endpoint list
pub fn kind_color(kind: ParamSchema) -> Color {
    match kind {
        ParamSchema::DateRange => Color::Green,
        ParamSchema::DatetimeRange => Color::Magenta,
        ParamSchema::Fixed => Color::Blue,
        ParamSchema::None => Color::DarkGray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_json_keeps_line_count() {
        let body = "{\n  \"data\": [],\n  \"next_token\": null\n}";
        assert_eq!(highlight_json(body).len(), 4);
    }

    #[test]
    fn test_kind_color() {
        assert_eq!(kind_color(ParamSchema::DateRange), Color::Green);
        assert_eq!(kind_color(ParamSchema::DatetimeRange), Color::Magenta);
        assert_eq!(kind_color(ParamSchema::None), Color::DarkGray);
    }
}
