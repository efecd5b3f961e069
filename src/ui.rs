use aics_core::cards::field_label;
use aics_core::forms::{ConnectionType, PSTN_PROVIDERS};
use aics_core::suggestions::SUGGESTIONS;
use aics_core::{Message, MessageKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FocusPane, InputMode, PanelRow};
use crate::form::{FormState, LocationField, LocationForm, PhoneNumbersForm, PstnForm, PstnPage};

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        if end > 0 {
            spans.push(Span::styled(
                after[..end].to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        rest = &after[end + 2..];
    }

    // No closing ** is treated as literal text
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    Line::from(spans)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [conversation_area, panel_area] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
            .areas(body_area);

    let [chat_area, chips_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(conversation_area);

    // Store areas for mouse hit-testing
    app.chat_area = Some(chat_area);
    app.panel_area = Some(panel_area);
    app.input_area = Some(input_area);

    render_chat(app, frame, chat_area);
    render_chips(app, frame, chips_area);
    render_input(app, frame, input_area);
    render_panel(app, frame, panel_area);

    render_footer(app, frame, footer_area);

    // Popups
    if let Some(form) = app.form.as_mut() {
        match form {
            FormState::Location(location) => render_location_form(location, frame, area),
            FormState::Pstn(pstn) => render_pstn_form(pstn, frame, area),
            FormState::PhoneNumbers(numbers) => render_phone_numbers_form(numbers, frame, area),
        }
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let pending = app.conversation.pending_changes();
    let pending_indicator = if pending > 0 {
        format!(" [{} pending, a to apply]", pending)
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(" Calling Setup Assistant ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(pending_indicator, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let (mode_text, mode_style) = match (&app.form, app.input_mode) {
        (Some(_), _) => (" FORM ", Style::default().bg(Color::Magenta).fg(Color::White)),
        (None, InputMode::Editing) => (" INSERT ", Style::default().bg(Color::Yellow).fg(Color::Black)),
        (None, InputMode::Normal) => (" NORMAL ", Style::default().bg(Color::Blue).fg(Color::White)),
    };

    let pairs: Vec<(&str, &str)> = match (&app.form, app.input_mode) {
        (Some(FormState::Location(_)), _) => vec![
            ("Tab", "next field"),
            ("←/→", "choose"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
        (Some(FormState::Pstn(_)), _) => vec![("j/k", "nav"), ("Enter", "next"), ("Esc", "back")],
        (Some(FormState::PhoneNumbers(_)), _) => vec![
            ("Tab", "field"),
            ("Space", "toggle"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
        (None, InputMode::Editing) => vec![("Enter", "send"), ("Tab", "focus"), ("Esc", "normal")],
        (None, InputMode::Normal) => {
            let mut pairs = match app.focus {
                FocusPane::Chips => vec![("h/l", "chip"), ("Enter", "click")],
                FocusPane::Panel if app.conversation.panel().shows_suggestions() => {
                    vec![("j/k", "nav"), ("Enter", "ask")]
                }
                FocusPane::Panel => vec![("j/k", "nav"), ("Enter", "toggle")],
                FocusPane::Chat | FocusPane::Input => vec![("j/k", "scroll")],
            };
            pairs.extend([
                ("1-9", "chip"),
                ("Tab", "focus"),
                ("i", "type"),
                ("p", "panel"),
                ("a", "apply"),
                ("t", "time"),
                ("L/P/N", "forms"),
                ("q", "quit"),
            ]);
            pairs
        }
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in pairs {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn border_color(focused: bool) -> Color {
    if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}

/// All chat lines, in the order `App::chat_line_count` counts them
fn chat_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    for msg in app.conversation.messages() {
        lines.push(role_line(msg, app.config.show_timestamps));

        match (msg.card(), msg.is_user()) {
            (Some(card), _) => {
                for (key, value) in &card.fields {
                    lines.push(Line::from(vec![
                        Span::styled("│ ", Style::default().fg(Color::Magenta)),
                        Span::styled(
                            format!("{}: ", field_label(key)),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw(value.clone()),
                    ]));
                }
            }
            (None, true) => {
                for line in msg.content.lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            _ => {
                for line in msg.content.lines() {
                    lines.push(parse_markdown_line(line));
                }
                if let Some(chips) = &msg.chips {
                    let labels: Vec<String> = chips.iter().map(|c| format!("[{}]", c.label)).collect();
                    lines.push(Line::from(Span::styled(
                        labels.join(" "),
                        Style::default().fg(Color::Blue),
                    )));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.is_thinking() {
        lines.push(Line::from(Span::styled(
            "AI:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

fn role_line(msg: &Message, show_timestamps: bool) -> Line<'static> {
    let (label, style) = match msg.kind {
        MessageKind::User => (
            "You:".to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        MessageKind::Ai => (
            "AI:".to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        MessageKind::EditorCard => (
            format!(
                "┌ {}",
                msg.editor_data.as_ref().map(|c| c.title.as_str()).unwrap_or("Card")
            ),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
    };

    let mut spans = vec![Span::styled(label, style)];
    if show_timestamps {
        let time = msg.timestamp.with_timezone(&chrono::Local).format("%H:%M");
        spans.push(Span::styled(
            format!(" {}", time),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app.focus == FocusPane::Chat)))
        .title(" Conversation ");

    let chat = Paragraph::new(Text::from(chat_lines(app)))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_chips(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Chips;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)))
        .title(" Actions ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.chip_areas.clear();
    let mut x = inner.x;
    let right_edge = inner.x + inner.width;

    for (i, chip) in app.conversation.smart_chips().iter().enumerate() {
        let text = format!(" {} {} ", i + 1, chip.label);
        let width = text.chars().count() as u16;
        if x >= right_edge {
            break;
        }
        let chip_area = Rect::new(x, inner.y, width.min(right_edge - x), 1);

        let style = if focused && i == app.selected_chip {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        frame.render_widget(Paragraph::new(Span::styled(text, style)), chip_area);
        app.chip_areas.push(chip_area);

        x = x.saturating_add(width + 1);
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing && app.form.is_none();
    let input_border_color = if app.focus == FocusPane::Input || editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(" Ask about calling setup ");

    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = app.query.visible(inner_width);

    let input = if app.query.is_empty() && !editing {
        Paragraph::new(Span::styled(
            "Press i to type a question",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };
    frame.render_widget(input.block(block), area);

    // Show cursor when editing
    if editing {
        frame.set_cursor_position((area.x + cursor_x as u16 + 1, area.y + 1));
    }
}

fn render_panel(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Panel;
    let highlight = Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let (title, items): (String, Vec<ListItem>) = if app.conversation.panel().shows_suggestions() {
        let items = SUGGESTIONS
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<10}", s.category), Style::default().fg(Color::DarkGray)),
                    Span::raw(s.text),
                ]))
            })
            .collect();
        (" Suggestions ".to_string(), items)
    } else {
        let checklist = app.conversation.checklist();
        let items = app
            .panel_rows()
            .into_iter()
            .map(|row| match row {
                PanelRow::Step(s) => {
                    let step = &checklist.steps()[s];
                    let style = if step.is_completed() {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    let optional = if step.required { "" } else { " (optional)" };
                    ListItem::new(format!(
                        "{}. {}{} {}/{}",
                        step.number,
                        step.title,
                        optional,
                        step.completed_count(),
                        step.tasks.len()
                    ))
                    .style(style)
                }
                PanelRow::Task(s, t) => {
                    let task = &checklist.steps()[s].tasks[t];
                    let (mark, style) = if task.completed {
                        ("[x]", Style::default().fg(Color::Green))
                    } else {
                        ("[ ]", Style::default())
                    };
                    ListItem::new(format!("   {} {}", mark, task.label)).style(style)
                }
            })
            .collect();
        let title = format!(
            " Setup Steps {}/{} ",
            checklist.total_completed(),
            checklist.total_tasks()
        );
        (title, items)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)))
        .title(title);

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused { highlight } else { Style::default() })
        .highlight_symbol(if focused { "> " } else { "  " });

    frame.render_stateful_widget(list, area, &mut app.panel_state);
}

/// Calculate a centered popup and clear the area behind it
fn popup_area(frame: &mut Frame, area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(2));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup = Rect::new(popup_x, popup_y, popup_width, popup_height);
    frame.render_widget(Clear, popup);
    popup
}

fn error_line(error: Option<&str>) -> Line<'static> {
    match error {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::default(),
    }
}

fn render_location_form(form: &LocationForm, frame: &mut Frame, area: Rect) {
    let fields = LocationField::ALL;
    let popup = popup_area(frame, area, 64, fields.len() as u16 + 5);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Add Location ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let label_width = 17usize;
    let value_width = (inner.width as usize).saturating_sub(label_width + 2);
    let mut lines = Vec::new();
    let mut cursor = None;

    for (i, field) in fields.iter().enumerate() {
        let focused = i == form.focused;
        let marker = if field.required() { "*" } else { " " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let value = if field.choices().is_some() {
            let shown = form
                .choice_display(*field)
                .unwrap_or_else(|| "select".to_string());
            format!("< {} >", shown)
        } else {
            let (text, cursor_x) = form.input(*field).visible(value_width);
            if focused {
                cursor = Some((cursor_x, i));
            }
            text
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>width$}{} ", field.label(), marker, width = label_width - 1),
                label_style,
            ),
            Span::styled(value, Style::default().fg(Color::Cyan)),
        ]));
    }

    lines.push(Line::default());
    lines.push(error_line(form.error.as_deref()));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some((cursor_x, row)) = cursor {
        frame.set_cursor_position((
            inner.x + (label_width + 1) as u16 + cursor_x as u16,
            inner.y + row as u16,
        ));
    }
}

fn render_pstn_form(form: &mut PstnForm, frame: &mut Frame, area: Rect) {
    let (title, height) = match form.page {
        PstnPage::ConnectionType => (" PSTN Connection Type ", ConnectionType::all().len() as u16 * 2 + 4),
        PstnPage::Provider => (" Cloud Connected PSTN Provider ", PSTN_PROVIDERS.len() as u16 + 4),
    };
    let popup = popup_area(frame, area, 60, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [list_area, error_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let highlight = Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    match form.page {
        PstnPage::ConnectionType => {
            let items: Vec<ListItem> = ConnectionType::all()
                .into_iter()
                .map(|t| {
                    ListItem::new(vec![
                        Line::from(t.display_name()),
                        Line::from(Span::styled(
                            format!("  {}", t.description()),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ])
                })
                .collect();
            let list = List::new(items).highlight_style(highlight).highlight_symbol("> ");
            frame.render_stateful_widget(list, list_area, &mut form.type_state);
        }
        PstnPage::Provider => {
            let items: Vec<ListItem> = PSTN_PROVIDERS
                .iter()
                .map(|p| {
                    let badge = if p.certified { " (certified)" } else { "" };
                    ListItem::new(format!("{}{}", p.name, badge))
                })
                .collect();
            let list = List::new(items).highlight_style(highlight).highlight_symbol("> ");
            frame.render_stateful_widget(list, list_area, &mut form.provider_state);
        }
    }

    frame.render_widget(Paragraph::new(error_line(form.error.as_deref())), error_area);
}

fn render_phone_numbers_form(form: &PhoneNumbersForm, frame: &mut Frame, area: Rect) {
    let popup = popup_area(frame, area, 64, 9);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Add Phone Numbers ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let instructions = Paragraph::new("Enter numbers separated by commas.")
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(instructions, Rect::new(inner.x, inner.y, inner.width, 1));

    let input_area = Rect::new(inner.x, inner.y + 2, inner.width, 1);
    let (text, cursor_x) = form.input.visible(inner.width as usize);
    let input_style = if form.checkbox_focused {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(Paragraph::new(text).style(input_style), input_area);

    let mark = if form.activate_later { "[x]" } else { "[ ]" };
    let checkbox_style = if form.checkbox_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let checkbox = Paragraph::new(Span::styled(format!("{} Activate later", mark), checkbox_style));
    frame.render_widget(checkbox, Rect::new(inner.x, inner.y + 4, inner.width, 1));

    let count = form.to_data().numbers.len();
    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} number{}", count, if count == 1 { "" } else { "s" }),
            Style::default().fg(Color::DarkGray),
        )),
        error_line(form.error.as_deref()),
    ]);
    frame.render_widget(status, Rect::new(inner.x, inner.y + 5, inner.width, 2));

    if !form.checkbox_focused {
        frame.set_cursor_position((input_area.x + cursor_x as u16, input_area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aics_core::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn span_texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_markdown_bold() {
        let line = parse_markdown_line("**Connection Type:** Cisco Calling Plans");
        assert_eq!(span_texts(&line), vec!["Connection Type:", " Cisco Calling Plans"]);
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_markdown_unclosed_is_literal() {
        let line = parse_markdown_line("a **b");
        assert_eq!(span_texts(&line), vec!["a **b"]);
        assert!(parse_markdown_line("").spans.is_empty());
    }

    #[test]
    fn test_render_with_open_form() {
        let mut app = App::new(Config::new()).unwrap();
        app.conversation.send("create call queue");
        app.open_form(aics_core::Modal::Pstn);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("1 pending"));
        assert!(screen.contains("PSTN Connection Type"));
        assert_eq!(app.chip_areas.len(), 2);
    }

    #[test]
    fn test_chat_lines_match_scroll_estimate() {
        let mut app = App::new(Config::new()).unwrap();
        app.chat_width = 1000;
        app.conversation.send("create auto attendant");
        // wide enough that nothing wraps: estimate equals rendered count
        assert_eq!(chat_lines(&app).len(), app.chat_line_count());
    }
}
