use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::dialog::{Answer, DialogKind, DialogState, Icon};

const MIN_WIDTH: u16 = 30;
const MAX_LIST_ROWS: usize = 8;

fn icon_style(icon: Icon) -> (Option<&'static str>, Color) {
    match icon {
        Icon::NoIcon => (None, Color::LightCyan),
        Icon::Information => (Some("i"), Color::LightCyan),
        Icon::Question => (Some("?"), Color::LightGreen),
        Icon::Warning => (Some("!"), Color::Yellow),
        Icon::Critical => (Some("x"), Color::LightRed),
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

pub fn render_dialog(f: &mut Frame, state: &DialogState) {
    let area = f.size();
    let request = &state.request;

    // Body lines: text, then the kind-specific part
    let text_lines: Vec<&str> = request.text.lines().collect();
    let list_rows = match &request.kind {
        DialogKind::Choice { items, .. } => items.len().min(MAX_LIST_ROWS),
        _ => 0,
    };
    let has_input = match &request.kind {
        DialogKind::Input { .. } | DialogKind::SaveFile { .. } | DialogKind::OpenFile { .. } => {
            true
        }
        DialogKind::Choice { editable, .. } => *editable,
        _ => false,
    };
    let filter_line = match &request.kind {
        DialogKind::SaveFile { filters } | DialogKind::OpenFile { filters } => Some(
            filters
                .iter()
                .map(|filter| filter.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    };
    let notice = state
        .overwrite
        .as_ref()
        .map(|path| format!("{} already exists. Replace it?", path.display()));

    let max_line_width = text_lines
        .iter()
        .map(|line| to_u16(line.chars().count()))
        .chain(filter_line.iter().map(|line| to_u16(line.chars().count())))
        .chain(notice.iter().map(|line| to_u16(line.chars().count())))
        .chain(std::iter::once(
            to_u16(request.title.chars().count()).saturating_add(4),
        ))
        .max()
        .unwrap_or(MIN_WIDTH);

    let text_height = to_u16(text_lines.len().max(1));
    let content_width = max_line_width.saturating_add(4).max(MIN_WIDTH);
    let content_height = text_height
        .saturating_add(u16::from(filter_line.is_some()))
        .saturating_add(to_u16(list_rows))
        .saturating_add(if has_input { 3 } else { 0 })
        .saturating_add(1) // error line
        .saturating_add(1) // buttons
        .saturating_add(2); // borders

    // Ensure popup fits within screen
    let popup_width = content_width.min(area.width.saturating_sub(4));
    let popup_height = content_height.min(area.height.saturating_sub(2));

    // Center the popup on screen
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let (marker, color) = icon_style(request.icon);
    let title = match marker {
        Some(marker) => format!(" [{}] {} ", marker, request.title),
        None => format!(" {} ", request.title),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let mut constraints = vec![Constraint::Length(text_height)];
    if filter_line.is_some() {
        constraints.push(Constraint::Length(1));
    }
    if list_rows > 0 {
        constraints.push(Constraint::Length(to_u16(list_rows)));
    }
    if has_input {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);
    let mut chunk = chunks.iter().copied();

    if let Some(text_area) = chunk.next() {
        let paragraph = Paragraph::new(request.text.clone()).wrap(Wrap { trim: false });
        f.render_widget(paragraph, text_area);
    }

    if let Some(filters) = filter_line {
        if let Some(filter_area) = chunk.next() {
            let line = Line::from(Span::styled(
                filters,
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(Paragraph::new(line), filter_area);
        }
    }

    if list_rows > 0 {
        if let (Some(list_area), DialogKind::Choice { items, .. }) =
            (chunk.next(), &request.kind)
        {
            draw_choice_list(f, items, state.selected, list_rows, list_area);
        }
    }

    if has_input {
        if let Some(input_area) = chunk.next() {
            draw_input(f, state, input_area);
        }
    }

    if let Some(error_area) = chunk.next() {
        if let Some(notice) = notice {
            let line = Line::from(Span::styled(
                notice,
                Style::default().fg(Color::Yellow),
            ));
            f.render_widget(Paragraph::new(line), error_area);
        } else if let Some(error) = &state.error {
            let line = Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::LightRed),
            ));
            f.render_widget(Paragraph::new(line), error_area);
        }
    }

    if let Some(button_area) = chunk.next() {
        f.render_widget(Paragraph::new(button_line(state)), button_area);
    }
}

fn draw_choice_list(f: &mut Frame, items: &[String], selected: usize, rows: usize, area: Rect) {
    // Keep the selection in view
    let offset = selected.saturating_sub(rows.saturating_sub(1));

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(idx, item)| {
            if idx == selected {
                Line::from(Span::styled(
                    format!("> {}", item),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", item))
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_input(f: &mut Frame, state: &DialogState, area: Rect) {
    let text = state.text();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightYellow));
    let inner = block.inner(area);

    // Scroll horizontally so the cursor stays visible
    let (_, cursor_col) = state.text_area.cursor();
    let visible = inner.width.saturating_sub(1) as usize;
    let scroll = cursor_col.saturating_sub(visible);
    let shown: String = text.chars().skip(scroll).take(visible + 1).collect();

    f.render_widget(Paragraph::new(shown).block(block), area);

    if inner.width > 0 {
        let cursor_x = inner.x + (cursor_col - scroll).min(visible) as u16;
        f.set_cursor(cursor_x, inner.y);
    }
}

fn button_line(state: &DialogState) -> Line<'static> {
    let focused = Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(Color::White);

    match &state.request.kind {
        _ if state.overwrite.is_some() => yes_no(state.focus, focused, normal),
        DialogKind::Confirm => yes_no(state.focus, focused, normal),
        DialogKind::Message => Line::from(Span::styled(" OK ", focused)),
        _ => Line::from(vec![
            Span::styled(" Enter: OK ", focused),
            Span::raw("  "),
            Span::styled(" Esc: Cancel ", normal),
        ]),
    }
}

fn yes_no(focus: Answer, focused: Style, normal: Style) -> Line<'static> {
    let (yes, no) = match focus {
        Answer::Yes => (focused, normal),
        Answer::No => (normal, focused),
    };
    Line::from(vec![
        Span::styled(" Yes ", yes),
        Span::raw("  "),
        Span::styled(" No ", no),
    ])
}
