//! Shared UI components: status bar and the overlay dialogs.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode};
use crate::model::User;

/// Render the bottom status bar with mode, counts and sort.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
    };
    let sort = match app.directory.sort.column {
        Some(column) => format!(
            "  sort:{} {}",
            column.path(),
            app.directory.sort.direction.indicator()
        ),
        None => String::new(),
    };
    let loading = if app.directory.is_loading() { "  loading…" } else { "" };
    let msg = format!(
        "mode: {mode}  users:{}  rows/page:{}{sort}{loading}  ?: help",
        app.directory.users.len(),
        app.rows_per_page,
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn label_line(label: &str, value: &str, width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:>width$}: ", label, width = width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

/// Read-only view of every field of `user`. Returns the area it covers.
pub fn render_detail_modal(f: &mut Frame, area: Rect, app: &AppState, user: &User) -> Rect {
    let fields = user.detail_fields();
    let label_w = fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(label, value)| label_line(label, value, label_w))
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Esc / Enter: close   ↑/↓: previous / next user",
        Style::default().fg(app.theme.muted),
    )));

    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("User Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
    rect
}

/// Dismissible overlay with the current error message.
pub fn render_error_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) -> Rect {
    let max_w = area.width.saturating_sub(6).max(30);
    let width = 50u16.min(max_w);
    let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
    let height = (approx_lines + 5).min(area.height);
    let rect = centered_rect(width, height, area);
    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(app.theme.error_fg),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Esc / Enter: dismiss",
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error_fg)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
    rect
}

/// Help overlay listing the current keybindings, grouped by purpose.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) -> Rect {
    let mut general: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut navigation: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut sorting: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for ((mods, code), action) in app.keymap.all_bindings() {
        if mods.contains(crossterm::event::KeyModifiers::SHIFT) {
            continue;
        }
        let key = Keymap::format_key(mods, code);
        let (section, label) = match action {
            KeyAction::Quit => (&mut general, "Quit".to_string()),
            KeyAction::StartSearch => (&mut general, "Search".to_string()),
            KeyAction::Reload => (&mut general, "Reload users".to_string()),
            KeyAction::OpenHelp => (&mut general, "Help".to_string()),
            KeyAction::OpenDetail => (&mut general, "Show details".to_string()),
            KeyAction::MoveUp => (&mut navigation, "Move up".to_string()),
            KeyAction::MoveDown => (&mut navigation, "Move down".to_string()),
            KeyAction::PageUp => (&mut navigation, "Page up".to_string()),
            KeyAction::PageDown => (&mut navigation, "Page down".to_string()),
            KeyAction::SortBy(column) => (&mut sorting, format!("Sort by {}", column.label())),
            KeyAction::Ignore => continue,
        };
        section.entry(label).or_default().insert(key);
    }

    let label_w = general
        .keys()
        .chain(navigation.keys())
        .chain(sorting.keys())
        .map(|k| k.len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    let sections = [
        ("General:", &general),
        ("Navigation:", &navigation),
        ("Sorting (press again to reverse):", &sorting),
    ];
    for (heading, entries) in sections {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (label, keys) in entries.iter() {
            let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
            lines.push(label_line(label, &joined, label_w));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Mouse: click a header to sort, a row for details",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
    rect
}
