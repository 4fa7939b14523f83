pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode};

/// Draw one frame: search bar, users table, status bar, then whichever
/// overlays are open (error above detail above help).
pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());

    let searching = app.input_mode == InputMode::Search;
    let mut spans = vec![
        Span::raw("Search: "),
        Span::styled(
            app.directory.search_term.clone(),
            Style::default().fg(app.theme.text),
        ),
    ];
    if searching {
        spans.push(Span::styled("█", Style::default().fg(app.theme.highlight_fg)));
    } else if app.directory.search_term.is_empty() {
        spans.push(Span::styled(
            "press / to filter by name, username, email, phone, city or company",
            Style::default().fg(app.theme.muted),
        ));
    }
    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title("User directory")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if searching {
                    app.theme.highlight_fg
                } else {
                    app.theme.border
                })),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    users::render_users_table(f, root[1], app);
    components::render_status_bar(f, root[2], app);

    let area = f.area();
    let mut overlay = None;
    if app.show_help {
        overlay = Some(components::render_help_modal(f, area, app));
    }
    if let Some(user) = &app.directory.selected_user {
        overlay = Some(components::render_detail_modal(f, area, app, user));
    }
    if let Some(message) = &app.directory.error_message {
        overlay = Some(components::render_error_modal(f, area, app, message));
    }
    app.overlay_area = overlay;
}
