//! The users table: six sortable columns, paged to the available height.
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::AppState;
use crate::directory::DirectoryState;
use crate::sort::SortColumn;

pub const NOT_FOUND_PLACEHOLDER: &str = "The user could not be located";
pub const LOADING_PLACEHOLDER: &str = "Loading users…";

const COLUMN_SPACING: u16 = 1;
const WIDTHS: [Constraint; 6] = [
    Constraint::Percentage(20),
    Constraint::Percentage(13),
    Constraint::Percentage(22),
    Constraint::Percentage(17),
    Constraint::Percentage(13),
    Constraint::Percentage(15),
];

/// Where a click on the table landed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableHit {
    Header(SortColumn),
    /// Index into the visible rows.
    Row(usize),
}

/// First visible row index of the page containing `cursor`.
pub fn page_start(cursor: usize, rows_per_page: usize) -> usize {
    let rpp = rows_per_page.max(1);
    (cursor / rpp) * rpp
}

/// Text shown in place of the body when there are no rows to display.
pub fn placeholder(directory: &DirectoryState) -> &'static str {
    if directory.is_loading() && directory.users.is_empty() {
        LOADING_PLACEHOLDER
    } else {
        NOT_FOUND_PLACEHOLDER
    }
}

fn table_block(title: String, app: &AppState) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

fn column_rects(inner: Rect) -> Vec<Rect> {
    Layout::horizontal(WIDTHS)
        .spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .split(inner)
        .to_vec()
}

/// Map a terminal cell to the table header or a body row.
///
/// `area` is the full table area including its border; rows are counted
/// from `page_start`.
pub fn hit_test(area: Rect, page_start: usize, x: u16, y: u16) -> Option<TableHit> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let inside = x >= inner.x
        && x < inner.x.saturating_add(inner.width)
        && y >= inner.y
        && y < inner.y.saturating_add(inner.height);
    if !inside {
        return None;
    }
    if y == inner.y {
        return column_rects(inner)
            .iter()
            .position(|c| x >= c.x && x < c.x + c.width)
            .and_then(SortColumn::from_index)
            .map(TableHit::Header);
    }
    let offset = (y - inner.y - 1) as usize;
    Some(TableHit::Row(page_start + offset))
}

/// Render the users table and record its geometry for mouse handling.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    app.table_area = area;
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let visible = app.directory.visible_users();
    let sort = app.directory.sort;

    let header_cells = SortColumn::ALL.iter().map(|column| {
        let label = if sort.column == Some(*column) {
            format!("{} {}", column.label(), sort.direction.indicator())
        } else {
            column.label().to_string()
        };
        Cell::from(label)
    });
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let start = page_start(app.cursor, app.rows_per_page);
    let end = (start + app.rows_per_page).min(visible.len());
    let slice = visible.get(start..end).unwrap_or_default();

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(
            SortColumn::ALL
                .iter()
                .map(|column| Cell::from(column.value(u).to_string())),
        )
        .style(style)
    });

    let title = format!("Users ({}/{})", visible.len(), app.directory.users.len());
    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(table_block(title, app))
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start);
    f.render_widget(table, area);

    if visible.is_empty() {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if inner.height > 1 {
            let body = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            };
            let p = Paragraph::new(placeholder(&app.directory))
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.muted));
            f.render_widget(p, body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_start_snaps_to_page() {
        assert_eq!(page_start(0, 10), 0);
        assert_eq!(page_start(9, 10), 0);
        assert_eq!(page_start(10, 10), 10);
        assert_eq!(page_start(25, 10), 20);
        assert_eq!(page_start(3, 0), 3);
    }

    #[test]
    fn hit_test_maps_header_and_rows() {
        let area = Rect::new(0, 0, 102, 12);
        // inner area is x 1..101, header on y = 1
        assert_eq!(hit_test(area, 0, 1, 1), Some(TableHit::Header(SortColumn::Name)));
        assert_eq!(hit_test(area, 0, 95, 1), Some(TableHit::Header(SortColumn::Company)));
        assert_eq!(hit_test(area, 0, 5, 2), Some(TableHit::Row(0)));
        assert_eq!(hit_test(area, 20, 5, 4), Some(TableHit::Row(22)));
    }

    #[test]
    fn hit_test_ignores_border_and_outside() {
        let area = Rect::new(0, 0, 102, 12);
        assert_eq!(hit_test(area, 0, 0, 5), None);
        assert_eq!(hit_test(area, 0, 5, 0), None);
        assert_eq!(hit_test(area, 0, 5, 11), None);
        assert_eq!(hit_test(area, 0, 200, 5), None);
    }

    #[test]
    fn placeholder_prefers_loading_before_first_load() {
        let d = DirectoryState::new().fetch_started();
        assert_eq!(placeholder(&d), LOADING_PLACEHOLDER);
        let d = d.fetch_succeeded(Vec::new());
        assert_eq!(placeholder(&d), NOT_FOUND_PLACEHOLDER);
    }
}
