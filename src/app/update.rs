use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Position;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode};
use crate::fetch::{FetchOutcome, UserSource, spawn_fetch};
use crate::ui;
use crate::ui::users::TableHit;

/// What the event loop should do after an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    None,
    Reload,
    Quit,
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    source: Arc<dyn UserSource>,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    request_users(app, &source, &tx);

    loop {
        drain_fetch_results(app, &rx);

        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let command = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Mouse(mouse) => {
                handle_mouse(app, mouse);
                Command::None
            }
            _ => Command::None,
        };
        match command {
            Command::Quit => break,
            Command::Reload => request_users(app, &source, &tx),
            Command::None => {}
        }
    }

    Ok(())
}

/// Start a background request for the listing.
pub fn request_users(app: &mut AppState, source: &Arc<dyn UserSource>, tx: &Sender<FetchOutcome>) {
    match spawn_fetch(Arc::clone(source), tx.clone()) {
        Ok(_) => app.transition(|d| d.fetch_started()),
        Err(err) => {
            tracing::error!(error = %err, "could not start fetch worker");
            app.transition(|d| d.fetch_failed());
        }
    }
}

fn drain_fetch_results(app: &mut AppState, rx: &Receiver<FetchOutcome>) {
    for outcome in rx.try_iter() {
        apply_fetch_outcome(app, outcome);
    }
}

/// Fold a finished request into the directory. The error detail was
/// already logged by the worker; only the generic message reaches the UI.
pub fn apply_fetch_outcome(app: &mut AppState, outcome: FetchOutcome) {
    match outcome {
        Ok(users) => app.transition(|d| d.fetch_succeeded(users)),
        Err(_) => app.transition(|d| d.fetch_failed()),
    }
}

/// Handle one key press. Overlays take the keyboard first: error, then
/// detail, then help; after that search mode, then the keymap.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Command {
    if app.directory.is_error_modal_open() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) {
            app.transition(|d| d.error_dismissed());
        }
        return Command::None;
    }

    if app.directory.is_detail_modal_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                app.transition(|d| d.detail_closed());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_row(app.cursor.saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_row(app.cursor + 1);
            }
            _ => {}
        }
        return Command::None;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return Command::None;
    }

    if app.input_mode == InputMode::Search {
        handle_search_key(app, key.code);
        return Command::None;
    }

    let Some(action) = app.keymap.resolve(&key) else {
        return Command::None;
    };
    match action {
        KeyAction::Quit => return Command::Quit,
        KeyAction::Reload => return Command::Reload,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::OpenHelp => app.show_help = true,
        KeyAction::OpenDetail => app.select_row(app.cursor),
        KeyAction::MoveUp => app.cursor = app.cursor.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.cursor + 1 < app.visible_len() {
                app.cursor += 1;
            }
        }
        KeyAction::PageUp => {
            app.cursor = app.cursor.saturating_sub(app.rows_per_page.max(1));
        }
        KeyAction::PageDown => {
            let next = app.cursor.saturating_add(app.rows_per_page.max(1));
            app.cursor = next.min(app.visible_len().saturating_sub(1));
        }
        KeyAction::SortBy(column) => {
            tracing::debug!(%column, "sort toggled");
            app.transition(|d| d.sort_toggled(column));
        }
        KeyAction::Ignore => {}
    }
    Command::None
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            set_search_term(app, String::new());
        }
        KeyCode::Backspace => {
            let mut term = app.directory.search_term.clone();
            term.pop();
            set_search_term(app, term);
        }
        KeyCode::Char(c) => {
            let mut term = app.directory.search_term.clone();
            term.push(c);
            set_search_term(app, term);
        }
        _ => {}
    }
}

fn set_search_term(app: &mut AppState, term: String) {
    app.cursor = 0;
    app.transition(|d| d.search_changed(term));
}

/// Left clicks on the table: a header cell sorts, a body row opens the detail modal.
/// Events over an open overlay are dropped; only rows left visible around it are clickable.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.directory.is_error_modal_open() {
        return;
    }
    let at = Position::new(mouse.column, mouse.row);
    if app.overlay_area.is_some_and(|overlay| overlay.contains(at)) {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let page_start = ui::users::page_start(app.cursor, app.rows_per_page);
            match ui::users::hit_test(app.table_area, page_start, mouse.column, mouse.row) {
                Some(TableHit::Header(column)) => {
                    app.transition(|d| d.sort_toggled(column));
                }
                Some(TableHit::Row(index)) => app.select_row(index),
                None => {}
            }
        }
        MouseEventKind::ScrollUp => app.cursor = app.cursor.saturating_sub(1),
        MouseEventKind::ScrollDown => {
            if app.cursor + 1 < app.visible_len() {
                app.cursor += 1;
            }
        }
        _ => {}
    }
}
