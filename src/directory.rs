//! Directory snapshot and its transitions.
//!
//! [`DirectoryState`] is the whole observable state of the users view. It
//! is never mutated in place by callers: every event goes through a
//! transition that consumes the snapshot and returns the next one, which
//! keeps the view logic testable without a terminal.
//!
//! The detail and error overlays have no separate open flags. An overlay
//! is open exactly when its payload is present, so the snapshot cannot
//! claim an open modal with nothing to show.
use crate::error::FETCH_FAILURE_MESSAGE;
use crate::model::User;
use crate::search::filter_users;
use crate::sort::{SortColumn, SortState};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectoryState {
    pub users: Vec<User>,
    pub search_term: String,
    pub sort: SortState,
    pub selected_user: Option<User>,
    pub error_message: Option<String>,
    /// Requests for the listing that have not reported back yet.
    pub in_flight: usize,
}

impl DirectoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_detail_modal_open(&self) -> bool {
        self.selected_user.is_some()
    }

    pub fn is_error_modal_open(&self) -> bool {
        self.error_message.is_some()
    }

    /// True while at least one request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Rows to display: users matching the search term, sorted by the
    /// active column (fetch order when no column is active).
    pub fn visible_users(&self) -> Vec<&User> {
        let mut rows = filter_users(&self.users, &self.search_term);
        self.sort.apply(&mut rows);
        rows
    }

    pub fn fetch_started(self) -> Self {
        Self {
            in_flight: self.in_flight + 1,
            ..self
        }
    }

    /// Replace the whole collection and clear any error.
    pub fn fetch_succeeded(self, users: Vec<User>) -> Self {
        Self {
            users,
            error_message: None,
            in_flight: self.in_flight.saturating_sub(1),
            ..self
        }
    }

    /// Show the generic failure message. Users loaded earlier stay in place.
    pub fn fetch_failed(self) -> Self {
        Self {
            error_message: Some(FETCH_FAILURE_MESSAGE.to_string()),
            in_flight: self.in_flight.saturating_sub(1),
            ..self
        }
    }

    pub fn search_changed(self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..self
        }
    }

    /// A click on `column`'s header.
    pub fn sort_toggled(self, column: SortColumn) -> Self {
        Self {
            sort: self.sort.toggled(column),
            ..self
        }
    }

    /// A click on a row: opens the detail modal, replacing any earlier selection.
    pub fn row_selected(self, user: User) -> Self {
        Self {
            selected_user: Some(user),
            ..self
        }
    }

    pub fn detail_closed(self) -> Self {
        Self {
            selected_user: None,
            ..self
        }
    }

    pub fn error_dismissed(self) -> Self {
        Self {
            error_message: None,
            ..self
        }
    }
}
