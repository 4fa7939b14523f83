//! Library crate for user-directory.
//!
//! This crate exposes the building blocks of the TUI:
//! - User records and response decoding (`model`)
//! - The directory snapshot and its transitions (`directory`)
//! - Search filter and column sort (`search`, `sort`)
//! - Fetching the listing over HTTP (`fetch`)
//! - Application state, keymap and event loop (`app`)
//! - UI rendering and widgets (`ui`)
//! - Error and result types (`error`)
//!
//! It is used by the `user-directory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod model;
pub mod search;
pub mod sort;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use directory::DirectoryState;
pub use error::{DynError, FetchError, Result};
pub use model::User;
