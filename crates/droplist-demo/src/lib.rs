#![forbid(unsafe_code)]

//! Scripted replay demo for the droplist panel.
//!
//! Loads records and a pointer script (or uses the built-in samples), replays
//! the script against a [`droplist_widgets::DraggableList`], and prints the
//! notifications it fired along with the rendered frame.

pub mod cli;
pub mod error;
pub mod replay;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
