//! sysdash: terminal dashboard for a system monitoring HTTP backend.
//!
//! The library holds the refresh engine and view state so they can be driven
//! from tests without a terminal; `main.rs` only wires up the TUI.

pub mod app;
pub mod banner;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod prefs;
pub mod refresh;
pub mod render;
pub mod schedule;
pub mod types;
pub mod ui;
pub mod view;
