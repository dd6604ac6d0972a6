//! Library crate for userdir-tui.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST client for the user resource (`api`)
//! - Application state, views and update loop (`app`)
//! - Command-line configuration (`config`)
//! - Error and result types (`error`)
//! - File-backed tracing setup (`logging`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userdir-tui` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{ApiError, Result};
