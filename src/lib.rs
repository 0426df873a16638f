//! snipdeck - terminal code snippet browser
//!
//! A static catalog of code snippets, filtered interactively by free-text
//! search, language, tags and a favorites toggle. Snippets can be copied to
//! the system clipboard and are shown with syntax highlighting.
//!
//! The filtering and state logic (`catalog`, `state`, `models`) has no
//! dependency on the terminal; `app`, `handlers` and `ui` are the ratatui
//! host around it.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod handlers;
pub mod highlight;
pub mod logging;
pub mod models;
pub mod state;
pub mod ui;
