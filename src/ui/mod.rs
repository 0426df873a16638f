//! User Interface Module
//!
//! Rendering for the terminal browser. Nothing here mutates application
//! state; every view reads from `&App`.

pub mod browser;
pub mod colors;
pub mod components;
