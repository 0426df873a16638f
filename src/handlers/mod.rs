//! Event Handling Module
//!
//! Sits between raw terminal events and application state changes.
//!
//! # Module Organization
//!
//! - **`keys`**: Keyboard input processing and navigation logic
//!

pub mod keys;
