//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: classifies inbound text and drives the menu state machine
//! - `callback_handler`: handles search result and FAQ selections
//! - `ui_builder`: formats messages and builds inline keyboards

pub mod callback_handler;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;
