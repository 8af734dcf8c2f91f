//! # Admissions Telegram Bot
//!
//! A bilingual (Russian/Kazakh) Telegram bot that routes applicants through
//! a fixed menu tree, serves informational text and documents from a SQLite
//! store, and offers a keyword search across the content tables.

pub mod bot;
pub mod config;
pub mod db;
pub mod error;
pub mod keyboards;
pub mod localization;
pub mod router;
pub mod state;
