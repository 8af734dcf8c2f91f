//! Turn-level error classes.
//!
//! Every handler isolates its own failure: a `Store` error becomes a generic
//! localized message and a reset to the main menu, a `Delivery` error becomes
//! a localized "file not found" while the turn completes normally. A content
//! miss is not an error at all: the store API returns `Ok(None)` and the
//! caller substitutes a localized "no information" message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TurnError {
    /// The content store or feedback log could not be reached.
    #[error("content store unavailable: {0}")]
    Store(#[from] rusqlite::Error),
    /// A document could not be sent to the user.
    #[error("document delivery failed: {0}")]
    Delivery(#[from] teloxide::RequestError),
}

pub type StoreResult<T> = Result<T, TurnError>;
