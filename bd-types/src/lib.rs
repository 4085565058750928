//! Core type definitions for the bot detector.
//!
//! This crate defines the identity types shared by every other crate:
//! - [`SteamId`], a 64-bit Steam identity with Steam64, Steam3 and Steam2
//!   text forms
//!
//! Anything that knows about rule lists, matching or the game client's
//! files lives in the crates built on top of this one.

mod steam_id;

pub use steam_id::{SteamId, STEAM64_BASE};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid steam id: {0}")]
    InvalidSteamId(String),
}
