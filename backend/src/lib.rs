//! Subscription Tracker Backend Library
//!
//! An HTTP service that keeps, per opaque token, a list of subscription
//! records and lets clients read or overwrite that list.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Application state management
///
/// Handles the token store and the subscription record types.
pub mod state;
