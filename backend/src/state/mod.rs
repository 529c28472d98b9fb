// State management module
// Holds the shared subscription store and the record types it serves

pub mod app_state;
pub mod models;
pub mod store;

pub use app_state::{AppState, SharedState};
pub use models::{NewTokenResponse, Subscription, Token, UserSubscriptions};
pub use store::{SubscriptionStore, TOKEN_LENGTH};
