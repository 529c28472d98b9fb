//! In-memory subscription store
//!
//! Maps each token to an ordered list of subscriptions. The map and the
//! token generator live behind one lock, so every operation is a single
//! atomic read or write. Nothing is persisted.

use super::models::{Subscription, Token};
use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

/// Length of every generated token
pub const TOKEN_LENGTH: usize = 32;

#[derive(Debug)]
struct StoreInner {
    entries: HashMap<Token, Vec<Subscription>>,
    rng: StdRng,
}

/// Token → subscription list table shared by all requests
#[derive(Debug)]
pub struct SubscriptionStore {
    inner: RwLock<StoreInner>,
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionStore {
    /// Create an empty store whose token generator is seeded from the clock
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// Create an empty store with a fixed generator seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                entries: HashMap::new(),
                rng: StdRng::seed_from_u64(seed),
            }),
        }
    }

    /// Insert the two built-in sample tokens, replacing them if present
    pub async fn seed_sample_data(&self) {
        for (token, subscriptions) in sample_data() {
            self.replace(token.to_string(), subscriptions).await;
        }
    }

    /// Look up the list stored for `token`
    pub async fn get(&self, token: &str) -> Option<Vec<Subscription>> {
        self.inner.read().await.entries.get(token).cloned()
    }

    /// Whether `token` has an entry
    pub async fn contains(&self, token: &str) -> bool {
        self.inner.read().await.entries.contains_key(token)
    }

    /// Number of tokens in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Whether the store holds no tokens
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Generate a fresh token and register it with an empty list
    ///
    /// A candidate that already exists is discarded and regenerated, so an
    /// existing list is never overwritten.
    pub async fn create_token(&self) -> Token {
        let mut inner = self.inner.write().await;
        let token = loop {
            let candidate = generate_token(&mut inner.rng);
            if !inner.entries.contains_key(&candidate) {
                break candidate;
            }
            tracing::warn!("Generated token collided with an existing entry, regenerating");
        };
        inner.entries.insert(token.clone(), Vec::new());
        token
    }

    /// Replace the list for `token` wholesale, creating the entry if needed
    ///
    /// Ids are reassigned 1..=N in submitted order. Returns the stored list.
    pub async fn replace(
        &self,
        token: Token,
        subscriptions: Vec<Subscription>,
    ) -> Vec<Subscription> {
        let subscriptions = renumber(subscriptions);
        let mut inner = self.inner.write().await;
        inner.entries.insert(token, subscriptions.clone());
        subscriptions
    }
}

/// Draw a token of `TOKEN_LENGTH` characters from `[A-Za-z0-9]`
pub fn generate_token<R: Rng>(rng: &mut R) -> Token {
    (0..TOKEN_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

fn renumber(mut subscriptions: Vec<Subscription>) -> Vec<Subscription> {
    for (index, subscription) in subscriptions.iter_mut().enumerate() {
        subscription.id = index as u32 + 1;
    }
    subscriptions
}

fn sample_data() -> Vec<(&'static str, Vec<Subscription>)> {
    vec![
        (
            "ABCDEF",
            vec![
                Subscription::new(
                    "YouTube Premium",
                    11.99,
                    "USD",
                    "monthly",
                    "2023-01-01",
                    "https://simpleicons.org/icons/youtube.svg",
                ),
                Subscription::new(
                    "Spotify",
                    9.99,
                    "USD",
                    "monthly",
                    "2023-02-15",
                    "https://simpleicons.org/icons/spotify.svg",
                ),
            ],
        ),
        (
            "XYZ789",
            vec![
                Subscription::new(
                    "Netflix",
                    15.49,
                    "USD",
                    "monthly",
                    "2023-03-01",
                    "https://simpleicons.org/icons/netflix.svg",
                ),
                Subscription::new(
                    "Amazon Prime",
                    14.99,
                    "USD",
                    "monthly",
                    "2023-05-01",
                    "https://simpleicons.org/icons/amazon.svg",
                ),
            ],
        ),
    ]
}
