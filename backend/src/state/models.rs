// Subscription record and wire envelope types

use serde::{Deserialize, Serialize};

/// Opaque key identifying one subscription list
pub type Token = String;

/// One billed service owned by a token
///
/// `id` is assigned by the store and is unique within its list. Any id sent
/// by a client is accepted on decode and then overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// 1-based position of the record within its list
    #[serde(default)]
    pub id: u32,
    /// Display name of the service
    pub name: String,
    /// Price per billing period
    pub price: f64,
    /// Currency code, e.g. "USD"
    pub currency: String,
    /// Billing period, e.g. "monthly"
    pub period: String,
    /// Date of the first bill, kept as opaque text
    pub first_bill_date: String,
    /// Icon URL, kept as opaque text
    pub icon: String,
}

impl Subscription {
    /// Create a record with id 0; the store assigns the real id
    pub fn new(
        name: impl Into<String>,
        price: f64,
        currency: impl Into<String>,
        period: impl Into<String>,
        first_bill_date: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
            currency: currency.into(),
            period: period.into(),
            first_bill_date: first_bill_date.into(),
            icon: icon.into(),
        }
    }
}

/// `{"subscriptions": [...]}` envelope used by both reads and sync
///
/// The `subscriptions` key is required on decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserSubscriptions {
    /// Subscriptions in list order
    pub subscriptions: Vec<Subscription>,
}

impl From<Vec<Subscription>> for UserSubscriptions {
    fn from(subscriptions: Vec<Subscription>) -> Self {
        Self { subscriptions }
    }
}

/// Response body for a freshly created token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTokenResponse {
    /// The generated token
    pub token: Token,
}
