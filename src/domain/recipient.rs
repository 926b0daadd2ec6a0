use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Names shown to the payer after a mobile payment. Purely cosmetic.
pub const DEMO_RECIPIENT_NAMES: [&str; 4] =
    ["John Smith", "Sarah Johnson", "Michael Brown", "Emma Wilson"];

/// A saved payee for outgoing transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub bank: String,
}

impl Recipient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        account_number: impl Into<String>,
        bank: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_number: account_number.into(),
            bank: bank.into(),
        }
    }

    /// Case-insensitive match on the name, exact substring on the account number.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
            || self.account_number.contains(query)
    }
}

pub fn search_recipients<'a>(recipients: &'a [Recipient], query: &str) -> Vec<&'a Recipient> {
    recipients.iter().filter(|r| r.matches(query)).collect()
}

/// Resolves the display name shown for a mobile payment.
pub trait RecipientNamer {
    fn name_for(&self, mobile_number: &str) -> String;
}

/// Picks one of the demo names at random, ignoring the number.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomDemoNamer;

impl RecipientNamer for RandomDemoNamer {
    fn name_for(&self, _mobile_number: &str) -> String {
        let mut rng = rand::thread_rng();
        DEMO_RECIPIENT_NAMES
            .choose(&mut rng)
            .copied()
            .unwrap_or(DEMO_RECIPIENT_NAMES[0])
            .to_string()
    }
}

/// Always returns the same name.
#[derive(Debug, Clone)]
pub struct FixedNamer(pub String);

impl FixedNamer {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl RecipientNamer for FixedNamer {
    fn name_for(&self, _mobile_number: &str) -> String {
        self.0.clone()
    }
}
