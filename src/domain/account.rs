use serde::{Deserialize, Serialize};

use super::Cents;

pub type AccountId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    Investment,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
            AccountKind::Investment => "investment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" => Some(AccountKind::Checking),
            "savings" => Some(AccountKind::Savings),
            "investment" => Some(AccountKind::Investment),
            _ => None,
        }
    }

    pub fn all() -> [AccountKind; 3] {
        [
            AccountKind::Checking,
            AccountKind::Savings,
            AccountKind::Investment,
        ]
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer account held in the session.
/// Balances are signed: the ledger may leave an account overdrawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub kind: AccountKind,
    pub balance: Cents,
    /// Masked number shown to the user, e.g. "**** 1234"
    pub account_number: String,
    /// Annual percentage yield, if the account earns interest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
}

impl Account {
    pub fn new(
        id: impl Into<AccountId>,
        kind: AccountKind,
        balance: Cents,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            balance,
            account_number: account_number.into(),
            interest_rate: None,
        }
    }

    pub fn with_interest_rate(mut self, rate: f64) -> Self {
        assert!(
            rate.is_finite() && rate >= 0.0,
            "Interest rate must be a non-negative percentage"
        );
        self.interest_rate = Some(rate);
        self
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0
    }

    /// Label used in transaction descriptions, e.g. "checking Account"
    pub fn display_label(&self) -> String {
        format!("{} Account", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_roundtrip() {
        for kind in AccountKind::all() {
            let parsed = AccountKind::from_str(kind.as_str()).unwrap();
            assert_eq!(kind, parsed);
        }
        assert_eq!(AccountKind::from_str("SAVINGS"), Some(AccountKind::Savings));
        assert_eq!(AccountKind::from_str("credit"), None);
    }

    #[test]
    fn test_account_serializes_with_lowercase_kind() {
        let account = Account::new("2", AccountKind::Savings, 1275075, "**** 5678")
            .with_interest_rate(2.5);
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["kind"], "savings");
        assert_eq!(json["interest_rate"], 2.5);
    }

    #[test]
    fn test_interest_rate_omitted_when_absent() {
        let account = Account::new("1", AccountKind::Checking, 542050, "**** 1234");
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("interest_rate").is_none());
    }

    #[test]
    #[should_panic(expected = "Interest rate must be a non-negative percentage")]
    fn test_negative_interest_rate_rejected() {
        Account::new("1", AccountKind::Savings, 0, "**** 0000").with_interest_rate(-1.0);
    }

    #[test]
    fn test_display_label_and_overdraft() {
        let mut account = Account::new("1", AccountKind::Checking, 100, "**** 1234");
        assert_eq!(account.display_label(), "checking Account");
        assert!(!account.is_overdrawn());
        account.balance = -1;
        assert!(account.is_overdrawn());
    }
}
