use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type TransactionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }

    /// Signed effect of an amount moving in this direction
    pub fn signed(&self, amount: Cents) -> Cents {
        match self {
            Direction::Credit => amount,
            Direction::Debit => -amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Transfer,
    BillPayment,
    Deposit,
    Withdrawal,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Transfer => "transfer",
            TransactionCategory::BillPayment => "bill_payment",
            TransactionCategory::Deposit => "deposit",
            TransactionCategory::Withdrawal => "withdrawal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "transfer" => Some(TransactionCategory::Transfer),
            "bill_payment" => Some(TransactionCategory::BillPayment),
            "deposit" => Some(TransactionCategory::Deposit),
            "withdrawal" => Some(TransactionCategory::Withdrawal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }
}

/// How new transaction ids are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// History length plus one, rendered as a string. Only unique within a session.
    #[default]
    Sequential,
    /// Random v4 UUID
    Uuid,
}

impl IdScheme {
    pub fn next_id(&self, existing: &[Transaction]) -> TransactionId {
        match self {
            IdScheme::Sequential => (existing.len() + 1).to_string(),
            IdScheme::Uuid => Uuid::new_v4().to_string(),
        }
    }
}

/// A posted money movement as shown in the history.
/// Transactions are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    /// Amount in cents (always positive)
    pub amount: Cents,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub category: TransactionCategory,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Cents,
        direction: Direction,
        category: TransactionCategory,
    ) -> Self {
        assert!(amount > 0, "Transaction amount must be positive");
        Self {
            id: id.into(),
            date,
            description: description.into(),
            amount,
            direction,
            category,
            status: TransactionStatus::Completed,
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    pub fn signed_amount(&self) -> Cents {
        self.direction.signed(self.amount)
    }
}
