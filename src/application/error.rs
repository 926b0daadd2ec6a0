use thiserror::Error;

use crate::domain::{LedgerError, ParseCentsError};

use super::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseCentsError),

    #[error("Recipient is required")]
    MissingRecipient,

    #[error("Invalid mobile number: {0}")]
    InvalidMobileNumber(String),

    #[error("Card rejected: {}", .0.join("; "))]
    CardRejected(Vec<String>),

    #[error("Loan application rejected: {}", .0.join("; "))]
    LoanApplicationRejected(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
