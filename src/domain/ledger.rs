use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Account, AccountKind, Bill, Cents, Transaction, format_cents, sum_cents};

/// Whether a debit may take an account below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdraftPolicy {
    #[default]
    Allow,
    Reject,
}

/// Everything the session owns. Ledger operations never mutate a state in
/// place: they return a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub accounts: Vec<Account>,
    /// Newest first
    pub transactions: Vec<Transaction>,
    pub bills: Vec<Bill>,
}

impl LedgerState {
    pub fn new(accounts: Vec<Account>, transactions: Vec<Transaction>, bills: Vec<Bill>) -> Self {
        Self {
            accounts,
            transactions,
            bills,
        }
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn bill(&self, id: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn total_balance(&self) -> Cents {
        sum_cents(self.accounts.iter().map(|a| a.balance))
    }

    pub fn balance_by_kind(&self, kind: AccountKind) -> Cents {
        sum_cents(
            self.accounts
                .iter()
                .filter(|a| a.kind == kind)
                .map(|a| a.balance),
        )
    }

    /// Build the next state from updated accounts and bills, prepending `posted`.
    pub fn with_posting(
        &self,
        accounts: Vec<Account>,
        bills: Vec<Bill>,
        posted: Option<Transaction>,
    ) -> Self {
        let mut transactions = Vec::with_capacity(self.transactions.len() + 1);
        transactions.extend(posted);
        transactions.extend(self.transactions.iter().cloned());
        Self {
            accounts,
            transactions,
            bills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Bill not found: {0}")]
    BillNotFound(String),

    #[error("Bill already paid: {0}")]
    BillAlreadyPaid(String),

    #[error("Invalid amount: {} (must be positive)", amount_str(.0))]
    InvalidAmount(Cents),

    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(String),

    #[error(
        "Insufficient funds in account {account}: balance {}, required {}",
        amount_str(.balance),
        amount_str(.required)
    )]
    InsufficientFunds {
        account: String,
        balance: Cents,
        required: Cents,
    },

    #[error(
        "Amount {} would take account {account} outside the representable range (balance {})",
        amount_str(.amount),
        amount_str(.balance)
    )]
    AmountOverflow {
        account: String,
        balance: Cents,
        amount: Cents,
    },
}

fn amount_str(cents: &Cents) -> String {
    format_cents(*cents)
}

fn ensure_positive(amount: Cents) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

fn find_account<'a>(accounts: &'a [Account], id: &str) -> Result<&'a Account, LedgerError> {
    accounts
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
}

/// Subtract `amount` from one account.
pub fn debit_account(
    accounts: &[Account],
    account_id: &str,
    amount: Cents,
    policy: OverdraftPolicy,
) -> Result<Vec<Account>, LedgerError> {
    ensure_positive(amount)?;
    let account = find_account(accounts, account_id)?;

    if policy == OverdraftPolicy::Reject && account.balance < amount {
        return Err(LedgerError::InsufficientFunds {
            account: account_id.to_string(),
            balance: account.balance,
            required: amount,
        });
    }

    adjust(accounts, account_id, -amount)
}

/// Add `amount` to one account.
pub fn credit_account(
    accounts: &[Account],
    account_id: &str,
    amount: Cents,
) -> Result<Vec<Account>, LedgerError> {
    ensure_positive(amount)?;
    find_account(accounts, account_id)?;
    adjust(accounts, account_id, amount)
}

/// Move `amount` between two accounts of the session. Either both balances
/// change or the input is returned untouched via the error.
pub fn move_between_accounts(
    accounts: &[Account],
    from_id: &str,
    to_id: &str,
    amount: Cents,
    policy: OverdraftPolicy,
) -> Result<Vec<Account>, LedgerError> {
    if from_id == to_id {
        return Err(LedgerError::SameAccount(from_id.to_string()));
    }
    find_account(accounts, to_id)?;
    let debited = debit_account(accounts, from_id, amount, policy)?;
    adjust(&debited, to_id, amount)
}

/// Flip a pending or overdue bill to paid.
pub fn settle_bill(
    bills: &[Bill],
    bill_id: &str,
    paid_on: chrono::NaiveDate,
) -> Result<Vec<Bill>, LedgerError> {
    let bill = bills
        .iter()
        .find(|b| b.id == bill_id)
        .ok_or_else(|| LedgerError::BillNotFound(bill_id.to_string()))?;
    if bill.is_paid() {
        return Err(LedgerError::BillAlreadyPaid(bill_id.to_string()));
    }

    Ok(bills
        .iter()
        .cloned()
        .map(|mut b| {
            if b.id == bill_id {
                b.mark_paid(paid_on);
            }
            b
        })
        .collect())
}

/// Apply `delta` to one balance. Fails without touching anything if the
/// result does not fit in `Cents`.
fn adjust(
    accounts: &[Account],
    account_id: &str,
    delta: Cents,
) -> Result<Vec<Account>, LedgerError> {
    accounts
        .iter()
        .cloned()
        .map(|mut a| {
            if a.id == account_id {
                let balance = a.balance.checked_add(delta).ok_or_else(|| {
                    LedgerError::AmountOverflow {
                        account: a.id.clone(),
                        balance: a.balance,
                        amount: delta.abs(),
                    }
                })?;
                a.balance = balance;
            }
            Ok(a)
        })
        .collect()
}

/// Net effect of a list of transactions on the customer's money.
pub fn net_change(transactions: &[Transaction]) -> Cents {
    sum_cents(transactions.iter().map(|t| t.signed_amount()))
}
