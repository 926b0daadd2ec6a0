use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Account, AccountKind, Cents, Direction, Transaction, TransactionCategory, sum_cents,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsOverview {
    pub total_balance: Cents,
    pub by_kind: Vec<KindTotal>,
    pub overdrawn: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTotal {
    pub kind: AccountKind,
    pub balance: Cents,
    pub count: usize,
}

pub fn accounts_overview(accounts: &[Account]) -> AccountsOverview {
    let by_kind = AccountKind::all()
        .into_iter()
        .map(|kind| {
            let matching = accounts.iter().filter(|a| a.kind == kind);
            KindTotal {
                kind,
                balance: sum_cents(matching.clone().map(|a| a.balance)),
                count: matching.count(),
            }
        })
        .filter(|k| k.count > 0)
        .collect();

    AccountsOverview {
        total_balance: sum_cents(accounts.iter().map(|a| a.balance)),
        by_kind,
        overdrawn: accounts
            .iter()
            .filter(|a| a.is_overdrawn())
            .map(|a| a.id.clone())
            .collect(),
    }
}

/// Inflow, outflow and net change for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStatement {
    pub year: i32,
    pub month: u32,
    pub transaction_count: usize,
    pub total_inflow: Cents,
    pub total_outflow: Cents,
    pub net_change: Cents,
}

impl MonthlyStatement {
    /// e.g. "March 2025"
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

pub fn monthly_statement(transactions: &[Transaction], year: i32, month: u32) -> MonthlyStatement {
    let in_month = transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month);
    fold_statement(year, month, in_month)
}

/// One statement per month that has activity, newest month first.
pub fn monthly_statements(transactions: &[Transaction]) -> Vec<MonthlyStatement> {
    let mut months: BTreeMap<(i32, u32), Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        months
            .entry((tx.date.year(), tx.date.month()))
            .or_default()
            .push(tx);
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), txs)| fold_statement(year, month, txs.into_iter()))
        .collect()
}

fn fold_statement<'a>(
    year: i32,
    month: u32,
    transactions: impl Iterator<Item = &'a Transaction>,
) -> MonthlyStatement {
    let mut statement = MonthlyStatement {
        year,
        month,
        transaction_count: 0,
        total_inflow: 0,
        total_outflow: 0,
        net_change: 0,
    };
    for tx in transactions {
        statement.transaction_count += 1;
        match tx.direction {
            Direction::Credit => {
                statement.total_inflow = statement.total_inflow.saturating_add(tx.amount)
            }
            Direction::Debit => {
                statement.total_outflow = statement.total_outflow.saturating_add(tx.amount)
            }
        }
    }
    statement.net_change = statement.total_inflow.saturating_sub(statement.total_outflow);
    statement
}

/// Filter for the transaction history view
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<TransactionCategory>,
    pub direction: Option<Direction>,
    /// Case-insensitive match against the description
    pub search: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.category.is_none_or(|c| tx.category == c)
            && self.direction.is_none_or(|d| tx.direction == d)
            && self.from_date.is_none_or(|from| tx.date >= from)
            && self.to_date.is_none_or(|to| tx.date <= to)
            && self.search.as_deref().is_none_or(|q| {
                tx.description.to_lowercase().contains(&q.to_lowercase())
            })
    }
}

/// Apply a filter, keeping history order (newest first).
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .take(filter.limit.unwrap_or(usize::MAX))
        .collect()
}
