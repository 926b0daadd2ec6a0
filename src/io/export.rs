use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::MonthlyStatement;
use crate::domain::{LedgerState, Transaction, format_cents};

/// Full session snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    /// Business date the session was operating on
    pub as_of: NaiveDate,
    #[serde(flatten)]
    pub state: LedgerState,
}

/// Exporter for writing session data out as statements
pub struct Exporter<'a> {
    state: &'a LedgerState,
}

impl<'a> Exporter<'a> {
    pub fn new(state: &'a LedgerState) -> Self {
        Self { state }
    }

    /// Export the transaction history to CSV, newest first
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        write_transactions_csv(&self.state.transactions, writer)
    }

    /// Export monthly statements to CSV
    pub fn export_statements_csv<W: Write>(
        &self,
        statements: &[MonthlyStatement],
        writer: W,
    ) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "statement",
            "transactions",
            "total_inflow",
            "total_outflow",
            "net_change",
        ])?;

        for statement in statements {
            csv_writer.write_record([
                statement.title(),
                statement.transaction_count.to_string(),
                format_cents(statement.total_inflow),
                format_cents(statement.total_outflow),
                format_cents(statement.net_change),
            ])?;
        }

        csv_writer.flush().context("Failed to flush statement CSV")?;
        Ok(statements.len())
    }

    /// Export the whole session as a pretty-printed JSON snapshot
    pub fn export_snapshot_json<W: Write>(
        &self,
        as_of: NaiveDate,
        mut writer: W,
    ) -> Result<SessionSnapshot> {
        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            as_of,
            state: self.state.clone(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

/// Write any slice of transactions as CSV. Amounts are plain decimals.
pub fn write_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "date",
        "description",
        "amount",
        "type",
        "category",
        "status",
    ])?;

    for tx in transactions {
        csv_writer.write_record([
            tx.id.clone(),
            tx.date.format("%Y-%m-%d").to_string(),
            tx.description.clone(),
            format_cents(tx.amount),
            tx.direction.as_str().to_string(),
            tx.category.as_str().to_string(),
            tx.status.as_str().to_string(),
        ])?;
    }

    csv_writer
        .flush()
        .context("Failed to flush transaction CSV")?;
    Ok(transactions.len())
}
