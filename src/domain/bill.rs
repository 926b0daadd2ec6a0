use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Cents;

pub type BillId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
    Overdue,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillCategory {
    Utility,
    CreditCard,
    Loan,
    Other,
}

impl BillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillCategory::Utility => "utility",
            BillCategory::CreditCard => "credit_card",
            BillCategory::Loan => "loan",
            BillCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub payee: String,
    pub amount: Cents,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub category: BillCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid: Option<NaiveDate>,
}

impl Bill {
    pub fn new(
        id: impl Into<BillId>,
        payee: impl Into<String>,
        amount: Cents,
        due_date: NaiveDate,
        category: BillCategory,
    ) -> Self {
        assert!(amount > 0, "Bill amount must be positive");
        Self {
            id: id.into(),
            payee: payee.into(),
            amount,
            due_date,
            status: BillStatus::Pending,
            category,
            last_paid: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    /// Paid bills never go back to unpaid.
    pub fn mark_paid(&mut self, on: NaiveDate) {
        self.status = BillStatus::Paid;
        self.last_paid = Some(on);
    }

    pub fn is_paid_in_month_of(&self, today: NaiveDate) -> bool {
        self.is_paid()
            && self
                .last_paid
                .is_some_and(|d| d.year() == today.year() && d.month() == today.month())
    }
}

/// Mark every pending bill whose due date has passed as overdue.
/// Returns the number of bills that changed status.
pub fn refresh_overdue(bills: &mut [Bill], today: NaiveDate) -> usize {
    let mut changed = 0;
    for bill in bills
        .iter_mut()
        .filter(|b| b.status == BillStatus::Pending && b.due_date < today)
    {
        bill.status = BillStatus::Overdue;
        changed += 1;
    }
    changed
}

/// Totals shown on the bills overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Everything not yet paid (pending and overdue)
    pub outstanding_total: Cents,
    pub outstanding_count: usize,
    pub overdue_total: Cents,
    pub overdue_count: usize,
    pub paid_this_month_total: Cents,
    pub paid_this_month_count: usize,
}

pub fn summarize_bills(bills: &[Bill], today: NaiveDate) -> BillSummary {
    bills.iter().fold(BillSummary::default(), |mut acc, bill| {
        if !bill.is_paid() {
            acc.outstanding_total = acc.outstanding_total.saturating_add(bill.amount);
            acc.outstanding_count += 1;
        }
        if bill.status == BillStatus::Overdue {
            acc.overdue_total = acc.overdue_total.saturating_add(bill.amount);
            acc.overdue_count += 1;
        }
        if bill.is_paid_in_month_of(today) {
            acc.paid_this_month_total = acc.paid_this_month_total.saturating_add(bill.amount);
            acc.paid_this_month_count += 1;
        }
        acc
    })
}
