use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cents, ValidationReport, format_currency, sum_cents};

pub type LoanId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Personal,
    Home,
    Car,
    Business,
}

/// Amount and term limits offered for a loan type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanLimits {
    pub min_amount: Cents,
    pub max_amount: Cents,
    pub max_term_months: u32,
}

impl LoanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanType::Personal => "personal",
            LoanType::Home => "home",
            LoanType::Car => "car",
            LoanType::Business => "business",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "personal" => Some(LoanType::Personal),
            "home" => Some(LoanType::Home),
            "car" => Some(LoanType::Car),
            "business" => Some(LoanType::Business),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LoanType::Personal => "Personal Loan",
            LoanType::Home => "Home Loan",
            LoanType::Car => "Car Loan",
            LoanType::Business => "Business Loan",
        }
    }

    pub fn limits(&self) -> LoanLimits {
        let (min, max, term) = match self {
            LoanType::Personal => (1_000, 50_000, 60),
            LoanType::Home => (50_000, 1_000_000, 360),
            LoanType::Car => (5_000, 100_000, 84),
            LoanType::Business => (10_000, 500_000, 120),
        };
        LoanLimits {
            min_amount: min * 100,
            max_amount: max * 100,
            max_term_months: term,
        }
    }
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Paid,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
            LoanStatus::Active => "active",
            LoanStatus::Paid => "paid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    BusinessOwner,
}

impl EmploymentStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "employed" => Some(EmploymentStatus::Employed),
            "self-employed" => Some(EmploymentStatus::SelfEmployed),
            "business-owner" => Some(EmploymentStatus::BusinessOwner),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub loan_type: LoanType,
    pub amount: Cents,
    pub interest_rate: f64,
    pub term_months: u32,
    pub status: LoanStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_payment: Option<Cents>,
    pub remaining_balance: Option<Cents>,
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub loan_type: LoanType,
    pub amount: Cents,
    pub term_months: u32,
    pub purpose: String,
    pub income: Cents,
    pub employment_status: EmploymentStatus,
    pub credit_score: Option<u16>,
}

/// Check an application against the limits for its loan type.
pub fn validate_loan_application(application: &LoanApplication) -> ValidationReport {
    let limits = application.loan_type.limits();
    let mut errors = Vec::new();

    if application.amount < limits.min_amount || application.amount > limits.max_amount {
        errors.push(format!(
            "{} amount must be between {} and {}",
            application.loan_type.display_name(),
            format_currency(limits.min_amount),
            format_currency(limits.max_amount)
        ));
    }
    if application.term_months == 0 || application.term_months > limits.max_term_months {
        errors.push(format!(
            "Term must be between 1 and {} months",
            limits.max_term_months
        ));
    }
    if application.purpose.trim().is_empty() {
        errors.push("Loan purpose is required".to_string());
    }
    if application.income <= 0 {
        errors.push("Annual income must be positive".to_string());
    }

    ValidationReport::from_errors(errors)
}

/// Append a pending loan for the application. Rate and schedule are set on approval.
pub fn apply_for_loan(loans: &[Loan], application: &LoanApplication) -> Vec<Loan> {
    let mut updated = loans.to_vec();
    updated.push(Loan {
        id: (loans.len() + 1).to_string(),
        loan_type: application.loan_type,
        amount: application.amount,
        interest_rate: 0.0,
        term_months: application.term_months,
        status: LoanStatus::Pending,
        start_date: None,
        end_date: None,
        monthly_payment: None,
        remaining_balance: None,
        purpose: Some(application.purpose.clone()),
    });
    updated
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub total_borrowed: Cents,
    pub total_remaining: Cents,
    pub total_paid: Cents,
    pub active_count: usize,
}

pub fn summarize_loans(loans: &[Loan]) -> LoanSummary {
    let total_borrowed = sum_cents(loans.iter().map(|l| l.amount));
    let total_remaining = sum_cents(loans.iter().filter_map(|l| l.remaining_balance));
    LoanSummary {
        total_borrowed,
        total_remaining,
        total_paid: total_borrowed.saturating_sub(total_remaining),
        active_count: loans
            .iter()
            .filter(|l| l.status == LoanStatus::Active)
            .count(),
    }
}
