// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use bankdesk::application::{BankingService, LedgerConfig};
use bankdesk::domain::{FixedClock, FixedNamer, LedgerState};
use chrono::NaiveDate;

/// Business date used by most tests
pub const TODAY: &str = "2025-05-18";

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Service with a fixed clock and a fixed mobile recipient name
pub fn test_service() -> BankingService {
    test_service_with(LedgerConfig::default())
}

pub fn test_service_with(config: LedgerConfig) -> BankingService {
    BankingService::new(config)
        .with_clock(FixedClock(parse_date(TODAY)))
        .with_namer(FixedNamer::new("Emma Wilson"))
}

/// The seed session every dashboard starts from
pub fn demo_state() -> LedgerState {
    LedgerState::demo()
}

pub fn balance_of(state: &LedgerState, account_id: &str) -> i64 {
    state
        .account(account_id)
        .map(|a| a.balance)
        .expect("account exists")
}
