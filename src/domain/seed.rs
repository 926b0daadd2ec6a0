//! Fixed data every session starts from.

use chrono::{NaiveDate, NaiveDateTime};

use super::{
    Account, AccountKind, Alert, AlertKind, Bill, BillCategory, Cents, Direction, Holding,
    LedgerState, Loan, LoanStatus, LoanType, Portfolio, Recipient, Transaction,
    TransactionCategory,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, min, 0).unwrap_or_default()
}

impl LedgerState {
    /// The demo session: three accounts, three past transactions, four pending bills.
    pub fn demo() -> Self {
        let accounts = vec![
            Account::new("1", AccountKind::Checking, 542050, "**** 1234"),
            Account::new("2", AccountKind::Savings, 1275075, "**** 5678").with_interest_rate(2.5),
            Account::new("3", AccountKind::Investment, 2500000, "**** 9012")
                .with_interest_rate(5.0),
        ];

        let transactions = vec![
            Transaction::new(
                "1",
                date(2025, 3, 15),
                "Grocery Store",
                8550,
                Direction::Debit,
                TransactionCategory::Withdrawal,
            ),
            Transaction::new(
                "2",
                date(2025, 3, 14),
                "Salary Deposit",
                3500000,
                Direction::Credit,
                TransactionCategory::Deposit,
            ),
            Transaction::new(
                "3",
                date(2025, 3, 13),
                "Electric Bill",
                14580,
                Direction::Debit,
                TransactionCategory::BillPayment,
            ),
        ];

        let bills = vec![
            Bill::new(
                "1",
                "Electric Company",
                15000,
                date(2025, 5, 15),
                BillCategory::Utility,
            ),
            Bill::new(
                "2",
                "Credit Card",
                50000,
                date(2025, 5, 20),
                BillCategory::CreditCard,
            ),
            Bill::new(
                "3",
                "Internet Service",
                8999,
                date(2025, 5, 25),
                BillCategory::Utility,
            ),
            Bill::new(
                "4",
                "Phone Bill",
                7500,
                date(2025, 5, 30),
                BillCategory::Utility,
            ),
        ];

        Self::new(accounts, transactions, bills)
    }
}

/// Saved payees offered by the send-money form.
pub fn demo_recipients() -> Vec<Recipient> {
    vec![
        Recipient::new("1", "John Smith", "**** 4321", "Chase Bank"),
        Recipient::new("2", "Sarah Johnson", "**** 8765", "Bank of America"),
        Recipient::new("3", "Michael Brown", "**** 2468", "Wells Fargo"),
    ]
}

pub fn demo_loans() -> Vec<Loan> {
    vec![
        Loan {
            id: "1".into(),
            loan_type: LoanType::Personal,
            amount: 1_000_000,
            interest_rate: 5.5,
            term_months: 24,
            status: LoanStatus::Active,
            start_date: Some(date(2024, 1, 15)),
            end_date: Some(date(2026, 1, 15)),
            monthly_payment: Some(44096),
            remaining_balance: Some(880_000),
            purpose: Some("Home Renovation".into()),
        },
        Loan {
            id: "2".into(),
            loan_type: LoanType::Car,
            amount: 2_500_000,
            interest_rate: 4.2,
            term_months: 60,
            status: LoanStatus::Active,
            start_date: Some(date(2023, 6, 1)),
            end_date: Some(date(2028, 6, 1)),
            monthly_payment: Some(46250),
            remaining_balance: Some(2_000_000),
            purpose: Some("New Car Purchase".into()),
        },
    ]
}

/// Notifications waiting on the dashboard's alerts tab.
pub fn demo_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "1".into(),
            kind: AlertKind::Security,
            message: "New device login detected".into(),
            timestamp: at(2025, 3, 15, 14, 30),
            read: false,
        },
        Alert {
            id: "2".into(),
            kind: AlertKind::Bill,
            message: "Upcoming bill payment due".into(),
            timestamp: at(2025, 3, 15, 9, 15),
            read: false,
        },
    ]
}

fn holding(
    id: &str,
    symbol: &str,
    name: &str,
    (price, change, change_percent): (Cents, Cents, f64),
    shares: u32,
    value: Cents,
) -> Holding {
    Holding {
        id: id.into(),
        symbol: symbol.into(),
        name: name.into(),
        price,
        change,
        change_percent,
        shares,
        value,
    }
}

/// Two stock portfolios shown on the investments page.
pub fn demo_portfolios() -> Vec<Portfolio> {
    vec![
        Portfolio {
            id: "1".into(),
            name: "Tech Growth".into(),
            value: 2542075,
            change: 125050,
            change_percent: 5.18,
            holdings: vec![
                holding("1", "AAPL", "Apple Inc.", (17550, 250, 1.45), 50, 877500),
                holding("2", "MSFT", "Microsoft Corporation", (41532, -325, -0.78), 20, 830640),
                holding("3", "GOOGL", "Alphabet Inc.", (14265, 185, 1.31), 30, 427950),
            ],
        },
        Portfolio {
            id: "2".into(),
            name: "Dividend Income".into(),
            value: 1875025,
            change: -32075,
            change_percent: -1.68,
            holdings: vec![
                holding("4", "JNJ", "Johnson & Johnson", (15875, -125, -0.78), 40, 635000),
                holding("5", "PG", "Procter & Gamble", (14580, 80, 0.55), 35, 510300),
                holding("6", "KO", "Coca-Cola Company", (6025, -45, -0.74), 50, 301250),
            ],
        },
    ]
}
