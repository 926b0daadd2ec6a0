use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::domain::{
    Account, Bill, BillSummary, CardDetails, Cents, Clock, Direction, LedgerError, LedgerState, Loan,
    LoanApplication, RandomDemoNamer, RecipientNamer, SystemClock, Transaction,
    TransactionCategory, ValidationReport, apply_for_loan, credit_account, debit_account,
    format_cents, move_between_accounts, refresh_overdue, settle_bill, summarize_bills,
    validate_card_details, validate_loan_application, validate_mobile_number,
};

use super::{
    AccountsOverview, AppError, LedgerConfig, MonthlyStatement, TransactionFilter,
    accounts_overview, filter_transactions, monthly_statement,
};

/// Application service providing the dashboard's money-movement operations.
/// This is the primary interface for any client (CLI, UI bridge, tests).
///
/// The service holds no session data: every operation takes the current
/// [`LedgerState`] and hands back the next one.
pub struct BankingService {
    config: LedgerConfig,
    clock: Box<dyn Clock>,
    namer: Box<dyn RecipientNamer>,
}

/// Result of an operation that posts one history entry
#[derive(Debug, Clone)]
pub struct Posting {
    pub state: LedgerState,
    pub transaction: Transaction,
}

/// Result of moving money between two of the customer's accounts
#[derive(Debug, Clone)]
pub struct InternalTransfer {
    pub state: LedgerState,
    /// Only present when `record_internal_transfers` is enabled
    pub transaction: Option<Transaction>,
}

/// Result of a pay-to-mobile operation
#[derive(Debug, Clone)]
pub struct MobilePayment {
    pub state: LedgerState,
    pub transaction: Transaction,
    /// Display name shown to the payer
    pub recipient_name: String,
}

impl BankingService {
    /// Create a service reading the system clock and picking random demo names.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
            namer: Box::new(RandomDemoNamer),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_namer(mut self, namer: impl RecipientNamer + 'static) -> Self {
        self.namer = Box::new(namer);
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ========================
    // Validation
    // ========================

    /// Validate card fields against today's date.
    pub fn validate_card(&self, details: &CardDetails) -> ValidationReport {
        validate_card_details(details, self.today())
    }

    // ========================
    // Ledger operations
    // ========================

    /// Send money from one account to an external recipient.
    pub fn transfer(
        &self,
        state: &LedgerState,
        from_account_id: &str,
        recipient: &str,
        amount: Cents,
    ) -> Result<Posting, AppError> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            warn!("Transfer rejected: no recipient");
            return Err(AppError::MissingRecipient);
        }

        let accounts = debit_account(
            &state.accounts,
            from_account_id,
            amount,
            self.config.overdraft,
        )
        .inspect_err(|e| warn!("Transfer rejected: {}", e))?;

        let transaction = self.new_transaction(
            state,
            format!("Transfer to {}", recipient),
            amount,
            Direction::Debit,
            TransactionCategory::Transfer,
        );
        info!(
            "Transfer of {} from account {} to {} posted as #{}",
            format_cents(amount),
            from_account_id,
            recipient,
            transaction.id
        );

        Ok(self.post(state, accounts, state.bills.clone(), transaction))
    }

    /// Add money to an account.
    pub fn add_money(
        &self,
        state: &LedgerState,
        to_account_id: &str,
        amount: Cents,
    ) -> Result<Posting, AppError> {
        let accounts = credit_account(&state.accounts, to_account_id, amount)
            .inspect_err(|e| warn!("Deposit rejected: {}", e))?;
        let account = self.lookup(state, to_account_id)?;

        let transaction = self.new_transaction(
            state,
            format!("Money Added to {}", account.display_label()),
            amount,
            Direction::Credit,
            TransactionCategory::Deposit,
        );
        info!(
            "Deposit of {} into account {} posted as #{}",
            format_cents(amount),
            to_account_id,
            transaction.id
        );

        Ok(self.post(state, accounts, state.bills.clone(), transaction))
    }

    /// Add money funded by a card. The card is validated first; nothing is
    /// posted if any field fails.
    pub fn add_money_from_card(
        &self,
        state: &LedgerState,
        to_account_id: &str,
        amount: Cents,
        card: &CardDetails,
    ) -> Result<Posting, AppError> {
        let report = self.validate_card(card);
        if !report.is_valid {
            warn!("Card rejected with {} error(s)", report.errors.len());
            return Err(AppError::CardRejected(report.errors));
        }
        self.add_money(state, to_account_id, amount)
    }

    /// Pay a bill from an account. The bill becomes paid as of today.
    pub fn pay_bill(
        &self,
        state: &LedgerState,
        bill_id: &str,
        from_account_id: &str,
    ) -> Result<Posting, AppError> {
        let bill = state
            .bill(bill_id)
            .ok_or_else(|| LedgerError::BillNotFound(bill_id.to_string()))
            .inspect_err(|e| warn!("Bill payment rejected: {}", e))?;
        let today = self.today();

        // Check the bill before touching balances so a paid bill leaves them alone
        let bills = settle_bill(&state.bills, bill_id, today)
            .inspect_err(|e| warn!("Bill payment rejected: {}", e))?;
        let accounts = debit_account(
            &state.accounts,
            from_account_id,
            bill.amount,
            self.config.overdraft,
        )
        .inspect_err(|e| warn!("Bill payment rejected: {}", e))?;

        let transaction = self.new_transaction(
            state,
            format!("Payment to {}", bill.payee),
            bill.amount,
            Direction::Debit,
            TransactionCategory::BillPayment,
        );
        info!(
            "Bill {} ({}) paid from account {} as #{}",
            bill_id, bill.payee, from_account_id, transaction.id
        );

        Ok(self.post(state, accounts, bills, transaction))
    }

    /// Move money between two of the customer's own accounts.
    pub fn account_transfer(
        &self,
        state: &LedgerState,
        from_account_id: &str,
        to_account_id: &str,
        amount: Cents,
    ) -> Result<InternalTransfer, AppError> {
        let accounts = move_between_accounts(
            &state.accounts,
            from_account_id,
            to_account_id,
            amount,
            self.config.overdraft,
        )
        .inspect_err(|e| warn!("Account transfer rejected: {}", e))?;

        let transaction = if self.config.record_internal_transfers {
            let to = self.lookup(state, to_account_id)?;
            Some(self.new_transaction(
                state,
                format!("Transfer to {}", to.display_label()),
                amount,
                Direction::Debit,
                TransactionCategory::Transfer,
            ))
        } else {
            None
        };
        info!(
            "Moved {} from account {} to account {}",
            format_cents(amount),
            from_account_id,
            to_account_id
        );

        Ok(InternalTransfer {
            state: state.with_posting(accounts, state.bills.clone(), transaction.clone()),
            transaction,
        })
    }

    /// Pay a mobile number from an account.
    pub fn pay_to_mobile(
        &self,
        state: &LedgerState,
        from_account_id: &str,
        mobile_number: &str,
        amount: Cents,
    ) -> Result<MobilePayment, AppError> {
        if !validate_mobile_number(mobile_number) {
            warn!("Mobile payment rejected: bad number {:?}", mobile_number);
            return Err(AppError::InvalidMobileNumber(mobile_number.to_string()));
        }

        let accounts = debit_account(
            &state.accounts,
            from_account_id,
            amount,
            self.config.overdraft,
        )
        .inspect_err(|e| warn!("Mobile payment rejected: {}", e))?;
        let from = self.lookup(state, from_account_id)?;

        let transaction = self.new_transaction(
            state,
            format!(
                "Mobile Payment to {} ({})",
                mobile_number,
                from.display_label()
            ),
            amount,
            Direction::Debit,
            TransactionCategory::Transfer,
        );
        let recipient_name = self.namer.name_for(mobile_number);
        info!(
            "Mobile payment of {} to {} posted as #{}",
            format_cents(amount),
            mobile_number,
            transaction.id
        );

        let posting = self.post(state, accounts, state.bills.clone(), transaction);
        Ok(MobilePayment {
            state: posting.state,
            transaction: posting.transaction,
            recipient_name,
        })
    }

    // ========================
    // Loans
    // ========================

    /// Validate an application and, if it passes, append it as a pending loan.
    pub fn apply_for_loan(
        &self,
        loans: &[Loan],
        application: &LoanApplication,
    ) -> Result<Vec<Loan>, AppError> {
        let report = validate_loan_application(application);
        if !report.is_valid {
            warn!("Loan application rejected: {:?}", report.errors);
            return Err(AppError::LoanApplicationRejected(report.errors));
        }
        let updated = apply_for_loan(loans, application);
        info!(
            "Loan application for {} {} filed",
            format_cents(application.amount),
            application.loan_type
        );
        Ok(updated)
    }

    // ========================
    // Overviews
    // ========================

    pub fn accounts_overview(&self, state: &LedgerState) -> AccountsOverview {
        accounts_overview(&state.accounts)
    }

    /// Bill totals as of today. Overdue status is derived, not stored.
    pub fn bill_overview(&self, state: &LedgerState) -> BillSummary {
        let today = self.today();
        let mut bills = state.bills.clone();
        let overdue = refresh_overdue(&mut bills, today);
        debug!("{} bill(s) overdue as of {}", overdue, today);
        summarize_bills(&bills, today)
    }

    pub fn statement(&self, state: &LedgerState, year: i32, month: u32) -> MonthlyStatement {
        monthly_statement(&state.transactions, year, month)
    }

    pub fn list_transactions<'a>(
        &self,
        state: &'a LedgerState,
        filter: &TransactionFilter,
    ) -> Vec<&'a Transaction> {
        filter_transactions(&state.transactions, filter)
    }

    // ========================
    // Helpers
    // ========================

    fn lookup<'a>(
        &self,
        state: &'a LedgerState,
        account_id: &str,
    ) -> Result<&'a Account, AppError> {
        debug!("Looking up account {}", account_id);
        state
            .account(account_id)
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()).into())
    }

    fn new_transaction(
        &self,
        state: &LedgerState,
        description: String,
        amount: Cents,
        direction: Direction,
        category: TransactionCategory,
    ) -> Transaction {
        Transaction::new(
            self.config.transaction_ids.next_id(&state.transactions),
            self.today(),
            description,
            amount,
            direction,
            category,
        )
    }

    fn post(
        &self,
        state: &LedgerState,
        accounts: Vec<Account>,
        bills: Vec<Bill>,
        transaction: Transaction,
    ) -> Posting {
        Posting {
            state: state.with_posting(accounts, bills, Some(transaction.clone())),
            transaction,
        }
    }
}

impl Default for BankingService {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
