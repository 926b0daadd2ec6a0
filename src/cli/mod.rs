use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::application::{BankingService, LedgerConfig, TransactionFilter, monthly_statements};
use crate::domain::{
    CardDetails, EmploymentStatus, FixedClock, LedgerState, LoanApplication, LoanType,
    Transaction, TransactionCategory, ValidationReport, demo_alerts, demo_loans,
    demo_portfolios, demo_recipients, format_card_number, format_cents, format_currency,
    parse_cents, search_recipients, summarize_loans, summarize_portfolios, unread_count,
    validate_card_number, validate_password,
};
use crate::io::Exporter;

/// Bankdesk - validation and ledger core of the demo banking dashboard
#[derive(Parser)]
#[command(name = "bankdesk")]
#[command(about = "Run dashboard money movements against the demo session")]
#[command(version)]
pub struct Cli {
    /// Ledger settings file (TOML)
    #[arg(short, long, default_value = "bankdesk.toml")]
    pub config: PathBuf,

    /// Business date to run as (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a password against the sign-up rules
    ValidatePassword {
        password: String,
    },

    /// Check payment card details
    ValidateCard {
        /// Card number (anything but digits is dropped)
        #[arg(long)]
        number: String,

        /// Expiry date, MM/YY or MMYY
        #[arg(long)]
        expiry: Option<String>,

        #[arg(long)]
        cvv: Option<String>,

        /// Cardholder name
        #[arg(long)]
        name: Option<String>,
    },

    /// Send money from an account to a recipient
    Transfer {
        /// Amount (e.g. "100.00" or "100")
        amount: String,

        /// Source account id
        #[arg(long)]
        from: String,

        /// Recipient name
        #[arg(long)]
        to: String,
    },

    /// Add money to an account
    AddMoney {
        amount: String,

        /// Destination account id
        #[arg(long)]
        to: String,

        /// Fund from a card instead of a linked bank (requires the other card flags)
        #[arg(long, requires_all = ["expiry", "cvv", "name"])]
        card_number: Option<String>,

        #[arg(long)]
        expiry: Option<String>,

        #[arg(long)]
        cvv: Option<String>,

        #[arg(long)]
        name: Option<String>,
    },

    /// Pay a pending bill
    PayBill {
        /// Bill id
        bill: String,

        /// Account id to pay from
        #[arg(long)]
        from: String,
    },

    /// Move money between two of your accounts
    AccountTransfer {
        amount: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Pay a mobile number
    PayMobile {
        amount: String,

        #[arg(long)]
        from: String,

        /// Mobile number of the recipient
        #[arg(long)]
        mobile: String,
    },

    /// Show account balances
    Accounts,

    /// Show bills and bill totals
    Bills,

    /// List or search saved recipients
    Recipients {
        /// Name or account number fragment
        query: Option<String>,
    },

    /// Show transaction history
    Transactions {
        /// transfer, bill_payment, deposit, withdrawal
        #[arg(long)]
        category: Option<String>,

        /// Description fragment
        #[arg(long)]
        search: Option<String>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show monthly statements
    Statement {
        /// Month as YYYY-MM (omit for all months with activity)
        month: Option<String>,
    },

    /// Show loans and loan totals
    Loans,

    /// Show investment portfolios and their holdings
    Investments,

    /// Show dashboard alerts
    Alerts,

    /// Apply for a loan
    ApplyLoan {
        /// personal, home, car, business
        #[arg(short = 't', long = "type")]
        loan_type: String,

        amount: String,

        /// Term in months
        #[arg(long)]
        term: u32,

        #[arg(long)]
        purpose: String,

        /// Annual income
        #[arg(long)]
        income: String,

        /// employed, self-employed, business-owner
        #[arg(long, default_value = "employed")]
        employment: String,
    },

    /// Export session data
    Export {
        /// What to export: transactions, statements, snapshot
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = LedgerConfig::load_from_file(&self.config)?;
        let mut service = BankingService::new(config);
        if let Some(date) = &self.today {
            let today = parse_date(date)
                .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", date))?;
            service = service.with_clock(FixedClock(today));
        }

        // No persistence: every run starts from the seed session
        let state = LedgerState::demo();
        let json = self.json;

        match self.command {
            Commands::ValidatePassword { password } => {
                let report = validate_password(&password);
                print_report("Password", &report, json)?;
                if !report.is_valid {
                    bail!("password does not meet the requirements");
                }
            }

            Commands::ValidateCard {
                number,
                expiry,
                cvv,
                name,
            } => match (expiry, cvv, name) {
                (Some(expiry), Some(cvv), Some(name)) => {
                    let details = CardDetails::from_input(&number, &expiry, &cvv, name);
                    let report = service.validate_card(&details);
                    print_report("Card", &report, json)?;
                    if !report.is_valid {
                        bail!("card details rejected");
                    }
                }
                (None, None, None) => {
                    let valid = validate_card_number(&format_card_number(&number));
                    if json {
                        print_json(&serde_json::json!({ "is_valid": valid }))?;
                    } else {
                        println!("Card number is {}", if valid { "valid" } else { "invalid" });
                    }
                    if !valid {
                        bail!("invalid card number");
                    }
                }
                _ => bail!("--expiry, --cvv and --name must be given together"),
            },

            Commands::Transfer { amount, from, to } => {
                let amount = parse_amount(&amount)?;
                let posting = service.transfer(&state, &from, &to, amount)?;
                print_posting(&posting.state, Some(&posting.transaction), json)?;
            }

            Commands::AddMoney {
                amount,
                to,
                card_number,
                expiry,
                cvv,
                name,
            } => {
                let amount = parse_amount(&amount)?;
                let posting = match card_number {
                    Some(card_number) => {
                        let card = CardDetails::from_input(
                            &card_number,
                            &expiry.unwrap_or_default(),
                            &cvv.unwrap_or_default(),
                            name.unwrap_or_default(),
                        );
                        service.add_money_from_card(&state, &to, amount, &card)?
                    }
                    None => service.add_money(&state, &to, amount)?,
                };
                print_posting(&posting.state, Some(&posting.transaction), json)?;
            }

            Commands::PayBill { bill, from } => {
                let posting = service.pay_bill(&state, &bill, &from)?;
                print_posting(&posting.state, Some(&posting.transaction), json)?;
            }

            Commands::AccountTransfer { amount, from, to } => {
                let amount = parse_amount(&amount)?;
                let result = service.account_transfer(&state, &from, &to, amount)?;
                print_posting(&result.state, result.transaction.as_ref(), json)?;
            }

            Commands::PayMobile {
                amount,
                from,
                mobile,
            } => {
                let amount = parse_amount(&amount)?;
                let payment = service.pay_to_mobile(&state, &from, &mobile, amount)?;
                if !json {
                    println!(
                        "Paid {} to {} ({})",
                        format_currency(payment.transaction.amount),
                        payment.recipient_name,
                        mobile
                    );
                }
                print_posting(&payment.state, Some(&payment.transaction), json)?;
            }

            Commands::Accounts => {
                let overview = service.accounts_overview(&state);
                if json {
                    print_json(&serde_json::json!({
                        "accounts": state.accounts,
                        "overview": overview,
                    }))?;
                } else {
                    print_accounts(&state);
                    println!("{}", "-".repeat(52));
                    println!("{:<36} {:>15}", "TOTAL", format_currency(overview.total_balance));
                }
            }

            Commands::Bills => {
                let summary = service.bill_overview(&state);
                if json {
                    print_json(&serde_json::json!({
                        "bills": state.bills,
                        "summary": summary,
                    }))?;
                } else {
                    println!(
                        "{:<4} {:<20} {:>12} {:<12} {:<8}",
                        "ID", "PAYEE", "AMOUNT", "DUE", "STATUS"
                    );
                    println!("{}", "-".repeat(60));
                    for bill in &state.bills {
                        println!(
                            "{:<4} {:<20} {:>12} {:<12} {:<8}",
                            bill.id,
                            bill.payee,
                            format_currency(bill.amount),
                            bill.due_date,
                            bill.status.as_str()
                        );
                    }
                    println!();
                    println!(
                        "Outstanding: {} ({} bills)",
                        format_currency(summary.outstanding_total),
                        summary.outstanding_count
                    );
                    println!(
                        "Overdue:     {} ({} bills)",
                        format_currency(summary.overdue_total),
                        summary.overdue_count
                    );
                    println!(
                        "Paid this month: {} ({} bills)",
                        format_currency(summary.paid_this_month_total),
                        summary.paid_this_month_count
                    );
                }
            }

            Commands::Recipients { query } => {
                let recipients = demo_recipients();
                let found = search_recipients(&recipients, query.as_deref().unwrap_or(""));
                if json {
                    print_json(&found)?;
                } else if found.is_empty() {
                    println!("No recipients found.");
                } else {
                    for r in found {
                        println!("{:<16} {:<10} {}", r.name, r.account_number, r.bank);
                    }
                }
            }

            Commands::Transactions {
                category,
                search,
                limit,
            } => {
                let category = match category {
                    Some(c) => Some(
                        TransactionCategory::from_str(&c)
                            .with_context(|| format!("Unknown category '{}'", c))?,
                    ),
                    None => None,
                };
                let filter = TransactionFilter {
                    category,
                    search,
                    limit,
                    ..Default::default()
                };
                let transactions = service.list_transactions(&state, &filter);
                if json {
                    print_json(&transactions)?;
                } else {
                    for tx in transactions {
                        println!(
                            "{:<4} {} {:<36} {:>12} {}",
                            tx.id,
                            tx.date,
                            tx.description,
                            signed_currency(tx.signed_amount()),
                            tx.status.as_str()
                        );
                    }
                }
            }

            Commands::Statement { month } => {
                let statements = match month {
                    Some(m) => {
                        let (year, month) = parse_month(&m)
                            .with_context(|| format!("Invalid month '{}'. Use YYYY-MM", m))?;
                        vec![service.statement(&state, year, month)]
                    }
                    None => monthly_statements(&state.transactions),
                };
                if json {
                    print_json(&statements)?;
                } else {
                    for s in &statements {
                        println!("{}", s.title());
                        println!("  Transactions: {}", s.transaction_count);
                        println!("  Inflow:       {}", format_currency(s.total_inflow));
                        println!("  Outflow:      {}", format_currency(s.total_outflow));
                        println!("  Net change:   {}", signed_currency(s.net_change));
                    }
                }
            }

            Commands::Loans => {
                let loans = demo_loans();
                let summary = summarize_loans(&loans);
                if json {
                    print_json(&serde_json::json!({ "loans": loans, "summary": summary }))?;
                } else {
                    for loan in &loans {
                        println!(
                            "{:<4} {:<14} {:>14} {:>5}% {:>4} mo  {}",
                            loan.id,
                            loan.loan_type.display_name(),
                            format_currency(loan.amount),
                            loan.interest_rate,
                            loan.term_months,
                            loan.status.as_str()
                        );
                    }
                    println!();
                    println!("Borrowed:  {}", format_currency(summary.total_borrowed));
                    println!("Remaining: {}", format_currency(summary.total_remaining));
                    println!("Repaid:    {}", format_currency(summary.total_paid));
                }
            }

            Commands::Investments => {
                let portfolios = demo_portfolios();
                let summary = summarize_portfolios(&portfolios);
                if json {
                    print_json(&serde_json::json!({
                        "portfolios": portfolios,
                        "summary": summary,
                    }))?;
                } else {
                    for portfolio in &portfolios {
                        println!(
                            "{} {:>14} {:>12} ({:+.2}%)",
                            portfolio.name,
                            format_currency(portfolio.value),
                            signed_currency(portfolio.change),
                            portfolio.change_percent
                        );
                        for h in &portfolio.holdings {
                            println!(
                                "  {:<6} {:<24} {:>4} @ {:>10} {:>12} ({:+.2}%)",
                                h.symbol,
                                h.name,
                                h.shares,
                                format_currency(h.price),
                                format_currency(h.value),
                                h.change_percent
                            );
                        }
                    }
                    println!();
                    println!("Total value: {}", format_currency(summary.total_value));
                    match summary.total_change_percent {
                        Some(percent) => println!(
                            "Change:      {} ({:.2}%)",
                            signed_currency(summary.total_change),
                            percent
                        ),
                        None => println!("Change:      {}", signed_currency(summary.total_change)),
                    }
                }
            }

            Commands::Alerts => {
                let alerts = demo_alerts();
                let unread = unread_count(&alerts);
                if json {
                    print_json(&serde_json::json!({ "alerts": alerts, "unread": unread }))?;
                } else {
                    println!("{} new alert(s)", unread);
                    for alert in &alerts {
                        println!(
                            "{} {} {}",
                            alert.timestamp.format("%Y-%m-%d %H:%M"),
                            if alert.read { "   " } else { "NEW" },
                            alert.message
                        );
                    }
                }
            }

            Commands::ApplyLoan {
                loan_type,
                amount,
                term,
                purpose,
                income,
                employment,
            } => {
                let application = LoanApplication {
                    loan_type: LoanType::from_str(&loan_type)
                        .with_context(|| format!("Unknown loan type '{}'", loan_type))?,
                    amount: parse_amount(&amount)?,
                    term_months: term,
                    purpose,
                    income: parse_amount(&income)?,
                    employment_status: EmploymentStatus::from_str(&employment)
                        .with_context(|| format!("Unknown employment status '{}'", employment))?,
                    credit_score: None,
                };
                let loans = service.apply_for_loan(&demo_loans(), &application)?;
                let filed = loans.last().context("No loan was filed")?;
                if json {
                    print_json(filed)?;
                } else {
                    println!(
                        "Application #{} filed: {} for {} over {} months (pending review)",
                        filed.id,
                        filed.loan_type.display_name(),
                        format_currency(filed.amount),
                        filed.term_months
                    );
                }
            }

            Commands::Export {
                export_type,
                output,
            } => {
                let writer: Box<dyn Write> = match &output {
                    Some(path) => Box::new(
                        File::create(path)
                            .with_context(|| format!("Failed to create {}", path))?,
                    ),
                    None => Box::new(io::stdout()),
                };
                let exporter = Exporter::new(&state);
                match export_type.as_str() {
                    "transactions" => {
                        let count = exporter.export_transactions_csv(writer)?;
                        eprintln!("Exported {} transactions", count);
                    }
                    "statements" => {
                        let statements = monthly_statements(&state.transactions);
                        let count = exporter.export_statements_csv(&statements, writer)?;
                        eprintln!("Exported {} statements", count);
                    }
                    "snapshot" => {
                        exporter.export_snapshot_json(service.today(), writer)?;
                        eprintln!("Exported session snapshot");
                    }
                    other => bail!(
                        "Unknown export type '{}'. Use transactions, statements or snapshot",
                        other
                    ),
                }
            }
        }

        Ok(())
    }
}

fn parse_amount(input: &str) -> Result<i64> {
    parse_cents(input).with_context(|| format!("Invalid amount '{}'. Use '100.00' or '100'", input))
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input, "%Y-%m-%d")?)
}

fn parse_month(input: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d")?;
    Ok((date.year(), date.month()))
}

fn signed_currency(cents: i64) -> String {
    if cents > 0 {
        format!("+{}", format_currency(cents))
    } else {
        format_currency(cents)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(subject: &str, report: &ValidationReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }
    if report.is_valid {
        println!("{} is valid", subject);
    } else {
        println!("{} is invalid:", subject);
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
    Ok(())
}

fn print_accounts(state: &LedgerState) {
    println!("{:<4} {:<12} {:<12} {:>6} {:>15}", "ID", "TYPE", "NUMBER", "APY", "BALANCE");
    println!("{}", "-".repeat(52));
    for account in &state.accounts {
        let apy = account
            .interest_rate
            .map(|r| format!("{}%", r))
            .unwrap_or_default();
        println!(
            "{:<4} {:<12} {:<12} {:>6} {:>15}",
            account.id,
            account.kind.as_str(),
            account.account_number,
            apy,
            format_currency(account.balance)
        );
    }
}

fn print_posting(
    state: &LedgerState,
    transaction: Option<&Transaction>,
    json: bool,
) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "transaction": transaction,
            "accounts": state.accounts,
        }));
    }

    match transaction {
        Some(tx) => println!(
            "Posted #{} on {}: {} {} ({})",
            tx.id,
            tx.date,
            tx.description,
            format_cents(tx.amount),
            tx.direction.as_str()
        ),
        None => println!("Balances updated."),
    }
    println!();
    print_accounts(state);
    Ok(())
}
