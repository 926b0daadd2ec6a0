mod common;

use anyhow::Result;
use bankdesk::application::{AppError, LedgerConfig};
use bankdesk::domain::{
    Account, AccountKind, BillStatus, CardDetails, Cents, Direction, IdScheme, LedgerError,
    LedgerState, OverdraftPolicy, TransactionCategory, TransactionStatus, parse_cents,
};
use common::{TODAY, balance_of, demo_state, parse_date, test_service, test_service_with};

#[test]
fn test_transfer_debits_and_prepends_history() -> Result<()> {
    let service = test_service();
    let state = LedgerState::new(
        vec![Account::new("A", AccountKind::Checking, 50000, "**** 0001")],
        demo_state().transactions,
        vec![],
    );

    let posting = service.transfer(&state, "A", "John Smith", 10000)?;

    assert_eq!(balance_of(&posting.state, "A"), 40000);
    let tx = &posting.transaction;
    assert_eq!(tx.direction, Direction::Debit);
    assert_eq!(tx.amount, 10000);
    assert_eq!(tx.category, TransactionCategory::Transfer);
    assert_eq!(tx.description, "Transfer to John Smith");
    assert_eq!(tx.status, TransactionStatus::Completed);

    // Previous history preserved behind the new entry
    assert_eq!(posting.state.transactions.len(), 4);
    assert_eq!(&posting.state.transactions[0], tx);
    assert_eq!(&posting.state.transactions[1..], &state.transactions[..]);

    // Input state is untouched
    assert_eq!(balance_of(&state, "A"), 50000);
    Ok(())
}

#[test]
fn test_add_money_end_to_end() -> Result<()> {
    let service = test_service();
    let state = demo_state();
    assert_eq!(balance_of(&state, "1"), 542050);

    let posting = service.add_money(&state, "1", 10000)?;

    assert_eq!(balance_of(&posting.state, "1"), 552050);
    let tx = &posting.transaction;
    assert_eq!(tx.id, "4");
    assert_eq!(tx.date, parse_date(TODAY));
    assert_eq!(tx.direction, Direction::Credit);
    assert_eq!(tx.category, TransactionCategory::Deposit);
    assert_eq!(tx.amount, 10000);
    assert_eq!(tx.description, "Money Added to checking Account");
    Ok(())
}

#[test]
fn test_sequential_ids_across_operations() -> Result<()> {
    let service = test_service();
    let state = demo_state();

    let state = service.add_money(&state, "2", 5000)?.state;
    let state = service.transfer(&state, "1", "Sarah Johnson", 2500)?.state;
    let state = service.pay_bill(&state, "3", "1")?.state;

    let ids: Vec<&str> = state.transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "5", "4", "1", "2", "3"]);
    Ok(())
}

#[test]
fn test_uuid_ids_when_configured() -> Result<()> {
    let service = test_service_with(LedgerConfig {
        transaction_ids: IdScheme::Uuid,
        ..Default::default()
    });

    let posting = service.add_money(&demo_state(), "1", 100)?;
    assert_eq!(posting.transaction.id.len(), 36);
    Ok(())
}

#[test]
fn test_pay_bill_marks_only_target_bill() -> Result<()> {
    let service = test_service();
    let state = demo_state();

    let posting = service.pay_bill(&state, "1", "1")?;

    let paid = posting.state.bill("1").expect("bill exists");
    assert_eq!(paid.status, BillStatus::Paid);
    assert_eq!(paid.last_paid, Some(parse_date(TODAY)));
    assert_eq!(&posting.state.bills[1..], &state.bills[1..]);

    assert_eq!(balance_of(&posting.state, "1"), 542050 - 15000);
    let tx = &posting.transaction;
    assert_eq!(tx.category, TransactionCategory::BillPayment);
    assert_eq!(tx.amount, 15000);
    assert_eq!(tx.description, "Payment to Electric Company");
    Ok(())
}

#[test]
fn test_paying_paid_bill_is_rejected_without_balance_change() -> Result<()> {
    let service = test_service();
    let state = service.pay_bill(&demo_state(), "2", "1")?.state;

    let result = service.pay_bill(&state, "2", "1");

    assert!(matches!(
        result,
        Err(AppError::Ledger(LedgerError::BillAlreadyPaid(ref id))) if id == "2"
    ));
    assert_eq!(balance_of(&state, "1"), 542050 - 50000);
    Ok(())
}

#[test]
fn test_unknown_ids_are_errors() {
    let service = test_service();
    let state = demo_state();

    assert!(matches!(
        service.transfer(&state, "99", "John Smith", 100),
        Err(AppError::Ledger(LedgerError::AccountNotFound(_)))
    ));
    assert!(matches!(
        service.pay_bill(&state, "99", "1"),
        Err(AppError::Ledger(LedgerError::BillNotFound(_)))
    ));
    assert!(matches!(
        service.pay_bill(&state, "1", "99"),
        Err(AppError::Ledger(LedgerError::AccountNotFound(_)))
    ));
}

#[test]
fn test_account_transfer_moves_both_balances_without_history() -> Result<()> {
    let service = test_service();
    let state = demo_state();

    let result = service.account_transfer(&state, "2", "1", 50075)?;

    assert_eq!(balance_of(&result.state, "2"), 1275075 - 50075);
    assert_eq!(balance_of(&result.state, "1"), 542050 + 50075);
    assert_eq!(result.state.total_balance(), state.total_balance());
    assert!(result.transaction.is_none());
    assert_eq!(result.state.transactions, state.transactions);
    Ok(())
}

#[test]
fn test_account_transfer_recorded_when_configured() -> Result<()> {
    let service = test_service_with(LedgerConfig {
        record_internal_transfers: true,
        ..Default::default()
    });

    let result = service.account_transfer(&demo_state(), "1", "3", 20000)?;

    let tx = result.transaction.expect("internal transfer recorded");
    assert_eq!(tx.description, "Transfer to investment Account");
    assert_eq!(tx.direction, Direction::Debit);
    assert_eq!(result.state.transactions[0], tx);
    Ok(())
}

#[test]
fn test_account_transfer_failures_leave_state_alone() {
    let service = test_service();
    let state = demo_state();

    assert!(matches!(
        service.account_transfer(&state, "1", "1", 100),
        Err(AppError::Ledger(LedgerError::SameAccount(_)))
    ));
    assert!(matches!(
        service.account_transfer(&state, "1", "42", 100),
        Err(AppError::Ledger(LedgerError::AccountNotFound(ref id))) if id == "42"
    ));
    assert!(matches!(
        service.account_transfer(&state, "1", "2", 0),
        Err(AppError::Ledger(LedgerError::InvalidAmount(0)))
    ));
}

#[test]
fn test_pay_to_mobile() -> Result<()> {
    let service = test_service();

    let payment = service.pay_to_mobile(&demo_state(), "2", "555-123-4567", 2000)?;

    assert_eq!(payment.recipient_name, "Emma Wilson");
    assert_eq!(
        payment.transaction.description,
        "Mobile Payment to 555-123-4567 (savings Account)"
    );
    assert_eq!(payment.transaction.category, TransactionCategory::Transfer);
    assert_eq!(balance_of(&payment.state, "2"), 1275075 - 2000);
    Ok(())
}

#[test]
fn test_pay_to_mobile_rejects_bad_number() {
    let service = test_service();
    let result = service.pay_to_mobile(&demo_state(), "1", "12", 2000);
    assert!(matches!(result, Err(AppError::InvalidMobileNumber(_))));
}

#[test]
fn test_overdraft_allowed_by_default() -> Result<()> {
    let service = test_service();

    let posting = service.transfer(&demo_state(), "1", "Michael Brown", 600000)?;

    assert_eq!(balance_of(&posting.state, "1"), 542050 - 600000);
    assert!(posting.state.account("1").is_some_and(|a| a.is_overdrawn()));
    Ok(())
}

#[test]
fn test_overdraft_rejected_when_configured() {
    let service = test_service_with(LedgerConfig {
        overdraft: OverdraftPolicy::Reject,
        ..Default::default()
    });

    let result = service.transfer(&demo_state(), "1", "Michael Brown", 600000);

    match result {
        Err(AppError::Ledger(LedgerError::InsufficientFunds {
            account,
            balance,
            required,
        })) => {
            assert_eq!(account, "1");
            assert_eq!(balance, 542050);
            assert_eq!(required, 600000);
        }
        other => panic!("expected InsufficientFunds, got {:?}", other.map(|p| p.transaction)),
    }
}

#[test]
fn test_add_money_past_cents_range_is_rejected() -> Result<()> {
    let service = test_service();
    let state = demo_state();
    let amount = parse_cents("92233720368547758.07")?;
    assert_eq!(amount, Cents::MAX);

    let result = service.add_money(&state, "1", amount);

    match result {
        Err(AppError::Ledger(LedgerError::AmountOverflow {
            account,
            balance,
            amount: attempted,
        })) => {
            assert_eq!(account, "1");
            assert_eq!(balance, 542050);
            assert_eq!(attempted, Cents::MAX);
        }
        other => panic!("expected AmountOverflow, got {:?}", other.map(|p| p.transaction)),
    }
    assert_eq!(state, demo_state());
    Ok(())
}

#[test]
fn test_account_transfer_past_cents_range_is_rejected() {
    let service = test_service();
    let state = LedgerState::new(
        vec![
            Account::new("1", AccountKind::Checking, 542050, "**** 1234"),
            Account::new("2", AccountKind::Savings, Cents::MAX - 100, "**** 5678"),
        ],
        vec![],
        vec![],
    );
    let before = state.clone();

    let result = service.account_transfer(&state, "1", "2", 101);

    assert!(matches!(
        result,
        Err(AppError::Ledger(LedgerError::AmountOverflow { ref account, .. })) if account == "2"
    ));
    assert_eq!(state, before);
    assert_eq!(balance_of(&state, "1"), 542050);
}

#[test]
fn test_overdraft_past_cents_range_is_rejected() {
    let service = test_service();
    let state = LedgerState::new(
        vec![Account::new("1", AccountKind::Checking, Cents::MIN + 1, "**** 1234")],
        vec![],
        vec![],
    );

    let result = service.transfer(&state, "1", "John Smith", 2);

    assert!(matches!(
        result,
        Err(AppError::Ledger(LedgerError::AmountOverflow { .. }))
    ));
    assert!(state.transactions.is_empty());
}

#[test]
fn test_transfer_requires_recipient() {
    let service = test_service();
    assert!(matches!(
        service.transfer(&demo_state(), "1", "   ", 100),
        Err(AppError::MissingRecipient)
    ));
}

#[test]
fn test_add_money_from_card_validates_first() -> Result<()> {
    let service = test_service();
    let state = demo_state();
    let mut card = CardDetails {
        card_number: "4242 4242 4242 4242".into(),
        expiry_date: "04/25".into(),
        cvv: "123".into(),
        cardholder_name: "John Smith".into(),
    };

    match service.add_money_from_card(&state, "1", 10000, &card) {
        Err(AppError::CardRejected(errors)) => assert_eq!(errors, vec!["Card has expired"]),
        other => panic!("expected CardRejected, got {:?}", other.map(|p| p.transaction)),
    }

    card.expiry_date = "05/25".into();
    let posting = service.add_money_from_card(&state, "1", 10000, &card)?;
    assert_eq!(balance_of(&posting.state, "1"), 552050);
    Ok(())
}

#[test]
fn test_add_money_from_raw_card_input() -> Result<()> {
    let service = test_service();
    let card = CardDetails::from_input("4242-4242-4242-4242", "0526", "1234567", "John Smith");

    let posting = service.add_money_from_card(&demo_state(), "2", 5000, &card)?;

    assert_eq!(card.cvv, "1234");
    assert_eq!(balance_of(&posting.state, "2"), 1275075 + 5000);
    Ok(())
}
