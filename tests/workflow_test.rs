//! Unit tests for the order transition table and the status vocabularies.

use savdo::workflow::{OfferStatus, OrderStatus, PaymentMethod, RequestStatus};

fn targets(status: OrderStatus, method: PaymentMethod) -> Vec<OrderStatus> {
    status
        .transitions_for(method)
        .iter()
        .map(|t| t.target)
        .collect()
}

#[test]
fn test_bank_transition_table() {
    let bank = PaymentMethod::Bank;

    assert_eq!(
        targets(OrderStatus::Opened, bank),
        vec![OrderStatus::PaymentPending]
    );
    assert_eq!(
        targets(OrderStatus::PaymentPending, bank),
        vec![OrderStatus::PaymentDone, OrderStatus::Cancelled]
    );
    assert_eq!(
        targets(OrderStatus::PaymentDone, bank),
        vec![OrderStatus::Collecting, OrderStatus::Cancelled]
    );
    assert_eq!(
        targets(OrderStatus::Collecting, bank),
        vec![OrderStatus::InTransit, OrderStatus::Cancelled]
    );
    assert_eq!(
        targets(OrderStatus::InTransit, bank),
        vec![OrderStatus::Delivered, OrderStatus::Cancelled]
    );
    assert_eq!(
        targets(OrderStatus::Delivered, bank),
        vec![OrderStatus::Completed]
    );

    println!("[PASS] test_bank_transition_table");
}

#[test]
fn test_cash_orders_take_the_cash_subpath() {
    let cash = PaymentMethod::Cash;

    // payment_pending forks to the cash leg instead of payment_done
    assert_eq!(
        targets(OrderStatus::PaymentPending, cash),
        vec![OrderStatus::CashPaymentPending, OrderStatus::Cancelled]
    );
    assert_eq!(
        targets(OrderStatus::CashPaymentPending, cash),
        vec![OrderStatus::CashPaymentDone, OrderStatus::Cancelled]
    );
    assert_eq!(
        targets(OrderStatus::CashPaymentDone, cash),
        vec![OrderStatus::Collecting, OrderStatus::Cancelled]
    );

    // a bank order must not enter the cash leg
    assert!(!OrderStatus::PaymentPending.can_transition(
        OrderStatus::CashPaymentPending,
        PaymentMethod::Bank
    ));

    // cash statuses keep their forward continuation even under a bank method
    assert!(OrderStatus::CashPaymentPending.can_transition(
        OrderStatus::CashPaymentDone,
        PaymentMethod::Bank
    ));

    println!("[PASS] test_cash_orders_take_the_cash_subpath");
}

#[test]
fn test_terminal_statuses_have_no_transitions() {
    for method in [PaymentMethod::Bank, PaymentMethod::Cash, PaymentMethod::Other] {
        assert!(targets(OrderStatus::Completed, method).is_empty());
        assert!(targets(OrderStatus::Cancelled, method).is_empty());
    }
    assert!(OrderStatus::Completed.is_terminal());
    assert!(OrderStatus::Cancelled.is_terminal());
    assert!(!OrderStatus::Delivered.is_terminal());

    println!("[PASS] test_terminal_statuses_have_no_transitions");
}

#[test]
fn test_only_cancellation_requires_a_reason() {
    for status in [
        OrderStatus::Opened,
        OrderStatus::PaymentPending,
        OrderStatus::PaymentDone,
        OrderStatus::CashPaymentPending,
        OrderStatus::CashPaymentDone,
        OrderStatus::Collecting,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
    ] {
        for transition in status.transitions_for(PaymentMethod::Cash) {
            assert_eq!(
                transition.requires_reason(),
                transition.target == OrderStatus::Cancelled,
                "unexpected reason requirement on {} -> {}",
                status.code(),
                transition.target.code()
            );
        }
    }

    println!("[PASS] test_only_cancellation_requires_a_reason");
}

#[test]
fn test_status_codes_round_trip() {
    for status in [
        OrderStatus::Opened,
        OrderStatus::PaymentPending,
        OrderStatus::PaymentDone,
        OrderStatus::CashPaymentPending,
        OrderStatus::CashPaymentDone,
        OrderStatus::Collecting,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ] {
        assert_eq!(OrderStatus::parse(status.code()), Some(status));
    }
    assert_eq!(OrderStatus::parse("shipped"), None);

    println!("[PASS] test_status_codes_round_trip");
}

#[test]
fn test_legacy_uzbek_tokens_parse() {
    assert_eq!(RequestStatus::parse("ochiq"), Some(RequestStatus::Open));
    assert_eq!(RequestStatus::parse("yopilgan"), Some(RequestStatus::Closed));
    assert_eq!(RequestStatus::parse("OCHIQ"), Some(RequestStatus::Open));
    assert_eq!(
        OfferStatus::parse("rad_etilgan"),
        Some(OfferStatus::Rejected)
    );
    assert_eq!(RequestStatus::parse("unknown"), None);

    println!("[PASS] test_legacy_uzbek_tokens_parse");
}

#[test]
fn test_payment_method_classification() {
    assert_eq!(PaymentMethod::classify("bank transfer"), PaymentMethod::Bank);
    assert_eq!(PaymentMethod::classify("naqd_pul"), PaymentMethod::Cash);
    assert_eq!(PaymentMethod::classify("Naqd pul"), PaymentMethod::Cash);
    assert_eq!(PaymentMethod::classify("cash on delivery"), PaymentMethod::Cash);
    // bank wins when both tokens appear
    assert_eq!(
        PaymentMethod::classify("bank or naqd_pul"),
        PaymentMethod::Bank
    );
    assert_eq!(PaymentMethod::classify("barter"), PaymentMethod::Other);

    println!("[PASS] test_payment_method_classification");
}
