//! Integration tests for the offer lifecycle: accept spawns an order and
//! closes the request; reject and cancel require a reason.

mod common;

use common::{BUYER_COMPANY, SELLER_COMPANY, make_offer, make_request, setup_test_db};
use savdo::errors::AppError;
use savdo::models::{offer, order, request};
use savdo::workflow::{OfferStatus, OrderStatus, PaymentMethod, RequestStatus};

#[test]
fn test_accept_spawns_order_and_closes_request() {
    let (_dir, conn) = setup_test_db();

    let request_id = make_request(&conn, "bank transfer");
    let offer_id = make_offer(&conn, request_id, 1500.0);

    let off = offer::find_by_id(&conn, offer_id).unwrap().unwrap();
    let order_id = offer::accept(&conn, &off).unwrap();

    let off = offer::find_by_id(&conn, offer_id).unwrap().unwrap();
    assert_eq!(off.status, OfferStatus::Accepted);

    let req = request::find_by_id(&conn, request_id).unwrap().unwrap();
    assert_eq!(req.status, RequestStatus::Closed);

    let ord = order::find_by_id(&conn, order_id).unwrap().unwrap();
    assert_eq!(ord.request_id, request_id);
    assert_eq!(ord.offer_id, offer_id);
    assert_eq!(ord.buyer_company_id, BUYER_COMPANY);
    assert_eq!(ord.supplier_company_id, SELLER_COMPANY);
    assert_eq!(ord.total_amount, 1500.0);
    assert_eq!(ord.status, OrderStatus::Opened);
    assert_eq!(ord.payment_method, PaymentMethod::Bank);

    println!("[PASS] test_accept_spawns_order_and_closes_request");
}

#[test]
fn test_payment_method_is_classified_at_acceptance() {
    let (_dir, conn) = setup_test_db();

    let cash_request = make_request(&conn, "naqd_pul");
    let off = offer::find_by_id(&conn, make_offer(&conn, cash_request, 900.0))
        .unwrap()
        .unwrap();
    let order_id = offer::accept(&conn, &off).unwrap();
    let ord = order::find_by_id(&conn, order_id).unwrap().unwrap();
    assert_eq!(ord.payment_method, PaymentMethod::Cash);

    let other_request = make_request(&conn, "barter");
    let off = offer::find_by_id(&conn, make_offer(&conn, other_request, 900.0))
        .unwrap()
        .unwrap();
    let order_id = offer::accept(&conn, &off).unwrap();
    let ord = order::find_by_id(&conn, order_id).unwrap().unwrap();
    assert_eq!(ord.payment_method, PaymentMethod::Other);

    println!("[PASS] test_payment_method_is_classified_at_acceptance");
}

#[test]
fn test_accept_is_atomic_when_order_insert_fails() {
    let (_dir, conn) = setup_test_db();

    let request_id = make_request(&conn, "bank");
    let off = offer::find_by_id(&conn, make_offer(&conn, request_id, 1200.0))
        .unwrap()
        .unwrap();

    // force the final write of the accept to fail
    conn.execute_batch(
        "CREATE TRIGGER block_orders BEFORE INSERT ON orders \
         BEGIN SELECT RAISE(ABORT, 'insert blocked'); END;",
    )
    .unwrap();
    assert!(offer::accept(&conn, &off).is_err());
    conn.execute_batch("DROP TRIGGER block_orders").unwrap();

    // the offer and the request rolled back with it
    let off = offer::find_by_id(&conn, off.id).unwrap().unwrap();
    assert_eq!(off.status, OfferStatus::Pending);
    let req = request::find_by_id(&conn, request_id).unwrap().unwrap();
    assert_eq!(req.status, RequestStatus::Open);
    assert!(order::find_for_company(&conn, BUYER_COMPANY).unwrap().is_empty());

    // the same accept goes through once the insert can succeed
    let order_id = offer::accept(&conn, &off).unwrap();
    assert!(order::find_by_id(&conn, order_id).unwrap().is_some());

    println!("[PASS] test_accept_is_atomic_when_order_insert_fails");
}

#[test]
fn test_accept_refuses_stale_offer() {
    let (_dir, conn) = setup_test_db();

    let request_id = make_request(&conn, "bank");
    let off = offer::find_by_id(&conn, make_offer(&conn, request_id, 1200.0))
        .unwrap()
        .unwrap();
    offer::reject(&conn, &off, "Budget cut").unwrap();

    let stale = offer::find_by_id(&conn, off.id).unwrap().unwrap();
    assert!(matches!(
        offer::accept(&conn, &stale),
        Err(AppError::Validation(_))
    ));

    // request stays open, no order was spawned
    let req = request::find_by_id(&conn, request_id).unwrap().unwrap();
    assert_eq!(req.status, RequestStatus::Open);
    let orders = order::find_for_company(&conn, BUYER_COMPANY).unwrap();
    assert!(orders.is_empty());

    println!("[PASS] test_accept_refuses_stale_offer");
}

#[test]
fn test_accept_refuses_closed_request() {
    let (_dir, conn) = setup_test_db();

    let request_id = make_request(&conn, "bank");
    let off = offer::find_by_id(&conn, make_offer(&conn, request_id, 1200.0))
        .unwrap()
        .unwrap();
    request::set_status(&conn, request_id, RequestStatus::Cancelled).unwrap();

    assert!(matches!(
        offer::accept(&conn, &off),
        Err(AppError::Validation(_))
    ));
    let unchanged = offer::find_by_id(&conn, off.id).unwrap().unwrap();
    assert_eq!(unchanged.status, OfferStatus::Pending);

    println!("[PASS] test_accept_refuses_closed_request");
}

#[test]
fn test_reject_requires_nonblank_reason() {
    let (_dir, conn) = setup_test_db();

    let request_id = make_request(&conn, "bank");
    let off = offer::find_by_id(&conn, make_offer(&conn, request_id, 1200.0))
        .unwrap()
        .unwrap();

    assert!(matches!(
        offer::reject(&conn, &off, "   "),
        Err(AppError::Validation(_))
    ));
    // nothing was mutated
    let unchanged = offer::find_by_id(&conn, off.id).unwrap().unwrap();
    assert_eq!(unchanged.status, OfferStatus::Pending);
    assert_eq!(unchanged.rejection_reason, None);

    offer::reject(&conn, &off, " Too expensive ").unwrap();
    let rejected = offer::find_by_id(&conn, off.id).unwrap().unwrap();
    assert_eq!(rejected.status, OfferStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Too expensive"));

    println!("[PASS] test_reject_requires_nonblank_reason");
}

#[test]
fn test_cancel_requires_reason_and_pending_status() {
    let (_dir, conn) = setup_test_db();

    let request_id = make_request(&conn, "bank");
    let off = offer::find_by_id(&conn, make_offer(&conn, request_id, 1200.0))
        .unwrap()
        .unwrap();

    assert!(matches!(
        offer::cancel(&conn, &off, ""),
        Err(AppError::Validation(_))
    ));

    offer::cancel(&conn, &off, "Out of stock").unwrap();
    let cancelled = offer::find_by_id(&conn, off.id).unwrap().unwrap();
    assert_eq!(cancelled.status, OfferStatus::Cancelled);

    // a cancelled offer cannot be cancelled again
    assert!(matches!(
        offer::cancel(&conn, &cancelled, "again"),
        Err(AppError::Validation(_))
    ));

    println!("[PASS] test_cancel_requires_reason_and_pending_status");
}

#[test]
fn test_supplier_offer_list_carries_request_context() {
    let (_dir, conn) = setup_test_db();

    let request_id = make_request(&conn, "bank");
    make_offer(&conn, request_id, 1500.0);

    let mine = offer::find_for_supplier(&conn, SELLER_COMPANY).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].request_category, "Packaging");
    assert_eq!(mine[0].buyer_company_name, "Buyer Co");

    println!("[PASS] test_supplier_offer_list_carries_request_context");
}
