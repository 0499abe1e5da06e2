//! Integration tests for the request model and the seller browsing view.

mod common;

use common::{BUYER_COMPANY, SELLER_COMPANY, make_offer, make_request, setup_test_db};
use savdo::errors::AppError;
use savdo::models::offer;
use savdo::models::request::{self, BrowseTab, RequestForm, is_eligible_for_offer};
use savdo::workflow::{OfferStatus, RequestStatus};

#[test]
fn test_create_and_find_request() {
    let (_dir, conn) = setup_test_db();

    let id = make_request(&conn, "bank");
    let req = request::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(req.category, "Packaging");
    assert_eq!(req.status, RequestStatus::Open);
    assert_eq!(req.buyer_company_name, "Buyer Co");

    let mine = request::find_for_buyer(&conn, BUYER_COMPANY).unwrap();
    assert_eq!(mine.len(), 1);

    println!("[PASS] test_create_and_find_request");
}

#[test]
fn test_eligibility_predicate() {
    // open with no prior offer: eligible
    assert!(is_eligible_for_offer(RequestStatus::Open, None));
    // open after a rejection: eligible again
    assert!(is_eligible_for_offer(
        RequestStatus::Open,
        Some(OfferStatus::Rejected)
    ));
    // a live or spent offer blocks a new one
    assert!(!is_eligible_for_offer(
        RequestStatus::Open,
        Some(OfferStatus::Pending)
    ));
    assert!(!is_eligible_for_offer(
        RequestStatus::Open,
        Some(OfferStatus::Accepted)
    ));
    assert!(!is_eligible_for_offer(
        RequestStatus::Open,
        Some(OfferStatus::Cancelled)
    ));
    // non-open requests never accept offers
    assert!(!is_eligible_for_offer(RequestStatus::Closed, None));
    assert!(!is_eligible_for_offer(RequestStatus::Expired, None));

    println!("[PASS] test_eligibility_predicate");
}

#[test]
fn test_browsing_annotates_latest_own_offer() {
    let (_dir, conn) = setup_test_db();

    let with_offer = make_request(&conn, "bank");
    let without_offer = make_request(&conn, "bank");
    let offer_id = make_offer(&conn, with_offer, 1500.0);

    let rows = request::find_for_browsing(&conn, SELLER_COMPANY).unwrap();
    assert_eq!(rows.len(), 2);

    let annotated = rows
        .iter()
        .find(|r| r.request.id == with_offer)
        .unwrap();
    assert_eq!(annotated.my_offer_status, Some(OfferStatus::Pending));
    assert!(!annotated.eligible_for_offer());

    let bare = rows
        .iter()
        .find(|r| r.request.id == without_offer)
        .unwrap();
    assert_eq!(bare.my_offer_status, None);
    assert!(bare.eligible_for_offer());

    // after a rejection the seller may offer again
    let off = offer::find_by_id(&conn, offer_id).unwrap().unwrap();
    offer::reject(&conn, &off, "Too expensive").unwrap();
    let rows = request::find_for_browsing(&conn, SELLER_COMPANY).unwrap();
    let annotated = rows
        .iter()
        .find(|r| r.request.id == with_offer)
        .unwrap();
    assert_eq!(annotated.my_offer_status, Some(OfferStatus::Rejected));
    assert!(annotated.eligible_for_offer());

    println!("[PASS] test_browsing_annotates_latest_own_offer");
}

#[test]
fn test_browse_tabs_are_pure_filters() {
    let (_dir, conn) = setup_test_db();

    let offered = make_request(&conn, "bank");
    let fresh = make_request(&conn, "bank");
    make_offer(&conn, offered, 1200.0);

    let rows = request::find_for_browsing(&conn, SELLER_COMPANY).unwrap();

    let all: Vec<_> = rows.iter().filter(|r| BrowseTab::All.matches(r)).collect();
    assert_eq!(all.len(), 2);

    let eligible: Vec<_> = rows
        .iter()
        .filter(|r| BrowseTab::Eligible.matches(r))
        .collect();
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].request.id, fresh);

    let with_offers: Vec<_> = rows
        .iter()
        .filter(|r| BrowseTab::Offered.matches(r))
        .collect();
    assert_eq!(with_offers.len(), 1);
    assert_eq!(with_offers[0].request.id, offered);

    assert_eq!(BrowseTab::parse("eligible"), BrowseTab::Eligible);
    assert_eq!(BrowseTab::parse("nonsense"), BrowseTab::All);

    println!("[PASS] test_browse_tabs_are_pure_filters");
}

#[test]
fn test_cancel_withdraws_only_open_requests() {
    let (_dir, conn) = setup_test_db();

    let id = make_request(&conn, "bank");
    let req = request::find_by_id(&conn, id).unwrap().unwrap();
    request::cancel(&conn, &req).unwrap();

    let req = request::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(req.status, RequestStatus::Cancelled);
    // a cancelled request stops taking offers and cannot be cancelled twice
    assert!(!is_eligible_for_offer(req.status, None));
    assert!(matches!(
        request::cancel(&conn, &req),
        Err(AppError::Validation(_))
    ));

    // a request closed by an accepted offer cannot be withdrawn either
    let closed = make_request(&conn, "bank");
    let off = offer::find_by_id(&conn, make_offer(&conn, closed, 800.0))
        .unwrap()
        .unwrap();
    offer::accept(&conn, &off).unwrap();
    let req = request::find_by_id(&conn, closed).unwrap().unwrap();
    assert_eq!(req.status, RequestStatus::Closed);
    assert!(matches!(
        request::cancel(&conn, &req),
        Err(AppError::Validation(_))
    ));

    println!("[PASS] test_cancel_withdraws_only_open_requests");
}

#[test]
fn test_request_form_validation() {
    let valid = RequestForm {
        category: "Packaging".to_string(),
        description: String::new(),
        quantity: "500".to_string(),
        budget_from: "1000".to_string(),
        budget_to: String::new(),
        deadline_date: "2026-10-01".to_string(),
        payment_type: "bank".to_string(),
        csrf_token: String::new(),
    };
    assert!(valid.validate().is_empty());

    let invalid = RequestForm {
        category: "  ".to_string(),
        description: String::new(),
        quantity: "0".to_string(),
        budget_from: "abc".to_string(),
        budget_to: String::new(),
        deadline_date: String::new(),
        payment_type: String::new(),
        csrf_token: String::new(),
    };
    let errors = invalid.validate();
    assert!(errors.iter().any(|e| e.contains("Category")));
    assert!(errors.iter().any(|e| e.contains("Quantity")));
    assert!(errors.iter().any(|e| e.contains("Budget from")));
    assert!(errors.iter().any(|e| e.contains("Deadline date")));
    assert!(errors.iter().any(|e| e.contains("Payment type")));

    println!("[PASS] test_request_form_validation");
}
