//! Tests for persisted notifications and the audit trail.

mod common;

use common::{BUYER_USER, SELLER_COMPANY, SELLER_USER, setup_test_db};
use savdo::{audit, notifications};
use serde_json::json;

#[test]
fn test_push_for_company_reaches_all_users() {
    let (_dir, conn) = setup_test_db();

    let ids = notifications::push_for_company(&conn, SELLER_COMPANY, "offer", "New offer").unwrap();
    assert_eq!(ids.len(), 1);

    assert_eq!(notifications::count_unread(&conn, SELLER_USER), 1);
    assert_eq!(notifications::count_unread(&conn, BUYER_USER), 0);

    let list = notifications::find_for_user(&conn, SELLER_USER).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].message, "New offer");
    assert_eq!(list[0].status, "unread");

    println!("[PASS] test_push_for_company_reaches_all_users");
}

#[test]
fn test_dismiss_is_scoped_to_the_owner() {
    let (_dir, conn) = setup_test_db();

    let id = notifications::push(&conn, SELLER_USER, "order", "Order moved").unwrap();

    // another user cannot dismiss it
    notifications::dismiss(&conn, id, BUYER_USER).unwrap();
    assert_eq!(notifications::find_for_user(&conn, SELLER_USER).unwrap().len(), 1);

    notifications::dismiss(&conn, id, SELLER_USER).unwrap();
    assert!(notifications::find_for_user(&conn, SELLER_USER).unwrap().is_empty());

    println!("[PASS] test_dismiss_is_scoped_to_the_owner");
}

#[test]
fn test_mark_all_read_clears_the_badge() {
    let (_dir, conn) = setup_test_db();

    notifications::push(&conn, SELLER_USER, "order", "one").unwrap();
    notifications::push(&conn, SELLER_USER, "order", "two").unwrap();
    assert_eq!(notifications::count_unread(&conn, SELLER_USER), 2);

    notifications::mark_all_read(&conn, SELLER_USER).unwrap();
    assert_eq!(notifications::count_unread(&conn, SELLER_USER), 0);
    // read entries are still listed until dismissed
    assert_eq!(notifications::find_for_user(&conn, SELLER_USER).unwrap().len(), 2);

    println!("[PASS] test_mark_all_read_clears_the_badge");
}

#[test]
fn test_audit_log_records_and_lists() {
    let (_dir, conn) = setup_test_db();

    audit::log(&conn, BUYER_USER, "request.create", "request", 7, json!({"category": "Boxes"}))
        .unwrap();
    audit::log(&conn, SELLER_USER, "offer.create", "offer", 3, json!({})).unwrap();

    let entries = audit::find_recent(&conn, 50).unwrap();
    assert_eq!(entries.len(), 2);
    // newest first
    assert_eq!(entries[0].action, "offer.create");
    assert_eq!(entries[1].action, "request.create");
    assert_eq!(entries[1].username, "buyer");
    assert!(entries[1].details.contains("Boxes"));

    println!("[PASS] test_audit_log_records_and_lists");
}
