//! Shared test infrastructure for model layer tests.
//!
//! `setup_test_db()` creates a temporary SQLite database with the schema and
//! two seeded companies (a buyer and a supplier) plus one user each.

use rusqlite::Connection;
use tempfile::TempDir;

use savdo::db::MIGRATIONS;
use savdo::models::offer::OfferValues;
use savdo::models::request::NewRequest;
use savdo::models::{offer, request};

pub const BUYER_COMPANY: i64 = 1;
pub const SELLER_COMPANY: i64 = 2;
pub const BUYER_USER: i64 = 1;
pub const SELLER_USER: i64 = 2;

/// Setup a test database with schema and two seeded companies.
///
/// Returns a tuple of (TempDir, Connection) where TempDir must be kept
/// alive for the Connection to remain valid.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    seed_companies(&conn).expect("Failed to seed companies");

    (dir, conn)
}

fn seed_companies(conn: &Connection) -> rusqlite::Result<()> {
    for (name, role) in [("Buyer Co", "buyer"), ("Seller Co", "seller")] {
        conn.execute(
            "INSERT INTO companies (name) VALUES (?1)",
            [name],
        )?;
        let company_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO users (username, password, role, company_id) VALUES (?1, 'x', ?2, ?3)",
            rusqlite::params![role, role, company_id],
        )?;
    }
    Ok(())
}

/// Create an open request from the seeded buyer with the given payment type.
#[allow(dead_code)]
pub fn make_request(conn: &Connection, payment_type: &str) -> i64 {
    request::create(
        conn,
        &NewRequest {
            buyer_company_id: BUYER_COMPANY,
            category: "Packaging",
            description: "Corrugated boxes",
            quantity: 500,
            budget_from: Some(1000.0),
            budget_to: Some(2000.0),
            deadline_date: "2026-10-01",
            payment_type,
        },
    )
    .expect("Failed to create request")
}

/// Default parsed offer values used across tests.
#[allow(dead_code)]
pub fn offer_values(price: f64) -> OfferValues {
    OfferValues {
        price,
        eta_days: 10,
        delivery_included: true,
        payment_terms: "50% upfront".to_string(),
        warranty_months: Some(6),
        special_conditions: String::new(),
        comment: String::new(),
    }
}

/// Create a pending offer from the seeded supplier on the given request.
#[allow(dead_code)]
pub fn make_offer(conn: &Connection, request_id: i64, price: f64) -> i64 {
    offer::create(conn, request_id, SELLER_COMPANY, &offer_values(price))
        .expect("Failed to create offer")
}
