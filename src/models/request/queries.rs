use rusqlite::{Connection, params};

use super::types::{BrowseRequest, Request};
use crate::errors::AppError;
use crate::workflow::{OfferStatus, RequestStatus};

const SELECT_REQUEST: &str = "\
    SELECT r.id, r.buyer_company_id, c.name AS buyer_company_name, \
           r.category, r.description, r.quantity, r.budget_from, r.budget_to, \
           r.deadline_date, r.payment_type, r.status, r.created_at \
    FROM requests r \
    JOIN companies c ON c.id = r.buyer_company_id";

fn bad_status(code: &str, what: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        format!("unknown {what} status '{code}'").into(),
    )
}

fn row_to_request(row: &rusqlite::Row) -> rusqlite::Result<Request> {
    let status_code: String = row.get("status")?;
    let status =
        RequestStatus::parse(&status_code).ok_or_else(|| bad_status(&status_code, "request"))?;
    Ok(Request {
        id: row.get("id")?,
        buyer_company_id: row.get("buyer_company_id")?,
        buyer_company_name: row.get("buyer_company_name")?,
        category: row.get("category")?,
        description: row.get("description")?,
        quantity: row.get("quantity")?,
        budget_from: row.get("budget_from")?,
        budget_to: row.get("budget_to")?,
        deadline_date: row.get("deadline_date")?,
        payment_type: row.get("payment_type")?,
        status,
        created_at: row.get("created_at")?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Request>> {
    let sql = format!("{SELECT_REQUEST} WHERE r.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_request)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// All requests posted by a buyer company, newest first.
pub fn find_for_buyer(conn: &Connection, buyer_company_id: i64) -> rusqlite::Result<Vec<Request>> {
    let sql = format!("{SELECT_REQUEST} WHERE r.buyer_company_id = ?1 ORDER BY r.id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map(params![buyer_company_id], row_to_request)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// All requests for the seller browsing page, each annotated with the status
/// of the seller's most recent offer on it. Tab filtering happens afterwards
/// as a pure predicate.
pub fn find_for_browsing(
    conn: &Connection,
    supplier_company_id: i64,
) -> rusqlite::Result<Vec<BrowseRequest>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.buyer_company_id, c.name AS buyer_company_name, \
                r.category, r.description, r.quantity, r.budget_from, r.budget_to, \
                r.deadline_date, r.payment_type, r.status, r.created_at, \
                (SELECT o.status FROM offers o \
                 WHERE o.request_id = r.id AND o.supplier_company_id = ?1 \
                 ORDER BY o.id DESC LIMIT 1) AS my_offer_status \
         FROM requests r \
         JOIN companies c ON c.id = r.buyer_company_id \
         ORDER BY r.id DESC",
    )?;
    let items = stmt
        .query_map(params![supplier_company_id], |row| {
            let request = row_to_request(row)?;
            let offer_code: Option<String> = row.get("my_offer_status")?;
            let my_offer_status = match offer_code {
                Some(code) => {
                    Some(OfferStatus::parse(&code).ok_or_else(|| bad_status(&code, "offer"))?)
                }
                None => None,
            };
            Ok(BrowseRequest {
                request,
                my_offer_status,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

pub struct NewRequest<'a> {
    pub buyer_company_id: i64,
    pub category: &'a str,
    pub description: &'a str,
    pub quantity: i64,
    pub budget_from: Option<f64>,
    pub budget_to: Option<f64>,
    pub deadline_date: &'a str,
    pub payment_type: &'a str,
}

pub fn create(conn: &Connection, new: &NewRequest) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO requests (buyer_company_id, category, description, quantity, \
                               budget_from, budget_to, deadline_date, payment_type) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            new.buyer_company_id,
            new.category,
            new.description,
            new.quantity,
            new.budget_from,
            new.budget_to,
            new.deadline_date,
            new.payment_type,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn set_status(conn: &Connection, id: i64, status: RequestStatus) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE requests SET status = ?1 WHERE id = ?2",
        params![status.code(), id],
    )?;
    Ok(())
}

/// Buyer withdraws an open request. A request that already closed, expired,
/// or was cancelled stays as it is.
pub fn cancel(conn: &Connection, request: &Request) -> Result<(), AppError> {
    if request.status != RequestStatus::Open {
        return Err(AppError::Validation(format!(
            "Request is no longer open (status: {})",
            request.status.code()
        )));
    }
    set_status(conn, request.id, RequestStatus::Cancelled)?;
    Ok(())
}
