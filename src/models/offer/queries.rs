use rusqlite::{Connection, params};

use super::types::{MyOffer, Offer, OfferValues};
use crate::errors::AppError;
use crate::models::{order, request};
use crate::workflow::{OfferStatus, PaymentMethod, RequestStatus};

const SELECT_OFFER: &str = "\
    SELECT o.id, o.request_id, o.supplier_company_id, c.name AS supplier_company_name, \
           o.price, o.eta_days, o.delivery_included, o.payment_terms, o.warranty_months, \
           o.special_conditions, o.comment, o.status, o.rejection_reason, o.created_at \
    FROM offers o \
    JOIN companies c ON c.id = o.supplier_company_id";

fn bad_status(code: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        format!("unknown offer status '{code}'").into(),
    )
}

fn row_to_offer(row: &rusqlite::Row) -> rusqlite::Result<Offer> {
    let status_code: String = row.get("status")?;
    let status = OfferStatus::parse(&status_code).ok_or_else(|| bad_status(&status_code))?;
    let delivery_included: i64 = row.get("delivery_included")?;
    Ok(Offer {
        id: row.get("id")?,
        request_id: row.get("request_id")?,
        supplier_company_id: row.get("supplier_company_id")?,
        supplier_company_name: row.get("supplier_company_name")?,
        price: row.get("price")?,
        eta_days: row.get("eta_days")?,
        delivery_included: delivery_included != 0,
        payment_terms: row.get("payment_terms")?,
        warranty_months: row.get("warranty_months")?,
        special_conditions: row.get("special_conditions")?,
        comment: row.get("comment")?,
        status,
        rejection_reason: row.get("rejection_reason")?,
        created_at: row.get("created_at")?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Offer>> {
    let sql = format!("{SELECT_OFFER} WHERE o.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_offer)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// All offers on a request, newest first.
pub fn find_for_request(conn: &Connection, request_id: i64) -> rusqlite::Result<Vec<Offer>> {
    let sql = format!("{SELECT_OFFER} WHERE o.request_id = ?1 ORDER BY o.id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map(params![request_id], row_to_offer)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// The seller's offers across all requests, with request context, newest first.
pub fn find_for_supplier(
    conn: &Connection,
    supplier_company_id: i64,
) -> rusqlite::Result<Vec<MyOffer>> {
    let mut stmt = conn.prepare(
        "SELECT o.id, o.request_id, o.supplier_company_id, c.name AS supplier_company_name, \
                o.price, o.eta_days, o.delivery_included, o.payment_terms, o.warranty_months, \
                o.special_conditions, o.comment, o.status, o.rejection_reason, o.created_at, \
                r.category AS request_category, bc.name AS buyer_company_name \
         FROM offers o \
         JOIN companies c ON c.id = o.supplier_company_id \
         JOIN requests r ON r.id = o.request_id \
         JOIN companies bc ON bc.id = r.buyer_company_id \
         WHERE o.supplier_company_id = ?1 ORDER BY o.id DESC",
    )?;
    let items = stmt
        .query_map(params![supplier_company_id], |row| {
            Ok(MyOffer {
                offer: row_to_offer(row)?,
                request_category: row.get("request_category")?,
                buyer_company_name: row.get("buyer_company_name")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

pub fn create(
    conn: &Connection,
    request_id: i64,
    supplier_company_id: i64,
    values: &OfferValues,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO offers (request_id, supplier_company_id, price, eta_days, \
                             delivery_included, payment_terms, warranty_months, \
                             special_conditions, comment) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            request_id,
            supplier_company_id,
            values.price,
            values.eta_days,
            values.delivery_included as i64,
            values.payment_terms,
            values.warranty_months,
            values.special_conditions,
            values.comment,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Accept a pending offer: mark it accepted, close the parent request, and
/// spawn the order, all in one transaction. The order's payment method is
/// classified here, once, from the request's payment type. Returns the new
/// order id.
pub fn accept(conn: &Connection, offer: &Offer) -> Result<i64, AppError> {
    if !offer.status.is_actionable() {
        return Err(AppError::Validation(format!(
            "Offer is no longer pending (status: {})",
            offer.status.code()
        )));
    }
    let req = request::find_by_id(conn, offer.request_id)?.ok_or(AppError::NotFound)?;
    if !req.status.accepts_offers() {
        return Err(AppError::Validation(format!(
            "Request is no longer open (status: {})",
            req.status.code()
        )));
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "UPDATE offers SET status = 'accepted' WHERE id = ?1",
        params![offer.id],
    )?;
    request::set_status(&tx, req.id, RequestStatus::Closed)?;

    let method = PaymentMethod::classify(&req.payment_type);
    let order_id = order::create(
        &tx,
        &order::NewOrder {
            request_id: req.id,
            offer_id: offer.id,
            buyer_company_id: req.buyer_company_id,
            supplier_company_id: offer.supplier_company_id,
            total_amount: offer.price,
            payment_terms: &offer.payment_terms,
            payment_method: method,
        },
    )?;
    tx.commit()?;
    Ok(order_id)
}

/// Reject a pending offer. The reason is mandatory and must not be blank.
pub fn reject(conn: &Connection, offer: &Offer, reason: &str) -> Result<(), AppError> {
    if !offer.status.is_actionable() {
        return Err(AppError::Validation(format!(
            "Offer is no longer pending (status: {})",
            offer.status.code()
        )));
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation(
            "Rejection reason is required".to_string(),
        ));
    }
    conn.execute(
        "UPDATE offers SET status = 'rejected', rejection_reason = ?1 WHERE id = ?2",
        params![reason, offer.id],
    )?;
    Ok(())
}

/// Seller withdraws their own pending offer. A reason is required.
pub fn cancel(conn: &Connection, offer: &Offer, reason: &str) -> Result<(), AppError> {
    if !offer.status.is_actionable() {
        return Err(AppError::Validation(format!(
            "Offer is no longer pending (status: {})",
            offer.status.code()
        )));
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation(
            "Cancellation reason is required".to_string(),
        ));
    }
    conn.execute(
        "UPDATE offers SET status = 'cancelled', rejection_reason = ?1 WHERE id = ?2",
        params![reason, offer.id],
    )?;
    Ok(())
}
