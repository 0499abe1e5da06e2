use rusqlite::{Connection, params};

use super::types::{Order, OrderPhoto};
use crate::errors::AppError;
use crate::workflow::{OrderStatus, PaymentMethod};

const SELECT_ORDER: &str = "\
    SELECT o.id, o.request_id, o.offer_id, o.buyer_company_id, o.supplier_company_id, \
           bc.name AS buyer_company_name, sc.name AS supplier_company_name, \
           o.total_amount, o.payment_terms, o.payment_method, o.status, o.cancel_reason, \
           o.payment_document_path, o.ttn_document_path, o.created_at, o.updated_at \
    FROM orders o \
    JOIN companies bc ON bc.id = o.buyer_company_id \
    JOIN companies sc ON sc.id = o.supplier_company_id";

fn bad_value(what: &str, code: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        format!("unknown {what} '{code}'").into(),
    )
}

fn row_to_order(row: &rusqlite::Row) -> rusqlite::Result<Order> {
    let status_code: String = row.get("status")?;
    let status =
        OrderStatus::parse(&status_code).ok_or_else(|| bad_value("order status", &status_code))?;
    let method_code: String = row.get("payment_method")?;
    let payment_method = PaymentMethod::parse(&method_code)
        .ok_or_else(|| bad_value("payment method", &method_code))?;
    Ok(Order {
        id: row.get("id")?,
        request_id: row.get("request_id")?,
        offer_id: row.get("offer_id")?,
        buyer_company_id: row.get("buyer_company_id")?,
        supplier_company_id: row.get("supplier_company_id")?,
        buyer_company_name: row.get("buyer_company_name")?,
        supplier_company_name: row.get("supplier_company_name")?,
        total_amount: row.get("total_amount")?,
        payment_terms: row.get("payment_terms")?,
        payment_method,
        status,
        cancel_reason: row.get("cancel_reason")?,
        payment_document_path: row.get("payment_document_path")?,
        ttn_document_path: row.get("ttn_document_path")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Order>> {
    let sql = format!("{SELECT_ORDER} WHERE o.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_order)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Orders where the company is either party, newest first.
pub fn find_for_company(conn: &Connection, company_id: i64) -> rusqlite::Result<Vec<Order>> {
    let sql = format!(
        "{SELECT_ORDER} WHERE o.buyer_company_id = ?1 OR o.supplier_company_id = ?1 \
         ORDER BY o.id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map(params![company_id], row_to_order)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

pub struct NewOrder<'a> {
    pub request_id: i64,
    pub offer_id: i64,
    pub buyer_company_id: i64,
    pub supplier_company_id: i64,
    pub total_amount: f64,
    pub payment_terms: &'a str,
    pub payment_method: PaymentMethod,
}

pub fn create(conn: &Connection, new: &NewOrder) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO orders (request_id, offer_id, buyer_company_id, supplier_company_id, \
                             total_amount, payment_terms, payment_method) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.request_id,
            new.offer_id,
            new.buyer_company_id,
            new.supplier_company_id,
            new.total_amount,
            new.payment_terms,
            new.payment_method.code(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn set_status(
    conn: &Connection,
    id: i64,
    status: OrderStatus,
    cancel_reason: Option<&str>,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE orders SET status = ?1, cancel_reason = COALESCE(?2, cancel_reason), \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE id = ?3",
        params![status.code(), cancel_reason, id],
    )?;
    Ok(())
}

/// Apply a status transition, enforcing the transition table for the order's
/// payment method and the mandatory cancellation reason. All order mutations
/// funnel through here.
pub fn apply_transition(
    conn: &Connection,
    order: &Order,
    target: OrderStatus,
    reason: Option<&str>,
) -> Result<(), AppError> {
    if !order.status.can_transition(target, order.payment_method) {
        return Err(AppError::Validation(format!(
            "Transition {} -> {} is not allowed",
            order.status.code(),
            target.code()
        )));
    }
    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    if target == OrderStatus::Cancelled && reason.is_none() {
        return Err(AppError::Validation(
            "Cancellation reason is required".to_string(),
        ));
    }
    set_status(conn, order.id, target, reason)?;
    Ok(())
}

/// Buyer confirms a bank transfer with the uploaded payment document. The
/// status step and the document path land in one transaction.
pub fn confirm_payment(conn: &Connection, order: &Order, path: &str) -> Result<(), AppError> {
    if !order.awaits_bank_payment() {
        return Err(AppError::Validation(
            "Order is not awaiting a bank payment".to_string(),
        ));
    }
    let tx = conn.unchecked_transaction()?;
    apply_transition(&tx, order, OrderStatus::PaymentDone, None)?;
    tx.execute(
        "UPDATE orders SET payment_document_path = ?1 WHERE id = ?2",
        params![path, order.id],
    )?;
    tx.commit()?;
    Ok(())
}

/// Buyer submits the cash receipt photo; the seller still has to confirm.
pub fn submit_cash_receipt(conn: &Connection, order: &Order, path: &str) -> Result<(), AppError> {
    if !order.awaits_cash_receipt() {
        return Err(AppError::Validation(
            "Order is not awaiting a cash payment".to_string(),
        ));
    }
    let tx = conn.unchecked_transaction()?;
    apply_transition(&tx, order, OrderStatus::CashPaymentPending, None)?;
    tx.execute(
        "UPDATE orders SET payment_document_path = ?1 WHERE id = ?2",
        params![path, order.id],
    )?;
    tx.commit()?;
    Ok(())
}

/// Seller confirms the cash payment was received. No document involved.
pub fn confirm_cash_payment(conn: &Connection, order: &Order) -> Result<(), AppError> {
    apply_transition(conn, order, OrderStatus::CashPaymentDone, None)
}

pub fn start_production(conn: &Connection, order: &Order) -> Result<(), AppError> {
    apply_transition(conn, order, OrderStatus::Collecting, None)
}

/// Seller ships the goods. The TTN waybill path is stored together with the
/// status step.
pub fn ship(conn: &Connection, order: &Order, ttn_path: &str) -> Result<(), AppError> {
    let tx = conn.unchecked_transaction()?;
    apply_transition(&tx, order, OrderStatus::InTransit, None)?;
    tx.execute(
        "UPDATE orders SET ttn_document_path = ?1 WHERE id = ?2",
        params![ttn_path, order.id],
    )?;
    tx.commit()?;
    Ok(())
}

pub fn mark_delivered(conn: &Connection, order: &Order) -> Result<(), AppError> {
    apply_transition(conn, order, OrderStatus::Delivered, None)
}

/// Buyer confirms delivery with photos; completes the order. The order never
/// becomes `completed` without all of its photos stored.
pub fn confirm_delivery(
    conn: &Connection,
    order: &Order,
    photo_paths: &[String],
) -> Result<(), AppError> {
    let tx = conn.unchecked_transaction()?;
    apply_transition(&tx, order, OrderStatus::Completed, None)?;
    for path in photo_paths {
        tx.execute(
            "INSERT INTO order_photos (order_id, path) VALUES (?1, ?2)",
            params![order.id, path],
        )?;
    }
    tx.commit()?;
    Ok(())
}

pub fn photos(conn: &Connection, order_id: i64) -> rusqlite::Result<Vec<OrderPhoto>> {
    let mut stmt = conn.prepare(
        "SELECT id, path, created_at FROM order_photos WHERE order_id = ?1 ORDER BY id",
    )?;
    let items = stmt
        .query_map(params![order_id], |row| {
            Ok(OrderPhoto {
                id: row.get(0)?,
                path: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}
