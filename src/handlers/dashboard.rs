use actix_session::Session;
use actix_web::{HttpResponse, web};
use rusqlite::{Connection, params};

use crate::audit;
use crate::auth::session::current_user;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::rating;
use crate::templates_structs::{DashboardStats, DashboardTemplate, PageContext};

fn count(conn: &Connection, sql: &str, company_id: i64) -> rusqlite::Result<i64> {
    conn.query_row(sql, params![company_id], |row| row.get(0))
}

/// Counters for the buyer cards: own requests, offers awaiting review,
/// orders either way.
fn buyer_stats(conn: &Connection, company_id: i64) -> rusqlite::Result<DashboardStats> {
    Ok(DashboardStats {
        open_requests: count(
            conn,
            "SELECT COUNT(*) FROM requests WHERE buyer_company_id = ?1 AND status = 'open'",
            company_id,
        )?,
        pending_offers: count(
            conn,
            "SELECT COUNT(*) FROM offers o JOIN requests r ON r.id = o.request_id \
             WHERE r.buyer_company_id = ?1 AND o.status = 'pending'",
            company_id,
        )?,
        active_orders: count(
            conn,
            "SELECT COUNT(*) FROM orders WHERE buyer_company_id = ?1 \
             AND status NOT IN ('completed', 'cancelled')",
            company_id,
        )?,
        completed_orders: count(
            conn,
            "SELECT COUNT(*) FROM orders WHERE buyer_company_id = ?1 AND status = 'completed'",
            company_id,
        )?,
    })
}

/// Counters for the seller cards: the open market, own pending offers,
/// orders to fulfil.
fn seller_stats(conn: &Connection, company_id: i64) -> rusqlite::Result<DashboardStats> {
    Ok(DashboardStats {
        open_requests: conn.query_row(
            "SELECT COUNT(*) FROM requests WHERE status = 'open'",
            [],
            |row| row.get(0),
        )?,
        pending_offers: count(
            conn,
            "SELECT COUNT(*) FROM offers WHERE supplier_company_id = ?1 AND status = 'pending'",
            company_id,
        )?,
        active_orders: count(
            conn,
            "SELECT COUNT(*) FROM orders WHERE supplier_company_id = ?1 \
             AND status NOT IN ('completed', 'cancelled')",
            company_id,
        )?,
        completed_orders: count(
            conn,
            "SELECT COUNT(*) FROM orders WHERE supplier_company_id = ?1 AND status = 'completed'",
            company_id,
        )?,
    })
}

pub async fn index(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let user = current_user(&session)?;
    let ctx = PageContext::build(&session, &conn)?;

    let stats = if user.role.is_buyer() {
        buyer_stats(&conn, user.company_id)?
    } else {
        seller_stats(&conn, user.company_id)?
    };
    let own_rating = rating::summary_for_company(&conn, user.company_id)?;
    let recent = audit::find_recent(&conn, 10)?;

    render(DashboardTemplate {
        ctx,
        stats,
        rating: own_rating,
        recent,
    })
}
