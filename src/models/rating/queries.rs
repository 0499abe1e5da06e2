use rusqlite::{Connection, params};

use super::types::{Rating, RatingSummary, StructuredScores};

const SELECT_RATING: &str = "\
    SELECT rt.id, rt.company_id, rt.rater_company_id, c.name AS rater_company_name, \
           rt.order_id, rt.overall_score, rt.quality, rt.delivery_speed, rt.communication, \
           rt.price_fairness, rt.reliability, rt.comment, rt.created_at \
    FROM ratings rt \
    JOIN companies c ON c.id = rt.rater_company_id";

fn row_to_rating(row: &rusqlite::Row) -> rusqlite::Result<Rating> {
    Ok(Rating {
        id: row.get("id")?,
        company_id: row.get("company_id")?,
        rater_company_id: row.get("rater_company_id")?,
        rater_company_name: row.get("rater_company_name")?,
        order_id: row.get("order_id")?,
        overall_score: row.get("overall_score")?,
        quality: row.get("quality")?,
        delivery_speed: row.get("delivery_speed")?,
        communication: row.get("communication")?,
        price_fairness: row.get("price_fairness")?,
        reliability: row.get("reliability")?,
        comment: row.get("comment")?,
        created_at: row.get("created_at")?,
    })
}

/// Whether the rater has already reviewed this order. The review form is
/// suppressed from a fresh read of this, never from in-memory state.
pub fn exists_for_order(
    conn: &Connection,
    order_id: i64,
    rater_company_id: i64,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM ratings WHERE order_id = ?1 AND rater_company_id = ?2",
        params![order_id, rater_company_id],
        |row| row.get(0),
    )
}

pub fn find_for_order(conn: &Connection, order_id: i64) -> rusqlite::Result<Vec<Rating>> {
    let sql = format!("{SELECT_RATING} WHERE rt.order_id = ?1 ORDER BY rt.id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map(params![order_id], row_to_rating)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// All reviews received by a company (simple and structured), newest first.
pub fn find_for_company(conn: &Connection, company_id: i64) -> rusqlite::Result<Vec<Rating>> {
    let sql = format!("{SELECT_RATING} WHERE rt.company_id = ?1 ORDER BY rt.id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map(params![company_id], row_to_rating)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// Aggregate average and count for a company. Structured reviews count with
/// the mean of their five dimensions.
pub fn summary_for_company(conn: &Connection, company_id: i64) -> rusqlite::Result<RatingSummary> {
    conn.query_row(
        "SELECT COALESCE(AVG(COALESCE(overall_score, \
                (quality + delivery_speed + communication + price_fairness + reliability) / 5.0)), 0), \
                COUNT(*) \
         FROM ratings WHERE company_id = ?1",
        params![company_id],
        |row| {
            Ok(RatingSummary {
                average: row.get(0)?,
                total: row.get(1)?,
            })
        },
    )
}

/// Insert a structured order-completion review. Returns the new id.
pub fn create_for_order(
    conn: &Connection,
    order_id: i64,
    company_id: i64,
    rater_company_id: i64,
    scores: &StructuredScores,
    comment: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO ratings (company_id, rater_company_id, order_id, quality, \
                              delivery_speed, communication, price_fairness, reliability, comment) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            company_id,
            rater_company_id,
            order_id,
            scores.quality,
            scores.delivery_speed,
            scores.communication,
            scores.price_fairness,
            scores.reliability,
            comment,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a simple company review. Returns the new id.
pub fn create_for_company(
    conn: &Connection,
    company_id: i64,
    rater_company_id: i64,
    overall_score: i64,
    comment: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO ratings (company_id, rater_company_id, overall_score, comment) \
         VALUES (?1, ?2, ?3, ?4)",
        params![company_id, rater_company_id, overall_score, comment],
    )?;
    Ok(conn.last_insert_rowid())
}
