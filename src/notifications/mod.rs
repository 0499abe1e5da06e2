//! Persisted user notifications. Workflow actions push a row for the
//! counterparty; the page chrome shows the unread count and the list page
//! lets the user dismiss entries. One-shot feedback on the very next page
//! uses the session flash slot instead.

use rusqlite::{Connection, params};

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: i64,
    pub kind: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

/// Queue a notification for every user of a company. Returns the ids.
pub fn push_for_company(
    conn: &Connection,
    company_id: i64,
    kind: &str,
    message: &str,
) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE company_id = ?1")?;
    let user_ids = stmt
        .query_map(params![company_id], |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut ids = Vec::new();
    for user_id in user_ids {
        ids.push(push(conn, user_id, kind, message)?);
    }
    Ok(ids)
}

/// Queue a notification for one user. Returns the new id.
pub fn push(conn: &Connection, user_id: i64, kind: &str, message: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO notifications (user_id, kind, message) VALUES (?1, ?2, ?3)",
        params![user_id, kind, message],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Dismiss a notification. Scoped to the owning user so one user cannot
/// dismiss another's entries.
pub fn dismiss(conn: &Connection, id: i64, user_id: i64) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE notifications SET status = 'dismissed' WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(())
}

pub fn mark_all_read(conn: &Connection, user_id: i64) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE notifications SET status = 'read' WHERE user_id = ?1 AND status = 'unread'",
        params![user_id],
    )?;
    Ok(())
}

pub fn count_unread(conn: &Connection, user_id: i64) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND status = 'unread'",
        params![user_id],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// All non-dismissed notifications for a user, newest first.
pub fn find_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Notification>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, message, status, created_at FROM notifications \
         WHERE user_id = ?1 AND status != 'dismissed' \
         ORDER BY id DESC LIMIT 100",
    )?;
    let items = stmt
        .query_map(params![user_id], |row| {
            Ok(Notification {
                id: row.get(0)?,
                kind: row.get(1)?,
                message: row.get(2)?,
                status: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}
