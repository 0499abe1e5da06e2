use rusqlite::{Connection, params};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub action: String,
    pub target_type: String,
    pub target_id: i64,
    pub details: String,
    pub created_at: String,
}

/// Append an audit row for a workflow mutation. Failures are logged by the
/// caller with `let _ = ...`; auditing never blocks the action itself.
pub fn log(
    conn: &Connection,
    user_id: i64,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO audit_log (user_id, action, target_type, target_id, details) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, action, target_type, target_id, details.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent audit entries, newest first.
pub fn find_recent(conn: &Connection, limit: i64) -> rusqlite::Result<Vec<AuditEntry>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.user_id, COALESCE(u.username, 'unknown') AS username, \
                a.action, a.target_type, a.target_id, a.details, a.created_at \
         FROM audit_log a \
         LEFT JOIN users u ON u.id = a.user_id \
         ORDER BY a.id DESC LIMIT ?1",
    )?;
    let entries = stmt
        .query_map(params![limit.clamp(1, 500)], |row| {
            Ok(AuditEntry {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                username: row.get("username")?,
                action: row.get("action")?,
                target_type: row.get("target_type")?,
                target_id: row.get("target_id")?,
                details: row.get("details")?,
                created_at: row.get("created_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
