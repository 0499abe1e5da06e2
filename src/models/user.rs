use rusqlite::{Connection, params};

/// Internal user struct for authentication — includes password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
    pub company_id: i64,
    pub created_at: String,
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password: row.get("password")?,
        display_name: row.get("display_name")?,
        role: row.get("role")?,
        company_id: row.get("company_id")?,
        created_at: row.get("created_at")?,
    })
}

/// Find user by username for authentication. Returns internal User with password hash.
pub fn find_by_username(conn: &Connection, username: &str) -> rusqlite::Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password, display_name, role, company_id, created_at \
         FROM users WHERE username = ?1",
    )?;
    let mut rows = stmt.query_map(params![username], row_to_user)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub struct NewUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
    pub company_id: i64,
}

pub fn create(conn: &Connection, new: &NewUser) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password, display_name, role, company_id) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.username, new.password, new.display_name, new.role, new.company_id],
    )?;
    Ok(conn.last_insert_rowid())
}
