use rusqlite::{Connection, params};

#[derive(Debug, Clone)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub logo_path: Option<String>,
    pub created_at: String,
}

fn row_to_company(row: &rusqlite::Row) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        address: row.get("address")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        logo_path: row.get("logo_path")?,
        created_at: row.get("created_at")?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Company>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, address, phone, email, logo_path, created_at \
         FROM companies WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id], row_to_company)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn get_name(conn: &Connection, id: i64) -> rusqlite::Result<String> {
    conn.query_row(
        "SELECT name FROM companies WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )
}
