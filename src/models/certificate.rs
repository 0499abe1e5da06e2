use rusqlite::{Connection, params};

#[derive(Debug, Clone)]
pub struct Certificate {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub issued_by: String,
    pub issued_date: String,
    pub file_path: Option<String>,
}

pub fn find_for_company(conn: &Connection, company_id: i64) -> rusqlite::Result<Vec<Certificate>> {
    let mut stmt = conn.prepare(
        "SELECT id, company_id, title, issued_by, issued_date, file_path \
         FROM certificates WHERE company_id = ?1 ORDER BY issued_date DESC",
    )?;
    let items = stmt
        .query_map(params![company_id], |row| {
            Ok(Certificate {
                id: row.get("id")?,
                company_id: row.get("company_id")?,
                title: row.get("title")?,
                issued_by: row.get("issued_by")?,
                issued_date: row.get("issued_date")?,
                file_path: row.get("file_path")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}
