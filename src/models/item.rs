use rusqlite::{Connection, params};

/// A product in a company's catalogue.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Option<f64>,
    pub created_at: String,
}

fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get("id")?,
        company_id: row.get("company_id")?,
        name: row.get("name")?,
        category: row.get("category")?,
        description: row.get("description")?,
        price: row.get("price")?,
        created_at: row.get("created_at")?,
    })
}

/// A company's items, optionally filtered by category.
pub fn find_for_company(
    conn: &Connection,
    company_id: i64,
    category: Option<&str>,
) -> rusqlite::Result<Vec<Item>> {
    let mut stmt = conn.prepare(
        "SELECT id, company_id, name, category, description, price, created_at \
         FROM items \
         WHERE company_id = ?1 AND (?2 IS NULL OR category = ?2) \
         ORDER BY name",
    )?;
    let items = stmt
        .query_map(params![company_id, category], row_to_item)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}
