use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Seed two demo companies with a buyer and a seller account.
/// Idempotent: skipped once any company exists.
pub fn seed_demo(pool: &DbPool, password_hash: &str) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))
        .unwrap_or(0);
    if count > 0 {
        log::info!("Database already seeded ({} companies), skipping", count);
        return;
    }

    let companies = [
        (
            "Toshkent Textiles",
            "Buyer of raw materials and packaging",
            "Tashkent, Chilonzor 4",
            "+998 71 200 10 10",
            "info@tt.example",
        ),
        (
            "Fergana Supplies",
            "Wholesale supplier of industrial goods",
            "Fergana, Mustaqillik 12",
            "+998 73 300 20 20",
            "sales@fs.example",
        ),
    ];
    for (name, description, address, phone, email) in companies {
        conn.execute(
            "INSERT INTO companies (name, description, address, phone, email) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, description, address, phone, email],
        )
        .expect("Failed to seed company");
    }

    let users = [
        ("buyer", "Demo Buyer", "buyer", 1i64),
        ("seller", "Demo Seller", "seller", 2i64),
    ];
    for (username, display_name, role, company_id) in users {
        conn.execute(
            "INSERT INTO users (username, password, display_name, role, company_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![username, password_hash, display_name, role, company_id],
        )
        .expect("Failed to seed user");
    }

    log::info!("Demo seed complete");
}
