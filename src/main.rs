use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use savdo::auth::{self, rate_limit::RateLimiter};
use savdo::db;
use savdo::handlers;
use savdo::uploads::storage::UPLOAD_DIR;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    // Ensure data and upload directories exist
    std::fs::create_dir_all(UPLOAD_DIR).expect("Failed to create upload directory");

    // Initialize database
    let db_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/app.db".to_string());
    let pool = db::init_pool(&db_path);
    db::run_migrations(&pool);

    // Seed demo companies and accounts if empty
    let demo_hash =
        auth::password::hash_password("demo123").expect("Failed to hash default password");
    db::seed_demo(&pool, &demo_hash);

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let limiter = RateLimiter::new();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(limiter.clone()))
            // Static files and stored uploads
            .service(actix_files::Files::new("/static", "./static"))
            .service(actix_files::Files::new("/uploads", UPLOAD_DIR))
            // Public routes
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            // Root redirect
            .route("/", web::get().to(|| async {
                actix_web::HttpResponse::SeeOther()
                    .insert_header(("Location", "/dashboard"))
                    .finish()
            }))
            // Protected routes
            .service(
                web::scope("")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .route("/dashboard", web::get().to(handlers::dashboard::index))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    // Requests — /requests/new and /requests/my BEFORE /requests/{id}
                    .route("/requests", web::get().to(handlers::request_handlers::browse))
                    .route("/requests/my", web::get().to(handlers::request_handlers::my_list))
                    .route("/requests/new", web::get().to(handlers::request_handlers::new_form))
                    .route("/requests", web::post().to(handlers::request_handlers::create))
                    .route("/requests/{id}", web::get().to(handlers::request_handlers::detail))
                    .route("/requests/{id}/cancel", web::post().to(handlers::request_handlers::cancel))
                    .route("/requests/{id}/offers", web::post().to(handlers::request_handlers::offer_create))
                    // Offers
                    .route("/offers", web::get().to(handlers::offer_handlers::my_list))
                    .route("/offers/{id}", web::get().to(handlers::offer_handlers::review))
                    .route("/offers/{id}/accept", web::post().to(handlers::offer_handlers::accept))
                    .route("/offers/{id}/reject", web::post().to(handlers::offer_handlers::reject))
                    .route("/offers/{id}/cancel", web::post().to(handlers::offer_handlers::cancel))
                    // Orders
                    .route("/orders", web::get().to(handlers::order_handlers::list))
                    .route("/orders/{id}", web::get().to(handlers::order_handlers::detail))
                    .route("/orders/{id}/status", web::post().to(handlers::order_handlers::update_status))
                    .route("/orders/{id}/confirm-payment", web::post().to(handlers::order_handlers::confirm_payment))
                    .route("/orders/{id}/cash-receipt", web::post().to(handlers::order_handlers::submit_cash_receipt))
                    .route("/orders/{id}/confirm-cash", web::post().to(handlers::order_handlers::confirm_cash))
                    .route("/orders/{id}/start-production", web::post().to(handlers::order_handlers::start_production))
                    .route("/orders/{id}/ship", web::post().to(handlers::order_handlers::ship))
                    .route("/orders/{id}/delivered", web::post().to(handlers::order_handlers::mark_delivered))
                    .route("/orders/{id}/confirm-delivery", web::post().to(handlers::order_handlers::confirm_delivery))
                    // Order completion review
                    .route("/orders/{id}/rate", web::get().to(handlers::rating_handlers::form))
                    .route("/orders/{id}/rate", web::post().to(handlers::rating_handlers::submit))
                    // Company profiles and reviews
                    .route("/companies/{id}", web::get().to(handlers::company_handlers::profile))
                    .route("/companies/{id}/reviews", web::post().to(handlers::company_handlers::review_create))
                    // Notifications
                    .route("/notifications", web::get().to(handlers::notification_handlers::list))
                    .route("/notifications/{id}/dismiss", web::post().to(handlers::notification_handlers::dismiss))
                    // Audit log
                    .route("/audit", web::get().to(handlers::audit_handlers::list))
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
