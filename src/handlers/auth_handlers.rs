use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::auth::session::get_user_id;
use crate::auth::{csrf, password, rate_limit::RateLimiter};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::models::user;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    // If already logged in, redirect to dashboard
    if get_user_id(&session).is_some() {
        return Ok(see_other("/dashboard"));
    }
    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate {
        error: None,
        app_name: "Savdo".to_string(),
        csrf_token,
    })
}

fn login_error(session: &Session, message: &str) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(session);
    render(LoginTemplate {
        error: Some(message.to_string()),
        app_name: "Savdo".to_string(),
        csrf_token,
    })
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check BEFORE any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return login_error(
            &session,
            "Too many failed login attempts. Please try again later.",
        );
    }

    let conn = pool.get()?;
    let found = user::find_by_username(&conn, &form.username)?;

    match found {
        Some(u) if matches!(password::verify_password(&form.password, &u.password), Ok(true)) => {
            limiter.clear(ip);
            let _ = session.insert("user_id", u.id);
            let _ = session.insert("username", &u.username);
            let _ = session.insert("role", &u.role);
            let _ = session.insert("company_id", u.company_id);
            Ok(see_other("/dashboard"))
        }
        _ => {
            limiter.record_failure(ip);
            login_error(&session, "Invalid username or password")
        }
    }
}

pub async fn logout(session: Session, form: web::Form<CsrfOnly>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/login"))
}
