use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::current_user;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::notifications;
use crate::templates_structs::{NotificationListTemplate, PageContext};

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Notification list. Viewing it marks everything read, so the badge count
/// in the chrome is captured before the update.
pub async fn list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user = current_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn)?;
    let items = notifications::find_for_user(&conn, user.user_id)?;
    notifications::mark_all_read(&conn, user.user_id)?;
    render(NotificationListTemplate {
        ctx,
        notifications: items,
    })
}

pub async fn dismiss(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = current_user(&session)?;
    let conn = pool.get()?;
    notifications::dismiss(&conn, path.into_inner(), user.user_id)?;
    Ok(see_other("/notifications"))
}
