use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::audit;
use crate::auth::session::current_user;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::templates_structs::{AuditListTemplate, PageContext};

pub async fn list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    current_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn)?;
    let entries = audit::find_recent(&conn, 100)?;
    render(AuditListTemplate { ctx, entries })
}
