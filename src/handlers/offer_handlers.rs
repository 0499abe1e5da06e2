use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::audit;
use crate::auth::csrf;
use crate::auth::session::{Role, flash, require_role};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::models::offer::{self, Offer};
use crate::models::request;
use crate::notifications;
use crate::templates_structs::{MyOffersTemplate, OfferReviewTemplate, PageContext};

#[derive(Deserialize)]
pub struct ReasonForm {
    #[serde(default)]
    pub reason: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn my_list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user = require_role(&session, Role::Seller)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn)?;
    let offers = offer::find_for_supplier(&conn, user.company_id)?;
    render(MyOffersTemplate { ctx, offers })
}

/// Load an offer for a buyer action and check the buyer owns the parent
/// request.
fn load_for_buyer(
    conn: &rusqlite::Connection,
    session: &Session,
    id: i64,
) -> Result<(Offer, request::Request, i64), AppError> {
    let user = require_role(session, Role::Buyer)?;
    let off = offer::find_by_id(conn, id)?.ok_or(AppError::NotFound)?;
    let req = request::find_by_id(conn, off.request_id)?.ok_or(AppError::NotFound)?;
    if req.buyer_company_id != user.company_id {
        return Err(AppError::PermissionDenied(
            "Offer belongs to another buyer's request".to_string(),
        ));
    }
    Ok((off, req, user.user_id))
}

/// Buyer review page for one offer. Stale offers bounce back to the request
/// with a flash instead of rendering the accept/reject actions.
pub async fn review(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let (off, req, _) = load_for_buyer(&conn, &session, path.into_inner())?;
    if !off.status.is_actionable() {
        flash(&session, "This offer is no longer pending");
        return Ok(see_other(&format!("/requests/{}", req.id)));
    }
    let ctx = PageContext::build(&session, &conn)?;
    render(OfferReviewTemplate {
        ctx,
        offer: off,
        request: req,
    })
}

pub async fn accept(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (off, req, user_id) = load_for_buyer(&conn, &session, path.into_inner())?;

    match offer::accept(&conn, &off) {
        Ok(order_id) => {
            let _ = notifications::push_for_company(
                &conn,
                off.supplier_company_id,
                "order",
                &format!("Your offer on \"{}\" was accepted", req.category),
            );
            let _ = audit::log(
                &conn,
                user_id,
                "offer.accept",
                "offer",
                off.id,
                json!({ "order_id": order_id }),
            );
            flash(&session, "Offer accepted, order created");
            Ok(see_other(&format!("/orders/{order_id}")))
        }
        Err(AppError::Validation(msg)) => {
            flash(&session, &msg);
            Ok(see_other(&format!("/requests/{}", req.id)))
        }
        Err(e) => Err(e),
    }
}

pub async fn reject(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<ReasonForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (off, req, user_id) = load_for_buyer(&conn, &session, path.into_inner())?;

    match offer::reject(&conn, &off, &form.reason) {
        Ok(()) => {
            let _ = notifications::push_for_company(
                &conn,
                off.supplier_company_id,
                "offer",
                &format!("Your offer on \"{}\" was rejected", req.category),
            );
            let _ = audit::log(
                &conn,
                user_id,
                "offer.reject",
                "offer",
                off.id,
                json!({ "reason": form.reason.trim() }),
            );
            flash(&session, "Offer rejected");
            Ok(see_other(&format!("/requests/{}", req.id)))
        }
        Err(AppError::Validation(msg)) => {
            flash(&session, &msg);
            Ok(see_other(&format!("/offers/{}", off.id)))
        }
        Err(e) => Err(e),
    }
}

/// Seller withdraws their own pending offer.
pub async fn cancel(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<ReasonForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_role(&session, Role::Seller)?;
    let conn = pool.get()?;
    let off = offer::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    if off.supplier_company_id != user.company_id {
        return Err(AppError::PermissionDenied(
            "Offer belongs to another supplier".to_string(),
        ));
    }

    match offer::cancel(&conn, &off, &form.reason) {
        Ok(()) => {
            let _ = audit::log(
                &conn,
                user.user_id,
                "offer.cancel",
                "offer",
                off.id,
                json!({ "reason": form.reason.trim() }),
            );
            flash(&session, "Offer withdrawn");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other("/offers"))
}
