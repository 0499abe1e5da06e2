use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::audit;
use crate::auth::csrf;
use crate::auth::session::{Role, current_user, flash, require_role};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::models::request::{
    self, BrowseTab, NewRequest, Request, RequestForm, is_eligible_for_offer,
};
use crate::models::{offer, offer::OfferForm};
use crate::notifications;
use crate::templates_structs::{
    BrowseRequestsTemplate, MyRequestsTemplate, PageContext, RequestDetailTemplate,
    RequestFormTemplate,
};

#[derive(Deserialize)]
pub struct TabQuery {
    #[serde(default)]
    pub tab: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Seller request browser. All rows are fetched once; the tab is a pure
/// filter over the annotated collection.
pub async fn browse(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<TabQuery>,
) -> Result<HttpResponse, AppError> {
    let user = require_role(&session, Role::Seller)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn)?;

    let tab = BrowseTab::parse(&query.tab);
    let rows = request::find_for_browsing(&conn, user.company_id)?
        .into_iter()
        .filter(|row| tab.matches(row))
        .collect();

    render(BrowseRequestsTemplate { ctx, tab, rows })
}

pub async fn my_list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user = require_role(&session, Role::Buyer)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn)?;
    let requests = request::find_for_buyer(&conn, user.company_id)?;
    render(MyRequestsTemplate { ctx, requests })
}

pub async fn new_form(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    require_role(&session, Role::Buyer)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn)?;
    render(RequestFormTemplate {
        ctx,
        errors: Vec::new(),
    })
}

pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<RequestForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_role(&session, Role::Buyer)?;
    let conn = pool.get()?;

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn)?;
        return render(RequestFormTemplate { ctx, errors });
    }

    let id = request::create(
        &conn,
        &NewRequest {
            buyer_company_id: user.company_id,
            category: form.category.trim(),
            description: form.description.trim(),
            quantity: form.quantity.trim().parse().unwrap_or(1),
            budget_from: form.budget_from.trim().parse().ok(),
            budget_to: form.budget_to.trim().parse().ok(),
            deadline_date: form.deadline_date.trim(),
            payment_type: form.payment_type.trim(),
        },
    )?;
    let _ = audit::log(
        &conn,
        user.user_id,
        "request.create",
        "request",
        id,
        json!({ "category": form.category.trim() }),
    );
    flash(&session, "Request published");
    Ok(see_other(&format!("/requests/{id}")))
}

/// Buyer withdraws their own open request.
pub async fn cancel(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_role(&session, Role::Buyer)?;
    let conn = pool.get()?;
    let id = path.into_inner();

    let req = request::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    if req.buyer_company_id != user.company_id {
        return Err(AppError::PermissionDenied(
            "Not the owner of this request".to_string(),
        ));
    }

    match request::cancel(&conn, &req) {
        Ok(()) => {
            let _ = audit::log(
                &conn,
                user.user_id,
                "request.cancel",
                "request",
                id,
                json!({ "category": req.category }),
            );
            flash(&session, "Request cancelled");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/requests/{id}")))
}

/// Load a request and decide what the viewer may see: buyers see their own
/// requests with every offer; sellers see any request with only their own
/// offers and, while eligible, the offer form.
fn detail_page(
    conn: &rusqlite::Connection,
    session: &Session,
    id: i64,
    offer_errors: Vec<String>,
) -> Result<(RequestDetailTemplate, Request), AppError> {
    let user = current_user(session)?;
    let req = request::find_by_id(conn, id)?.ok_or(AppError::NotFound)?;

    let (offers, can_offer) = match user.role {
        Role::Buyer => {
            if req.buyer_company_id != user.company_id {
                return Err(AppError::PermissionDenied(
                    "Not the owner of this request".to_string(),
                ));
            }
            (offer::find_for_request(conn, id)?, false)
        }
        Role::Seller => {
            let mine: Vec<_> = offer::find_for_request(conn, id)?
                .into_iter()
                .filter(|o| o.supplier_company_id == user.company_id)
                .collect();
            let latest = mine.first().map(|o| o.status);
            let can_offer = is_eligible_for_offer(req.status, latest);
            (mine, can_offer)
        }
    };

    let ctx = PageContext::build(session, conn)?;
    let tmpl = RequestDetailTemplate {
        ctx,
        request: req.clone(),
        offers,
        can_offer,
        offer_errors,
    };
    Ok((tmpl, req))
}

pub async fn detail(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let (tmpl, _) = detail_page(&conn, &session, path.into_inner(), Vec::new())?;
    render(tmpl)
}

/// Seller submits an offer against an open request.
pub async fn offer_create(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<OfferForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_role(&session, Role::Seller)?;
    let conn = pool.get()?;
    let request_id = path.into_inner();

    let req = request::find_by_id(&conn, request_id)?.ok_or(AppError::NotFound)?;
    let latest = offer::find_for_request(&conn, request_id)?
        .into_iter()
        .find(|o| o.supplier_company_id == user.company_id)
        .map(|o| o.status);
    if !is_eligible_for_offer(req.status, latest) {
        flash(&session, "You cannot submit an offer on this request");
        return Ok(see_other(&format!("/requests/{request_id}")));
    }

    let values = match form.validate() {
        Ok(values) => values,
        Err(errors) => {
            let (tmpl, _) = detail_page(&conn, &session, request_id, errors)?;
            return render(tmpl);
        }
    };

    let offer_id = offer::create(&conn, request_id, user.company_id, &values)?;
    let _ = notifications::push_for_company(
        &conn,
        req.buyer_company_id,
        "offer",
        &format!("New offer on your request \"{}\"", req.category),
    );
    let _ = audit::log(
        &conn,
        user.user_id,
        "offer.create",
        "offer",
        offer_id,
        json!({ "request_id": request_id, "price": values.price }),
    );
    flash(&session, "Offer submitted");
    Ok(see_other(&format!("/requests/{request_id}")))
}
