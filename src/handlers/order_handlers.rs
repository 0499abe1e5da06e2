use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::audit;
use crate::auth::csrf;
use crate::auth::session::{CurrentUser, Role, current_user, flash};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::models::order::{self, Order};
use crate::models::rating;
use crate::notifications;
use crate::templates_structs::{OrderDetailTemplate, OrderListTemplate, PageContext};
use crate::uploads::{self, UploadRules, storage};
use crate::workflow::OrderStatus;

#[derive(Deserialize)]
pub struct StatusForm {
    pub target: String,
    #[serde(default)]
    pub reason: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(MultipartForm)]
pub struct PaymentDocumentForm {
    #[multipart(limit = "10MB")]
    pub payment_document: Vec<TempFile>,
    pub csrf_token: Text<String>,
}

#[derive(MultipartForm)]
pub struct TtnDocumentForm {
    #[multipart(limit = "10MB")]
    pub ttn_document: Vec<TempFile>,
    pub csrf_token: Text<String>,
}

#[derive(MultipartForm)]
pub struct DeliveryPhotosForm {
    #[multipart(limit = "20MB")]
    pub delivery_photos: Vec<TempFile>,
    pub csrf_token: Text<String>,
}

/// Load an order and verify the caller is one of its parties.
fn load_for_party(
    conn: &rusqlite::Connection,
    session: &Session,
    id: i64,
) -> Result<(Order, CurrentUser, Role), AppError> {
    let user = current_user(session)?;
    let ord = order::find_by_id(conn, id)?.ok_or(AppError::NotFound)?;
    let side = ord.party_of(user.company_id).ok_or_else(|| {
        AppError::PermissionDenied("Not a party to this order".to_string())
    })?;
    Ok((ord, user, side))
}

fn counterparty(order: &Order, company_id: i64) -> i64 {
    if order.buyer_company_id == company_id {
        order.supplier_company_id
    } else {
        order.buyer_company_id
    }
}

fn notify_counterparty(
    conn: &rusqlite::Connection,
    order: &Order,
    company_id: i64,
    message: &str,
) {
    let _ = notifications::push_for_company(
        conn,
        counterparty(order, company_id),
        "order",
        message,
    );
}

pub async fn list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user = current_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn)?;
    let orders = order::find_for_company(&conn, user.company_id)?;
    render(OrderListTemplate { ctx, orders })
}

pub async fn detail(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    let photos = order::photos(&conn, ord.id)?;
    let transitions = ord.available_transitions();
    let already_rated = rating::exists_for_order(&conn, ord.id, user.company_id)?;
    let ctx = PageContext::build(&session, &conn)?;
    render(OrderDetailTemplate {
        ctx,
        order: ord,
        photos,
        transitions,
        viewer_side: side,
        already_rated,
    })
}

/// Generic transition picker. The target must be a legal step out of the
/// current status for the order's payment method; cancelling needs a reason.
pub async fn update_status(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, _) = load_for_party(&conn, &session, path.into_inner())?;

    let target = OrderStatus::parse(&form.target)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", form.target)))?;

    match order::apply_transition(&conn, &ord, target, Some(&form.reason)) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Order #{} moved to {}", ord.id, target.label()),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.status",
                "order",
                ord.id,
                json!({ "from": ord.status.code(), "to": target.code() }),
            );
            flash(&session, &format!("Order moved to {}", target.label()));
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}

/// Validate an uploaded file set against its rules and store each accepted
/// file under the rule's form field name. Returns the stored paths, or a
/// user-facing message on violation.
fn store_uploads(
    files: &[TempFile],
    rules: &UploadRules,
) -> Result<Result<Vec<String>, String>, AppError> {
    let meta = uploads::file_meta(files);
    if let Err(msg) = rules.validate(&meta) {
        return Ok(Err(msg));
    }
    let mut paths = Vec::new();
    for (file, info) in files.iter().zip(&meta) {
        paths.push(storage::store(file.file.path(), &info.filename, rules.field)?);
    }
    Ok(Ok(paths))
}

/// Buyer confirms a bank transfer with the payment document.
pub async fn confirm_payment(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    MultipartForm(form): MultipartForm<PaymentDocumentForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    if !side.is_buyer() {
        return Err(AppError::PermissionDenied(
            "Only the buyer confirms payment".to_string(),
        ));
    }

    let stored = match store_uploads(&form.payment_document, &uploads::PAYMENT_DOCUMENT)? {
        Ok(paths) => paths,
        Err(msg) => {
            flash(&session, &msg);
            return Ok(see_other(&format!("/orders/{}", ord.id)));
        }
    };

    match order::confirm_payment(&conn, &ord, &stored[0]) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Payment confirmed for order #{}", ord.id),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.confirm_payment",
                "order",
                ord.id,
                json!({ "document": stored[0] }),
            );
            flash(&session, "Payment confirmed");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}

/// Buyer submits the cash receipt photo. The seller still has to confirm.
pub async fn submit_cash_receipt(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    MultipartForm(form): MultipartForm<PaymentDocumentForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    if !side.is_buyer() {
        return Err(AppError::PermissionDenied(
            "Only the buyer submits the receipt".to_string(),
        ));
    }

    let stored = match store_uploads(&form.payment_document, &uploads::CASH_RECEIPT)? {
        Ok(paths) => paths,
        Err(msg) => {
            flash(&session, &msg);
            return Ok(see_other(&format!("/orders/{}", ord.id)));
        }
    };

    match order::submit_cash_receipt(&conn, &ord, &stored[0]) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Cash receipt submitted for order #{}", ord.id),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.cash_receipt",
                "order",
                ord.id,
                json!({ "document": stored[0] }),
            );
            flash(&session, "Receipt submitted, awaiting seller confirmation");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}

/// Seller confirms the cash payment was received. No file involved.
pub async fn confirm_cash(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    if !side.is_seller() {
        return Err(AppError::PermissionDenied(
            "Only the seller confirms cash receipt".to_string(),
        ));
    }

    match order::confirm_cash_payment(&conn, &ord) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Cash payment confirmed for order #{}", ord.id),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.confirm_cash",
                "order",
                ord.id,
                json!({}),
            );
            flash(&session, "Cash payment confirmed");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}

pub async fn start_production(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    if !side.is_seller() {
        return Err(AppError::PermissionDenied(
            "Only the seller starts production".to_string(),
        ));
    }

    match order::start_production(&conn, &ord) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Production started for order #{}", ord.id),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.start_production",
                "order",
                ord.id,
                json!({}),
            );
            flash(&session, "Production started");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}

/// Seller ships the goods; the TTN waybill is mandatory.
pub async fn ship(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    MultipartForm(form): MultipartForm<TtnDocumentForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    if !side.is_seller() {
        return Err(AppError::PermissionDenied(
            "Only the seller ships the order".to_string(),
        ));
    }

    let stored = match store_uploads(&form.ttn_document, &uploads::TTN_DOCUMENT)? {
        Ok(paths) => paths,
        Err(msg) => {
            flash(&session, &msg);
            return Ok(see_other(&format!("/orders/{}", ord.id)));
        }
    };

    match order::ship(&conn, &ord, &stored[0]) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Order #{} is in transit", ord.id),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.ship",
                "order",
                ord.id,
                json!({ "ttn": stored[0] }),
            );
            flash(&session, "Shipment registered");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}

pub async fn mark_delivered(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    if !side.is_seller() {
        return Err(AppError::PermissionDenied(
            "Only the seller marks delivery".to_string(),
        ));
    }

    match order::mark_delivered(&conn, &ord) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Order #{} was delivered", ord.id),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.delivered",
                "order",
                ord.id,
                json!({}),
            );
            flash(&session, "Marked as delivered");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}

/// Buyer confirms delivery with photos; this completes the order.
pub async fn confirm_delivery(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    MultipartForm(form): MultipartForm<DeliveryPhotosForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let conn = pool.get()?;
    let (ord, user, side) = load_for_party(&conn, &session, path.into_inner())?;
    if !side.is_buyer() {
        return Err(AppError::PermissionDenied(
            "Only the buyer confirms delivery".to_string(),
        ));
    }
    if !ord.can_confirm_delivery() {
        flash(&session, "Order is not awaiting delivery confirmation");
        return Ok(see_other(&format!("/orders/{}", ord.id)));
    }

    let stored = match store_uploads(&form.delivery_photos, &uploads::DELIVERY_PHOTOS)? {
        Ok(paths) => paths,
        Err(msg) => {
            flash(&session, &msg);
            return Ok(see_other(&format!("/orders/{}", ord.id)));
        }
    };

    match order::confirm_delivery(&conn, &ord, &stored) {
        Ok(()) => {
            notify_counterparty(
                &conn,
                &ord,
                user.company_id,
                &format!("Order #{} completed", ord.id),
            );
            let _ = audit::log(
                &conn,
                user.user_id,
                "order.complete",
                "order",
                ord.id,
                json!({ "photos": stored.len() }),
            );
            flash(&session, "Delivery confirmed, order completed");
        }
        Err(AppError::Validation(msg)) => flash(&session, &msg),
        Err(e) => return Err(e),
    }
    Ok(see_other(&format!("/orders/{}", ord.id)))
}
