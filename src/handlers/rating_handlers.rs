use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::audit;
use crate::auth::csrf;
use crate::auth::session::{CurrentUser, current_user, flash};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::models::order::{self, Order};
use crate::models::rating::{self, OrderRatingForm};
use crate::notifications;
use crate::templates_structs::{OrderRateTemplate, PageContext};

/// Load a completed order the caller may review: they must be a party and
/// must not have reviewed it yet. The already-reviewed check is a fresh read.
fn load_for_review(
    conn: &rusqlite::Connection,
    session: &Session,
    id: i64,
) -> Result<Result<(Order, CurrentUser), String>, AppError> {
    let user = current_user(session)?;
    let ord = order::find_by_id(conn, id)?.ok_or(AppError::NotFound)?;
    if ord.party_of(user.company_id).is_none() {
        return Err(AppError::PermissionDenied(
            "Not a party to this order".to_string(),
        ));
    }
    if !ord.is_completed() {
        return Ok(Err("Only completed orders can be reviewed".to_string()));
    }
    if rating::exists_for_order(conn, ord.id, user.company_id)? {
        return Ok(Err("You have already reviewed this order".to_string()));
    }
    Ok(Ok((ord, user)))
}

pub async fn form(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let id = path.into_inner();
    let (ord, _) = match load_for_review(&conn, &session, id)? {
        Ok(loaded) => loaded,
        Err(msg) => {
            flash(&session, &msg);
            return Ok(see_other(&format!("/orders/{id}")));
        }
    };
    let ctx = PageContext::build(&session, &conn)?;
    render(OrderRateTemplate {
        ctx,
        order: ord,
        errors: Vec::new(),
    })
}

pub async fn submit(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    web_form: web::Form<OrderRatingForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &web_form.csrf_token)?;
    let conn = pool.get()?;
    let id = path.into_inner();
    let (ord, user) = match load_for_review(&conn, &session, id)? {
        Ok(loaded) => loaded,
        Err(msg) => {
            flash(&session, &msg);
            return Ok(see_other(&format!("/orders/{id}")));
        }
    };

    let (scores, comment) = match web_form.validate() {
        Ok(parsed) => parsed,
        Err(errors) => {
            let ctx = PageContext::build(&session, &conn)?;
            return render(OrderRateTemplate {
                ctx,
                order: ord,
                errors,
            });
        }
    };

    // The counterparty receives the review.
    let rated_company = if ord.buyer_company_id == user.company_id {
        ord.supplier_company_id
    } else {
        ord.buyer_company_id
    };
    let rating_id =
        rating::create_for_order(&conn, ord.id, rated_company, user.company_id, &scores, &comment)?;
    let _ = notifications::push_for_company(
        &conn,
        rated_company,
        "rating",
        &format!("You received a review on order #{}", ord.id),
    );
    let _ = audit::log(
        &conn,
        user.user_id,
        "rating.create",
        "rating",
        rating_id,
        json!({ "order_id": ord.id }),
    );
    flash(&session, "Review submitted");
    Ok(see_other(&format!("/orders/{}", ord.id)))
}
