use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::audit;
use crate::auth::csrf;
use crate::auth::session::{current_user, flash};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::see_other;
use crate::models::rating::{self, CompanyReviewForm};
use crate::models::{certificate, company, item};
use crate::notifications;
use crate::templates_structs::{CompanyProfileTemplate, PageContext};

const TABS: &[&str] = &["info", "items", "certificates", "reviews"];

#[derive(Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub tab: String,
    #[serde(default)]
    pub category: String,
}

fn profile_page(
    conn: &rusqlite::Connection,
    session: &Session,
    company_id: i64,
    tab: &str,
    category: Option<&str>,
    review_errors: Vec<String>,
) -> Result<CompanyProfileTemplate, AppError> {
    let user = current_user(session)?;
    let comp = company::find_by_id(conn, company_id)?.ok_or(AppError::NotFound)?;

    let tab = if TABS.contains(&tab) { tab } else { "info" };
    let items = item::find_for_company(conn, company_id, category)?;
    let certificates = certificate::find_for_company(conn, company_id)?;
    let reviews = rating::find_for_company(conn, company_id)?;
    let summary = rating::summary_for_company(conn, company_id)?;

    let ctx = PageContext::build(session, conn)?;
    Ok(CompanyProfileTemplate {
        ctx,
        company: comp,
        tab: tab.to_string(),
        items,
        certificates,
        reviews,
        summary,
        can_review: user.company_id != company_id,
        review_errors,
    })
}

pub async fn profile(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    query: web::Query<ProfileQuery>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let category = Some(query.category.trim()).filter(|c| !c.is_empty());
    let tmpl = profile_page(
        &conn,
        &session,
        path.into_inner(),
        &query.tab,
        category,
        Vec::new(),
    )?;
    render(tmpl)
}

/// Simple one-score company review, posted from the profile reviews tab.
pub async fn review_create(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CompanyReviewForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = current_user(&session)?;
    let conn = pool.get()?;
    let company_id = path.into_inner();

    if user.company_id == company_id {
        return Err(AppError::PermissionDenied(
            "You cannot review your own company".to_string(),
        ));
    }
    // Reviewed company must exist before any insert
    company::find_by_id(&conn, company_id)?.ok_or(AppError::NotFound)?;

    let (score, comment) = match form.validate() {
        Ok(parsed) => parsed,
        Err(errors) => {
            let tmpl = profile_page(&conn, &session, company_id, "reviews", None, errors)?;
            return render(tmpl);
        }
    };

    let rating_id = rating::create_for_company(&conn, company_id, user.company_id, score, &comment)?;
    let _ = notifications::push_for_company(
        &conn,
        company_id,
        "rating",
        "Your company received a new review",
    );
    let _ = audit::log(
        &conn,
        user.user_id,
        "rating.company",
        "company",
        company_id,
        json!({ "rating_id": rating_id, "score": score }),
    );
    flash(&session, "Review submitted");
    Ok(see_other(&format!("/companies/{company_id}?tab=reviews")))
}
