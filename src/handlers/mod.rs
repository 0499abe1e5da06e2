pub mod audit_handlers;
pub mod auth_handlers;
pub mod company_handlers;
pub mod dashboard;
pub mod notification_handlers;
pub mod offer_handlers;
pub mod order_handlers;
pub mod rating_handlers;
pub mod request_handlers;

use actix_web::HttpResponse;

/// 303 redirect issued after every successful POST.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
