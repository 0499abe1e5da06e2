use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::auth::session;

/// Gate for the protected scope. Anonymous callers are sent to the login
/// page instead of the handler.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if session::get_user_id(&req.get_session()).is_none() {
        let redirect = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(redirect).map_into_right_body());
    }
    next.call(req).await.map(|res| res.map_into_left_body())
}
