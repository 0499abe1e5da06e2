// Template context structures for Askama templates, organized by domain.
// All types are re-exported: `use savdo::templates_structs::*`

use actix_session::Session;
use rusqlite::Connection;

use crate::auth::csrf;
use crate::auth::session::{CurrentUser, Role, current_user, take_flash};
use crate::errors::AppError;
use crate::notifications;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.company_name`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub role: Role,
    pub company_id: i64,
    pub company_name: String,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
    pub notification_count: i64,
}

impl PageContext {
    pub fn build(session: &Session, conn: &Connection) -> Result<Self, AppError> {
        let user: CurrentUser = current_user(session)?;
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        let company_name = crate::models::company::get_name(conn, user.company_id)?;
        let notification_count = notifications::count_unread(conn, user.user_id);
        let avatar_initial = user
            .username
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string();
        Ok(Self {
            username: user.username,
            avatar_initial,
            role: user.role,
            company_id: user.company_id,
            company_name,
            flash,
            app_name: "Savdo".to_string(),
            csrf_token,
            notification_count,
        })
    }
}

mod audit;
mod common;
mod company;
mod dashboard;
mod notification;
mod offer;
mod order;
mod request;

pub use self::audit::AuditListTemplate;
pub use self::common::LoginTemplate;
pub use self::company::CompanyProfileTemplate;
pub use self::dashboard::{DashboardStats, DashboardTemplate};
pub use self::notification::NotificationListTemplate;
pub use self::offer::{MyOffersTemplate, OfferReviewTemplate};
pub use self::order::{OrderDetailTemplate, OrderListTemplate, OrderRateTemplate};
pub use self::request::{
    BrowseRequestsTemplate, MyRequestsTemplate, RequestDetailTemplate, RequestFormTemplate,
};
