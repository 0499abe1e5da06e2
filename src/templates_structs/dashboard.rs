use askama::Template;

use super::PageContext;
use crate::audit::AuditEntry;
use crate::models::rating::RatingSummary;

/// Role-dependent counters for the dashboard cards.
pub struct DashboardStats {
    pub open_requests: i64,
    pub pending_offers: i64,
    pub active_orders: i64,
    pub completed_orders: i64,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub stats: DashboardStats,
    pub rating: RatingSummary,
    pub recent: Vec<AuditEntry>,
}
