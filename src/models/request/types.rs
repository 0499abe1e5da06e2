use serde::Deserialize;

use crate::auth::validate::{
    validate_optional, validate_positive_int, validate_required,
};
use crate::workflow::{OfferStatus, RequestStatus};

/// A buyer request (RFQ) as loaded for list and detail pages.
#[derive(Debug, Clone)]
pub struct Request {
    pub id: i64,
    pub buyer_company_id: i64,
    pub buyer_company_name: String,
    pub category: String,
    pub description: String,
    pub quantity: i64,
    pub budget_from: Option<f64>,
    pub budget_to: Option<f64>,
    pub deadline_date: String,
    pub payment_type: String,
    pub status: RequestStatus,
    pub created_at: String,
}

/// A request row in the seller browsing list, annotated with the status of
/// the seller's most recent offer on it (if any).
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    pub request: Request,
    pub my_offer_status: Option<OfferStatus>,
}

impl BrowseRequest {
    /// A seller may submit a new offer only while the request is open and
    /// they have no live offer on it (none yet, or the last one was rejected).
    pub fn eligible_for_offer(&self) -> bool {
        is_eligible_for_offer(self.request.status, self.my_offer_status)
    }
}

pub fn is_eligible_for_offer(status: RequestStatus, my_latest: Option<OfferStatus>) -> bool {
    status.accepts_offers() && my_latest.is_none_or(|s| s == OfferStatus::Rejected)
}

/// Browsing tabs for the seller request list. A pure predicate over the
/// already-fetched collection; switching tabs does not refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseTab {
    All,
    Eligible,
    Offered,
}

impl BrowseTab {
    pub fn parse(token: &str) -> Self {
        match token {
            "eligible" => BrowseTab::Eligible,
            "offered" => BrowseTab::Offered,
            _ => BrowseTab::All,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            BrowseTab::All => "all",
            BrowseTab::Eligible => "eligible",
            BrowseTab::Offered => "offered",
        }
    }

    pub fn matches(self, row: &BrowseRequest) -> bool {
        match self {
            BrowseTab::All => true,
            BrowseTab::Eligible => row.eligible_for_offer(),
            BrowseTab::Offered => row.my_offer_status.is_some(),
        }
    }
}

/// Form data for creating a request.
#[derive(Debug, Deserialize)]
pub struct RequestForm {
    pub category: String,
    pub description: String,
    pub quantity: String,
    pub budget_from: String,
    pub budget_to: String,
    pub deadline_date: String,
    pub payment_type: String,
    pub csrf_token: String,
}

impl RequestForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(e) = validate_required(&self.category, "Category", 200) {
            errors.push(e);
        }
        if let Some(e) = validate_optional(&self.description, "Description", 2000) {
            errors.push(e);
        }
        if let Some(e) = validate_positive_int(&self.quantity, "Quantity") {
            errors.push(e);
        }
        for (value, name) in [
            (&self.budget_from, "Budget from"),
            (&self.budget_to, "Budget to"),
        ] {
            let trimmed = value.trim();
            if !trimmed.is_empty() && trimmed.parse::<f64>().is_err() {
                errors.push(format!("{name} must be a number"));
            }
        }
        if let Some(e) = validate_required(&self.deadline_date, "Deadline date", 50) {
            errors.push(e);
        }
        if let Some(e) = validate_required(&self.payment_type, "Payment type", 100) {
            errors.push(e);
        }
        errors
    }
}
