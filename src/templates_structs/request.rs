use askama::Template;

use super::PageContext;
use crate::models::offer::Offer;
use crate::models::request::{BrowseRequest, BrowseTab, Request};

/// Seller-facing request browser with tab filtering.
#[derive(Template)]
#[template(path = "requests/browse.html")]
pub struct BrowseRequestsTemplate {
    pub ctx: PageContext,
    pub tab: BrowseTab,
    pub rows: Vec<BrowseRequest>,
}

#[derive(Template)]
#[template(path = "requests/my.html")]
pub struct MyRequestsTemplate {
    pub ctx: PageContext,
    pub requests: Vec<Request>,
}

#[derive(Template)]
#[template(path = "requests/form.html")]
pub struct RequestFormTemplate {
    pub ctx: PageContext,
    pub errors: Vec<String>,
}

/// Request detail for both roles. Sellers additionally get the offer form
/// when they are still eligible to bid.
#[derive(Template)]
#[template(path = "requests/detail.html")]
pub struct RequestDetailTemplate {
    pub ctx: PageContext,
    pub request: Request,
    pub offers: Vec<Offer>,
    pub can_offer: bool,
    pub offer_errors: Vec<String>,
}
