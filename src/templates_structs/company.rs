use askama::Template;

use super::PageContext;
use crate::models::certificate::Certificate;
use crate::models::company::Company;
use crate::models::item::Item;
use crate::models::rating::{Rating, RatingSummary};

/// Tabbed company profile: info, items, certificates, reviews.
#[derive(Template)]
#[template(path = "companies/profile.html")]
pub struct CompanyProfileTemplate {
    pub ctx: PageContext,
    pub company: Company,
    pub tab: String,
    pub items: Vec<Item>,
    pub certificates: Vec<Certificate>,
    pub reviews: Vec<Rating>,
    pub summary: RatingSummary,
    pub can_review: bool,
    pub review_errors: Vec<String>,
}
