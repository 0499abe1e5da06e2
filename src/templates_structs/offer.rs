use askama::Template;

use super::PageContext;
use crate::models::offer::{MyOffer, Offer};
use crate::models::request::Request;

/// Buyer review page for a single pending offer.
#[derive(Template)]
#[template(path = "offers/review.html")]
pub struct OfferReviewTemplate {
    pub ctx: PageContext,
    pub offer: Offer,
    pub request: Request,
}

#[derive(Template)]
#[template(path = "offers/my.html")]
pub struct MyOffersTemplate {
    pub ctx: PageContext,
    pub offers: Vec<MyOffer>,
}
