use serde::Deserialize;

use crate::auth::validate::{
    validate_int_range, validate_optional, validate_positive_decimal, validate_positive_int,
};
use crate::workflow::OfferStatus;

/// A supplier offer as loaded for the request detail and review pages.
#[derive(Debug, Clone)]
pub struct Offer {
    pub id: i64,
    pub request_id: i64,
    pub supplier_company_id: i64,
    pub supplier_company_name: String,
    pub price: f64,
    pub eta_days: i64,
    pub delivery_included: bool,
    pub payment_terms: String,
    pub warranty_months: Option<i64>,
    pub special_conditions: String,
    pub comment: String,
    pub status: OfferStatus,
    pub rejection_reason: Option<String>,
    pub created_at: String,
}

/// An offer row in the seller's "my offers" list, with request context.
#[derive(Debug, Clone)]
pub struct MyOffer {
    pub offer: Offer,
    pub request_category: String,
    pub buyer_company_name: String,
}

/// Form data for submitting an offer against a request.
#[derive(Debug, Deserialize)]
pub struct OfferForm {
    pub price: String,
    pub eta_days: String,
    #[serde(default)]
    pub delivery_included: Option<String>,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub warranty_months: String,
    #[serde(default)]
    pub special_conditions: String,
    #[serde(default)]
    pub comment: String,
    pub csrf_token: String,
}

/// Parsed and validated offer fields ready for insertion.
#[derive(Debug)]
pub struct OfferValues {
    pub price: f64,
    pub eta_days: i64,
    pub delivery_included: bool,
    pub payment_terms: String,
    pub warranty_months: Option<i64>,
    pub special_conditions: String,
    pub comment: String,
}

impl OfferForm {
    /// Price and delivery days are required and strictly positive; warranty
    /// is an optional 0-120 month range; free-text fields are bounded only.
    pub fn validate(&self) -> Result<OfferValues, Vec<String>> {
        let mut errors = Vec::new();
        if let Some(e) = validate_positive_decimal(&self.price, "Price") {
            errors.push(e);
        }
        if let Some(e) = validate_positive_int(&self.eta_days, "Delivery days") {
            errors.push(e);
        }
        if let Some(e) = validate_int_range(&self.warranty_months, "Warranty period", 0, 120) {
            errors.push(e);
        }
        if let Some(e) = validate_optional(&self.payment_terms, "Payment terms", 200) {
            errors.push(e);
        }
        if let Some(e) = validate_optional(&self.special_conditions, "Special conditions", 1000) {
            errors.push(e);
        }
        if let Some(e) = validate_optional(&self.comment, "Comment", 1000) {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(OfferValues {
            price: self.price.trim().parse().unwrap_or(0.0),
            eta_days: self.eta_days.trim().parse().unwrap_or(0),
            delivery_included: self.delivery_included.is_some(),
            payment_terms: self.payment_terms.trim().to_string(),
            warranty_months: self.warranty_months.trim().parse().ok(),
            special_conditions: self.special_conditions.trim().to_string(),
            comment: self.comment.trim().to_string(),
        })
    }
}
