use serde::Deserialize;

use crate::auth::validate::{validate_optional, validate_required};

/// A stored review. Either a simple company review (`overall_score` set) or
/// a structured order review (the five dimension fields set).
#[derive(Debug, Clone)]
pub struct Rating {
    pub id: i64,
    pub company_id: i64,
    pub rater_company_id: i64,
    pub rater_company_name: String,
    pub order_id: Option<i64>,
    pub overall_score: Option<i64>,
    pub quality: Option<i64>,
    pub delivery_speed: Option<i64>,
    pub communication: Option<i64>,
    pub price_fairness: Option<i64>,
    pub reliability: Option<i64>,
    pub comment: String,
    pub created_at: String,
}

impl Rating {
    pub fn is_structured(&self) -> bool {
        self.order_id.is_some()
    }

    /// Exact score of this review: the overall score, or the mean of the
    /// five dimensions for a structured review.
    pub fn score(&self) -> f64 {
        if let Some(overall) = self.overall_score {
            return overall as f64;
        }
        let dims = [
            self.quality,
            self.delivery_speed,
            self.communication,
            self.price_fairness,
            self.reliability,
        ];
        let set: Vec<i64> = dims.into_iter().flatten().collect();
        if set.is_empty() {
            0.0
        } else {
            set.iter().sum::<i64>() as f64 / set.len() as f64
        }
    }

    /// Filled stars for this review row: the exact score rounded.
    pub fn stars(&self) -> i64 {
        star_count(self.score())
    }
}

/// Round an average to the nearest whole star for the summary widget.
/// The numeric label keeps the exact value (3.6 shows 4 stars, label "3.6").
pub fn star_count(average: f64) -> i64 {
    average.round() as i64
}

/// Precomputed aggregate consumed read-only by profile and summary widgets.
#[derive(Debug, Clone, Copy)]
pub struct RatingSummary {
    pub average: f64,
    pub total: i64,
}

impl RatingSummary {
    pub fn stars(&self) -> i64 {
        star_count(self.average)
    }

    pub fn average_display(&self) -> String {
        if self.total == 0 {
            "—".to_string()
        } else {
            format!("{:.1}", self.average)
        }
    }
}

/// The five structured dimensions, each validated to 1-5.
#[derive(Debug, Clone, Copy)]
pub struct StructuredScores {
    pub quality: i64,
    pub delivery_speed: i64,
    pub communication: i64,
    pub price_fairness: i64,
    pub reliability: i64,
}

/// Form data for the order-completion review (five dimensions).
#[derive(Debug, Deserialize)]
pub struct OrderRatingForm {
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub delivery_speed: String,
    #[serde(default)]
    pub communication: String,
    #[serde(default)]
    pub price_fairness: String,
    #[serde(default)]
    pub reliability: String,
    #[serde(default)]
    pub comment: String,
    pub csrf_token: String,
}

impl OrderRatingForm {
    /// Blocked while any dimension is unset or outside 1-5.
    pub fn validate(&self) -> Result<(StructuredScores, String), Vec<String>> {
        let mut errors = Vec::new();

        let mut dim = |value: &str, name: &str| -> i64 {
            match value.trim().parse::<i64>() {
                Ok(v) if (1..=5).contains(&v) => v,
                _ => {
                    errors.push(format!("{name} rating must be between 1 and 5"));
                    0
                }
            }
        };
        let scores = StructuredScores {
            quality: dim(&self.quality, "Quality"),
            delivery_speed: dim(&self.delivery_speed, "Delivery speed"),
            communication: dim(&self.communication, "Communication"),
            price_fairness: dim(&self.price_fairness, "Price fairness"),
            reliability: dim(&self.reliability, "Reliability"),
        };

        if let Some(e) = validate_optional(&self.comment, "Comment", 1000) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok((scores, self.comment.trim().to_string()))
        } else {
            Err(errors)
        }
    }
}

/// Form data for the simple company review (single overall score).
#[derive(Debug, Deserialize)]
pub struct CompanyReviewForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comment: String,
    pub csrf_token: String,
}

impl CompanyReviewForm {
    /// Both the score and the comment are required.
    pub fn validate(&self) -> Result<(i64, String), Vec<String>> {
        let mut errors = Vec::new();

        let score = match self.rating.trim().parse::<i64>() {
            Ok(v) if (1..=5).contains(&v) => v,
            _ => {
                errors.push("Rating must be between 1 and 5".to_string());
                0
            }
        };
        if let Some(e) = validate_required(&self.comment, "Comment", 1000) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok((score, self.comment.trim().to_string()))
        } else {
            Err(errors)
        }
    }
}
