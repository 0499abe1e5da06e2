use serde::{Deserialize, Serialize};

/// Lifecycle of a buyer request (RFQ). Set server-side; the pages only
/// decide what to render from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Open,
    Closed,
    Cancelled,
    Expired,
}

impl RequestStatus {
    /// Parse a stored status code. Accepts the canonical codes plus the
    /// legacy Uzbek tokens the original backend emitted.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "open" | "ochiq" => Some(RequestStatus::Open),
            "closed" | "yopilgan" => Some(RequestStatus::Closed),
            "cancelled" | "bekor_qilingan" => Some(RequestStatus::Cancelled),
            "expired" | "muddati_otgan" => Some(RequestStatus::Expired),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Closed => "closed",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Expired => "expired",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Open => "Open",
            RequestStatus::Closed => "Closed",
            RequestStatus::Cancelled => "Cancelled",
            RequestStatus::Expired => "Expired",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            RequestStatus::Open => "badge-green",
            RequestStatus::Closed => "badge-gray",
            RequestStatus::Cancelled => "badge-red",
            RequestStatus::Expired => "badge-yellow",
        }
    }

    /// Whether new offers may still be submitted against the request.
    pub fn accepts_offers(self) -> bool {
        matches!(self, RequestStatus::Open)
    }
}

/// Lifecycle of a supplier offer against a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Expired,
}

impl OfferStatus {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "pending" | "kutilmoqda" => Some(OfferStatus::Pending),
            "accepted" | "qabul_qilingan" => Some(OfferStatus::Accepted),
            "rejected" | "rad_etilgan" => Some(OfferStatus::Rejected),
            "cancelled" | "bekor_qilingan" => Some(OfferStatus::Cancelled),
            "expired" | "muddati_otgan" => Some(OfferStatus::Expired),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Cancelled => "cancelled",
            OfferStatus::Expired => "expired",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OfferStatus::Pending => "Pending",
            OfferStatus::Accepted => "Accepted",
            OfferStatus::Rejected => "Rejected",
            OfferStatus::Cancelled => "Cancelled",
            OfferStatus::Expired => "Expired",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            OfferStatus::Pending => "badge-blue",
            OfferStatus::Accepted => "badge-green",
            OfferStatus::Rejected => "badge-red",
            OfferStatus::Cancelled => "badge-gray",
            OfferStatus::Expired => "badge-yellow",
        }
    }

    /// Accept/reject/cancel are only legal while the offer is pending.
    pub fn is_actionable(self) -> bool {
        matches!(self, OfferStatus::Pending)
    }
}

/// How an order is paid. Stored as an explicit column on the order,
/// classified exactly once when the accepted offer spawns the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Bank,
    Cash,
    Other,
}

impl PaymentMethod {
    /// Classify a free-text payment type from the originating request.
    /// "bank" wins over cash tokens when both appear.
    pub fn classify(payment_type: &str) -> Self {
        let lower = payment_type.to_lowercase();
        if lower.contains("bank") {
            PaymentMethod::Bank
        } else if lower.contains("naqd_pul") || lower.contains("naqd pul") || lower.contains("cash")
        {
            PaymentMethod::Cash
        } else {
            PaymentMethod::Other
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "bank" => Some(PaymentMethod::Bank),
            "cash" | "naqd_pul" => Some(PaymentMethod::Cash),
            "other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            PaymentMethod::Bank => "bank",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Bank => "Bank transfer",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Other => "Other",
        }
    }

    pub fn is_bank(self) -> bool {
        matches!(self, PaymentMethod::Bank)
    }

    pub fn is_cash(self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}
