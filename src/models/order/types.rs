use crate::auth::session::Role;
use crate::workflow::{OrderStatus, PaymentMethod, Transition};

/// An order as loaded for list and detail pages.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub request_id: i64,
    pub offer_id: i64,
    pub buyer_company_id: i64,
    pub supplier_company_id: i64,
    pub buyer_company_name: String,
    pub supplier_company_name: String,
    pub total_amount: f64,
    pub payment_terms: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub cancel_reason: Option<String>,
    pub payment_document_path: Option<String>,
    pub ttn_document_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct OrderPhoto {
    pub id: i64,
    pub path: String,
    pub created_at: String,
}

impl Order {
    /// Legal next steps out of the current status, resolved for this order's
    /// payment method. Drives the transition picker.
    pub fn available_transitions(&self) -> Vec<Transition> {
        self.status.transitions_for(self.payment_method)
    }

    /// Which side of the deal a company is on, if any.
    pub fn party_of(&self, company_id: i64) -> Option<Role> {
        if company_id == self.buyer_company_id {
            Some(Role::Buyer)
        } else if company_id == self.supplier_company_id {
            Some(Role::Seller)
        } else {
            None
        }
    }

    // Action-panel gates. The detail page renders a panel only when the
    // matching gate holds; the handlers re-check before mutating.

    pub fn awaits_bank_payment(&self) -> bool {
        self.status == OrderStatus::PaymentPending && self.payment_method.is_bank()
    }

    pub fn awaits_cash_receipt(&self) -> bool {
        self.status == OrderStatus::PaymentPending && self.payment_method.is_cash()
    }

    pub fn awaits_cash_confirmation(&self) -> bool {
        self.status == OrderStatus::CashPaymentPending
    }

    pub fn can_start_production(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::PaymentDone | OrderStatus::CashPaymentDone
        )
    }

    pub fn can_ship(&self) -> bool {
        self.status == OrderStatus::Collecting
    }

    pub fn can_mark_delivered(&self) -> bool {
        self.status == OrderStatus::InTransit
    }

    pub fn can_confirm_delivery(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}
