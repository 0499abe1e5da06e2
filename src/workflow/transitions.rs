use serde::{Deserialize, Serialize};

use super::types::PaymentMethod;

/// Fulfilment state machine for an order. Statuses advance monotonically
/// along a directed path; `cancelled` is absorbing and reachable from every
/// non-terminal status except `opened` and `delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Opened,
    PaymentPending,
    PaymentDone,
    CashPaymentPending,
    CashPaymentDone,
    Collecting,
    InTransit,
    Delivered,
    Completed,
    Cancelled,
}

/// One legal step out of a status, as rendered in the transition picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub target: OrderStatus,
    pub description: &'static str,
}

impl Transition {
    const fn to(target: OrderStatus, description: &'static str) -> Self {
        Transition { target, description }
    }

    pub fn label(&self) -> &'static str {
        self.target.label()
    }

    /// A reason is mandatory only when cancelling.
    pub fn requires_reason(&self) -> bool {
        self.target == OrderStatus::Cancelled
    }
}

const CANCEL: Transition = Transition::to(
    OrderStatus::Cancelled,
    "Cancel the order. A reason is required.",
);

impl OrderStatus {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "opened" => Some(OrderStatus::Opened),
            "payment_pending" => Some(OrderStatus::PaymentPending),
            "payment_done" => Some(OrderStatus::PaymentDone),
            "cash_payment_pending" => Some(OrderStatus::CashPaymentPending),
            "cash_payment_done" => Some(OrderStatus::CashPaymentDone),
            "collecting" => Some(OrderStatus::Collecting),
            "in_transit" => Some(OrderStatus::InTransit),
            "delivered" => Some(OrderStatus::Delivered),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            OrderStatus::Opened => "opened",
            OrderStatus::PaymentPending => "payment_pending",
            OrderStatus::PaymentDone => "payment_done",
            OrderStatus::CashPaymentPending => "cash_payment_pending",
            OrderStatus::CashPaymentDone => "cash_payment_done",
            OrderStatus::Collecting => "collecting",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Opened => "Opened",
            OrderStatus::PaymentPending => "Payment pending",
            OrderStatus::PaymentDone => "Payment received",
            OrderStatus::CashPaymentPending => "Cash payment pending",
            OrderStatus::CashPaymentDone => "Cash payment received",
            OrderStatus::Collecting => "In production",
            OrderStatus::InTransit => "In transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            OrderStatus::Opened => "badge-blue",
            OrderStatus::PaymentPending | OrderStatus::CashPaymentPending => "badge-yellow",
            OrderStatus::PaymentDone | OrderStatus::CashPaymentDone => "badge-teal",
            OrderStatus::Collecting => "badge-purple",
            OrderStatus::InTransit => "badge-indigo",
            OrderStatus::Delivered => "badge-green",
            OrderStatus::Completed => "badge-green",
            OrderStatus::Cancelled => "badge-red",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Canonical transition table (bank payment path). Orders already on the
    /// cash leg keep their forward continuation regardless of method so a
    /// misclassified order can never get stuck.
    pub fn transitions(self) -> Vec<Transition> {
        match self {
            OrderStatus::Opened => vec![Transition::to(
                OrderStatus::PaymentPending,
                "Issue the invoice and await the buyer's payment.",
            )],
            OrderStatus::PaymentPending => vec![
                Transition::to(
                    OrderStatus::PaymentDone,
                    "Confirm receipt of the bank transfer.",
                ),
                CANCEL,
            ],
            OrderStatus::PaymentDone => vec![
                Transition::to(
                    OrderStatus::Collecting,
                    "Start production and collect the goods.",
                ),
                CANCEL,
            ],
            OrderStatus::CashPaymentPending => vec![
                Transition::to(
                    OrderStatus::CashPaymentDone,
                    "Confirm the cash payment was received.",
                ),
                CANCEL,
            ],
            OrderStatus::CashPaymentDone => vec![
                Transition::to(
                    OrderStatus::Collecting,
                    "Start production and collect the goods.",
                ),
                CANCEL,
            ],
            OrderStatus::Collecting => vec![
                Transition::to(
                    OrderStatus::InTransit,
                    "Ship the goods. The TTN waybill must be attached.",
                ),
                CANCEL,
            ],
            OrderStatus::InTransit => vec![
                Transition::to(OrderStatus::Delivered, "Mark the shipment as delivered."),
                CANCEL,
            ],
            OrderStatus::Delivered => vec![Transition::to(
                OrderStatus::Completed,
                "Buyer confirms delivery and completes the order.",
            )],
            OrderStatus::Completed | OrderStatus::Cancelled => vec![],
        }
    }

    /// Transition table resolved for the order's payment method: cash orders
    /// leave `payment_pending` through the cash sub-path instead of directly
    /// to `payment_done`.
    pub fn transitions_for(self, method: PaymentMethod) -> Vec<Transition> {
        if self == OrderStatus::PaymentPending && method.is_cash() {
            return vec![
                Transition::to(
                    OrderStatus::CashPaymentPending,
                    "Buyer pays in cash and submits the receipt.",
                ),
                CANCEL,
            ];
        }
        self.transitions()
    }

    /// Whether `self -> target` is a legal step for the given payment method.
    pub fn can_transition(self, target: OrderStatus, method: PaymentMethod) -> bool {
        self.transitions_for(method)
            .iter()
            .any(|t| t.target == target)
    }
}
