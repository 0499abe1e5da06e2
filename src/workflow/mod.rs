pub mod transitions;
pub mod types;

pub use transitions::{OrderStatus, Transition};
pub use types::{OfferStatus, PaymentMethod, RequestStatus};
