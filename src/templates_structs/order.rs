use askama::Template;

use super::PageContext;
use crate::auth::session::Role;
use crate::models::order::{Order, OrderPhoto};
use crate::workflow::Transition;

#[derive(Template)]
#[template(path = "orders/list.html")]
pub struct OrderListTemplate {
    pub ctx: PageContext,
    pub orders: Vec<Order>,
}

/// Order detail with the transition picker and the role-gated action panels.
#[derive(Template)]
#[template(path = "orders/detail.html")]
pub struct OrderDetailTemplate {
    pub ctx: PageContext,
    pub order: Order,
    pub photos: Vec<OrderPhoto>,
    pub transitions: Vec<Transition>,
    pub viewer_side: Role,
    pub already_rated: bool,
}

#[derive(Template)]
#[template(path = "orders/rate.html")]
pub struct OrderRateTemplate {
    pub ctx: PageContext,
    pub order: Order,
    pub errors: Vec<String>,
}
