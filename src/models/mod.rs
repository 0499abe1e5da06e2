pub mod certificate;
pub mod company;
pub mod item;
pub mod offer;
pub mod order;
pub mod rating;
pub mod request;
pub mod user;
