pub mod auth;
pub mod category;
pub mod dish;
pub mod menu;
pub mod notification;
pub mod restaurant;
pub mod user;

mod router;
pub use router::get_router;
