//! Domain models for the marketplace client

mod business;
mod chat;
mod marketing;
mod order;
mod premium;
mod user;
mod voucher;

pub use business::*;
pub use chat::*;
pub use marketing::*;
pub use order::*;
pub use premium::*;
pub use user::*;
pub use voucher::*;
