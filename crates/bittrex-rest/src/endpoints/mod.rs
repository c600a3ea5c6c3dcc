//! Typed wrappers over the operation catalog, grouped by path prefix

pub mod account;
pub mod market;
pub mod public;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use public::PublicEndpoints;
