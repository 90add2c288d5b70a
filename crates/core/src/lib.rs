//! Domain logic for the Pont des Arts love-lock registry.
//!
//! Pure code only: no database or HTTP access. The `db` and `api` crates feed
//! it fresh data and act on its decisions.

pub mod allocation;
pub mod availability;
pub mod error;
pub mod golden;
pub mod marketplace;
pub mod pagination;
pub mod pricing;
pub mod purchase;
pub mod status;
pub mod types;
