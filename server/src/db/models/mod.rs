//! Data models
//!
//! One module per collection. All money fields are integer cents (ARS
//! minor units); conversion to major units happens at the API boundary.
//! All instants are `i64` Unix millis.

pub mod client;
pub mod expense;
pub mod income;
pub mod membership;
pub mod price_config;
pub mod product;
pub mod serde_helpers;

// Re-exports
pub use client::*;
pub use expense::*;
pub use income::*;
pub use membership::*;
pub use price_config::*;
pub use product::*;
