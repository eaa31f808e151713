//! Domain services
//!
//! Pure business logic on top of the repositories: membership status
//! derivation, monthly aggregation, price suggestions and the Excel
//! report builder.

pub mod dashboard;
pub mod pricing;
pub mod report;
pub mod status;

pub use dashboard::{DashboardService, MonthData};
pub use pricing::PricingService;
pub use status::{MembershipState, MembershipStatus};
