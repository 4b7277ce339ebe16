//! HTTP handlers for cryptvest-service.

pub mod diagnostics;
pub mod health;
pub mod portfolio;
pub mod root;
pub mod submissions;

pub use diagnostics::test_database;
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use portfolio::demo_portfolio;
pub use root::{hello, read_root};
pub use submissions::{create_connection, create_lead};
