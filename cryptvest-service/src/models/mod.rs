pub mod connection_request;
pub mod lead;
pub mod portfolio;

pub use connection_request::ConnectionRequest;
pub use lead::Lead;
pub use portfolio::{Allocation, DemoPortfolio, EquityPoint, PortfolioStats};

use std::fmt;

/// The closed set of entities this service persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Lead,
    ConnectionRequest,
}

impl EntityKind {
    /// Collection the entity's documents are written to.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::ConnectionRequest => "connectionrequest",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Lead => write!(f, "lead"),
            EntityKind::ConnectionRequest => write!(f, "connection_request"),
        }
    }
}

/// Trims every present string and drops the ones left empty.
pub(crate) fn trim_optional(value: &mut Option<String>) {
    if let Some(v) = value.take() {
        let trimmed = v.trim();
        if !trimmed.is_empty() {
            *value = Some(trimmed.to_string());
        }
    }
}
