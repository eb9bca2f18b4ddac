//! Library layer for BoldDesk: configuration, input validation and the
//! library error type on top of the `bolddesk_api` client.

pub mod config;
pub mod error;
pub mod validation;

pub use bolddesk_api;
pub use bolddesk_api::types;
pub use bolddesk_api::{
    AgentQuery, AgentStatus, CancellationToken, Client, ContactQuery, ErrorEnvelope,
    FilterExpression, ListQuery, Paginator, Query, RateLimitSnapshot, SortDirection, TicketQuery,
    WorklogQuery,
};

pub use config::Config;
pub use error::BoldDeskError;
