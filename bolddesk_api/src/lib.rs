//! Typed client for the BoldDesk helpdesk REST API.
//!
//! [`Client`] owns the HTTP transport and the most recent rate-limit reading.
//! Resource services borrowed from it (`client.tickets()`, `client.contacts()`,
//! ...) build URLs from the query types in this crate and decode responses
//! into the models under [`types`]. Bulk listings go through [`Paginator`].

mod client;
mod errors;
pub mod pagination;
mod query;
pub mod rate_limit;
pub mod services;
pub mod types;
pub use self::client::{api_base_url, Client, DEFAULT_TIMEOUT};
pub use self::errors::{Error, ErrorEnvelope, FieldError};
pub use self::pagination::{CancellationToken, Paginator, ProgressFn};
pub use self::query::{
    clamp_per_page, AgentQuery, AgentStatus, ContactQuery, FilterExpression, ListQuery, Query,
    QueryCommon, SortDirection, TicketQuery, WorklogQuery, MAX_PER_PAGE,
};
pub use self::rate_limit::{RateLimitSnapshot, RateLimitTracker};
