mod common;
pub use self::common::{clamp_per_page, ListQuery, Query, QueryCommon, SortDirection, MAX_PER_PAGE};

mod filter;
pub use self::filter::FilterExpression;

mod ticket;
pub use self::ticket::TicketQuery;

mod contact;
pub use self::contact::ContactQuery;

mod agent;
pub use self::agent::{AgentQuery, AgentStatus};

mod worklog;
pub use self::worklog::WorklogQuery;
