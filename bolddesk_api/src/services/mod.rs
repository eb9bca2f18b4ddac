//! Resource services. Each borrows a [`Client`](crate::Client) and maps one
//! BoldDesk resource onto its endpoints.

mod agents;
mod brands;
mod contact_groups;
mod contacts;
mod fields;
mod tickets;
mod worklogs;

pub use self::agents::Agents;
pub use self::brands::Brands;
pub use self::contact_groups::ContactGroups;
pub use self::contacts::Contacts;
pub use self::fields::Fields;
pub use self::tickets::Tickets;
pub use self::worklogs::Worklogs;
