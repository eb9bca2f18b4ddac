mod meta;
pub use self::meta::{CreatedResponse, IdName, MessageResponse, PagedResponse};

mod ticket;
pub use self::ticket::{
    Ticket, TicketCreate, TicketID, TicketMessage, TicketMessageCreate, TicketNote,
    TicketNoteCreate, TicketUpdate,
};

mod contact;
pub use self::contact::{Contact, ContactCreate, ContactID, ContactUpdate};

mod contact_group;
pub use self::contact_group::{ContactGroup, ContactGroupCreate, ContactGroupID, ContactGroupUpdate};

mod agent;
pub use self::agent::{Agent, AgentCreate, AgentID, AgentUpdate};

mod brand;
pub use self::brand::{Brand, BrandID};

mod worklog;
pub use self::worklog::{Worklog, WorklogCreate, WorklogID, WorklogUpdate};

mod field;
pub use self::field::{FieldID, FieldOption, FieldOptionCreate, TicketField};
