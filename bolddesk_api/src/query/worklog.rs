use url::Url;

use crate::types::{AgentID, TicketID};

use super::{common::QueryCommon, filter::FilterExpression, Query};

/// Query for `GET /worklogs` and `GET /tickets/{id}/worklogs`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorklogQuery {
    pub common: QueryCommon,
    pub ticket_id: Option<TicketID>,
    pub agent_id: Option<AgentID>,
    pub billable: Option<bool>,
    pub logged_on: Option<String>,
}

impl Query for WorklogQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        let mut expr = FilterExpression::new();
        if let Some(agent_id) = self.agent_id {
            expr = expr.eq("agent", agent_id);
        }
        if let Some(billable) = self.billable {
            expr = expr.eq("isbillable", billable);
        }
        if let Some(logged_on) = &self.logged_on {
            expr = expr.eq("loggedon", logged_on);
        }
        if let Some(q) = expr.build() {
            url.query_pairs_mut().append_pair("Q", &q);
        }
        url
    }
}

impl WorklogQuery {
    /// Scopes the listing to one ticket's worklogs.
    pub fn with_ticket_id(mut self, ticket_id: TicketID) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    pub fn with_agent_id(mut self, agent_id: AgentID) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    pub fn with_billable(mut self, billable: bool) -> Self {
        self.billable = Some(billable);
        self
    }

    /// Logged-date filter, e.g. `today` or `lastmonth`.
    pub fn with_logged_on(mut self, logged_on: &str) -> Self {
        self.logged_on = Some(logged_on.to_string());
        self
    }
}
