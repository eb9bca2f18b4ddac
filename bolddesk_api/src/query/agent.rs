use std::fmt;
use std::str::FromStr;

use url::Url;

use super::{common::QueryCommon, filter::FilterExpression, Query};

/// Agent account state filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentStatus {
    Active,
    Inactive,
    Invited,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
            AgentStatus::Invited => "invited",
        })
    }
}

impl FromStr for AgentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(AgentStatus::Active),
            "inactive" => Ok(AgentStatus::Inactive),
            "invited" => Ok(AgentStatus::Invited),
            _ => Err(()),
        }
    }
}

/// Query for `GET /agents`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgentQuery {
    pub common: QueryCommon,
    pub status: Option<AgentStatus>,
    pub role_ids: Vec<i64>,
}

impl Query for AgentQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        let expr = FilterExpression::new().any_of("role", &self.role_ids);
        let expr = match self.status {
            Some(status) => expr.eq("status", status),
            None => expr,
        };
        if let Some(q) = expr.build() {
            url.query_pairs_mut().append_pair("Q", &q);
        }
        url
    }
}

impl AgentQuery {
    pub fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_role_id(mut self, role_id: i64) -> Self {
        self.role_ids.push(role_id);
        self
    }
}
