use url::Url;

use crate::types::{AgentID, BrandID};

use super::{common::QueryCommon, filter::FilterExpression, Query};

/// Query for `GET /tickets`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub common: QueryCommon,
    /// Saved view to list tickets from.
    pub view_id: Option<i64>,
    pub status_ids: Vec<i64>,
    pub priority_ids: Vec<i64>,
    pub brand_ids: Vec<BrandID>,
    pub agent_id: Option<AgentID>,
    pub created_on: Option<String>,
    pub tags: Vec<String>,
}

impl Query for TicketQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(view_id) = self.view_id {
            url.query_pairs_mut()
                .append_pair("viewId", &view_id.to_string());
        }
        if let Some(q) = self.filter_expression().build() {
            url.query_pairs_mut().append_pair("Q", &q);
        }
        url
    }
}

impl TicketQuery {
    pub fn with_view_id(mut self, view_id: i64) -> Self {
        self.view_id = Some(view_id);
        self
    }

    pub fn with_status_id(mut self, status_id: i64) -> Self {
        self.status_ids.push(status_id);
        self
    }
    pub fn with_status_ids(mut self, status_ids: &[i64]) -> Self {
        self.status_ids.extend_from_slice(status_ids);
        self
    }

    pub fn with_priority_id(mut self, priority_id: i64) -> Self {
        self.priority_ids.push(priority_id);
        self
    }
    pub fn with_priority_ids(mut self, priority_ids: &[i64]) -> Self {
        self.priority_ids.extend_from_slice(priority_ids);
        self
    }

    pub fn with_brand_id(mut self, brand_id: BrandID) -> Self {
        self.brand_ids.push(brand_id);
        self
    }
    pub fn with_brand_ids(mut self, brand_ids: &[BrandID]) -> Self {
        self.brand_ids.extend_from_slice(brand_ids);
        self
    }

    pub fn with_agent_id(mut self, agent_id: AgentID) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    /// Creation-date filter, e.g. `today`, `yesterday`, `lastweek`.
    pub fn with_created_on(mut self, created_on: &str) -> Self {
        self.created_on = Some(created_on.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// The resource-specific filters as a single `Q` expression.
    pub fn filter_expression(&self) -> FilterExpression {
        let mut expr = FilterExpression::new()
            .any_of("status", &self.status_ids)
            .any_of("priority", &self.priority_ids)
            .any_of("brand", &self.brand_ids);
        if let Some(agent_id) = self.agent_id {
            expr = expr.eq("agent", agent_id);
        }
        if let Some(created_on) = &self.created_on {
            expr = expr.eq("createdon", created_on);
        }
        if !self.tags.is_empty() {
            expr = expr.any_of("tag", &self.tags);
        }
        expr
    }
}
