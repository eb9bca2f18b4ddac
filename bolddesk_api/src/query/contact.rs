use url::Url;

use crate::types::ContactGroupID;

use super::{common::QueryCommon, filter::FilterExpression, Query};

/// Query for `GET /contacts`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactQuery {
    pub common: QueryCommon,
    pub email: Option<String>,
    pub contact_group_id: Option<ContactGroupID>,
    pub blocked: Option<bool>,
}

impl Query for ContactQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(q) = self.filter_expression().build() {
            url.query_pairs_mut().append_pair("Q", &q);
        }
        url
    }
}

impl ContactQuery {
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_contact_group_id(mut self, contact_group_id: ContactGroupID) -> Self {
        self.contact_group_id = Some(contact_group_id);
        self
    }

    pub fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = Some(blocked);
        self
    }

    pub fn filter_expression(&self) -> FilterExpression {
        let mut expr = FilterExpression::new();
        if let Some(email) = &self.email {
            expr = expr.text("email", email);
        }
        if let Some(group) = self.contact_group_id {
            expr = expr.eq("contactgroup", group);
        }
        if let Some(blocked) = self.blocked {
            expr = expr.eq("isblocked", blocked);
        }
        expr
    }
}
