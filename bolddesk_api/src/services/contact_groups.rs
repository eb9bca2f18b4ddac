use crate::{
    pagination::Paginator,
    query::ListQuery,
    types::{
        Contact, ContactGroup, ContactGroupCreate, ContactGroupID, ContactGroupUpdate,
        CreatedResponse, MessageResponse, PagedResponse,
    },
    Client, Error,
};

/// Contact group (customer organisation) endpoints.
pub struct ContactGroups<'a> {
    client: &'a Client,
}

impl<'a> ContactGroups<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of contact groups.
    pub async fn list(&self, query: &ListQuery) -> Result<PagedResponse<ContactGroup>, Error> {
        self.client
            .get::<PagedResponse<ContactGroup>, ListQuery>("/contact_groups", Some(query))
            .await
    }

    /// Walks every page of contact groups.
    pub fn all(&self, query: ListQuery) -> Paginator<'a, ContactGroup, ListQuery> {
        let client = self.client;
        Paginator::new(query, move |q: ListQuery| async move {
            client
                .get::<PagedResponse<ContactGroup>, ListQuery>("/contact_groups", Some(&q))
                .await
        })
        .with_rate_limiter(client.rate_limiter())
    }

    pub async fn get(&self, group_id: ContactGroupID) -> Result<ContactGroup, Error> {
        self.client
            .get::<ContactGroup, ListQuery>(format!("/contact_groups/{}", group_id).as_str(), None)
            .await
    }

    pub async fn create(&self, group: &ContactGroupCreate) -> Result<CreatedResponse, Error> {
        self.client.post("/contact_groups", group).await
    }

    pub async fn update(
        &self,
        group_id: ContactGroupID,
        update: &ContactGroupUpdate,
    ) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/contact_groups/{}", group_id).as_str(), update)
            .await
    }

    pub async fn delete(&self, group_id: ContactGroupID) -> Result<MessageResponse, Error> {
        self.client
            .delete(format!("/contact_groups/{}", group_id).as_str())
            .await
    }

    /// Contacts belonging to a group.
    pub async fn members(
        &self,
        group_id: ContactGroupID,
        query: &ListQuery,
    ) -> Result<PagedResponse<Contact>, Error> {
        self.client
            .get::<PagedResponse<Contact>, ListQuery>(
                format!("/contact_groups/{}/contacts", group_id).as_str(),
                Some(query),
            )
            .await
    }
}
