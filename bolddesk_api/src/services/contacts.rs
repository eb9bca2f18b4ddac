use serde_json::json;

use crate::{
    pagination::Paginator,
    query::{ContactQuery, ListQuery},
    types::{Contact, ContactCreate, ContactID, ContactUpdate, CreatedResponse, MessageResponse, PagedResponse},
    Client, Error,
};

/// Contact (end user) endpoints.
pub struct Contacts<'a> {
    client: &'a Client,
}

impl<'a> Contacts<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of contacts matching the given query.
    pub async fn list(&self, query: &ContactQuery) -> Result<PagedResponse<Contact>, Error> {
        self.client
            .get::<PagedResponse<Contact>, ContactQuery>("/contacts", Some(query))
            .await
    }

    /// Walks every page of contacts matching the query.
    pub fn all(&self, query: ContactQuery) -> Paginator<'a, Contact, ContactQuery> {
        let client = self.client;
        Paginator::new(query, move |q: ContactQuery| async move {
            client
                .get::<PagedResponse<Contact>, ContactQuery>("/contacts", Some(&q))
                .await
        })
        .with_rate_limiter(client.rate_limiter())
    }

    pub async fn get(&self, contact_id: ContactID) -> Result<Contact, Error> {
        self.client
            .get::<Contact, ListQuery>(format!("/contacts/{}", contact_id).as_str(), None)
            .await
    }

    pub async fn create(&self, contact: &ContactCreate) -> Result<CreatedResponse, Error> {
        self.client.post("/contacts", contact).await
    }

    pub async fn update(
        &self,
        contact_id: ContactID,
        update: &ContactUpdate,
    ) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/contacts/{}", contact_id).as_str(), update)
            .await
    }

    pub async fn delete(&self, contact_id: ContactID) -> Result<MessageResponse, Error> {
        self.client
            .delete(format!("/contacts/{}", contact_id).as_str())
            .await
    }

    /// Blocks the contact from raising tickets.
    pub async fn block(&self, contact_id: ContactID) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/contacts/{}/block", contact_id).as_str(), &json!({}))
            .await
    }

    pub async fn unblock(&self, contact_id: ContactID) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/contacts/{}/unblock", contact_id).as_str(), &json!({}))
            .await
    }
}
