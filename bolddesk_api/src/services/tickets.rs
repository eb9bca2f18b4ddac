use serde_json::json;

use crate::{
    pagination::Paginator,
    query::{ListQuery, TicketQuery},
    types::{
        CreatedResponse, MessageResponse, PagedResponse, Ticket, TicketCreate, TicketID,
        TicketMessage, TicketMessageCreate, TicketNote, TicketNoteCreate, TicketUpdate,
    },
    Client, Error,
};

/// Ticket endpoints.
pub struct Tickets<'a> {
    client: &'a Client,
}

impl<'a> Tickets<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of tickets matching the given query.
    pub async fn list(&self, query: &TicketQuery) -> Result<PagedResponse<Ticket>, Error> {
        self.client
            .get::<PagedResponse<Ticket>, TicketQuery>("/tickets", Some(query))
            .await
    }

    /// Walks every page of tickets matching the query.
    pub fn all(&self, query: TicketQuery) -> Paginator<'a, Ticket, TicketQuery> {
        let client = self.client;
        Paginator::new(query, move |q: TicketQuery| async move {
            client
                .get::<PagedResponse<Ticket>, TicketQuery>("/tickets", Some(&q))
                .await
        })
        .with_rate_limiter(client.rate_limiter())
    }

    /// Fetches a single ticket by its numeric ID.
    pub async fn get(&self, ticket_id: TicketID) -> Result<Ticket, Error> {
        self.client
            .get::<Ticket, ListQuery>(format!("/tickets/{}", ticket_id).as_str(), None)
            .await
    }

    pub async fn create(&self, ticket: &TicketCreate) -> Result<CreatedResponse, Error> {
        self.client.post("/tickets", ticket).await
    }

    /// Updates the fields set on `update`; unset fields are left alone.
    pub async fn update(
        &self,
        ticket_id: TicketID,
        update: &TicketUpdate,
    ) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/tickets/{}", ticket_id).as_str(), update)
            .await
    }

    pub async fn delete(&self, ticket_id: TicketID) -> Result<MessageResponse, Error> {
        self.client
            .delete(format!("/tickets/{}", ticket_id).as_str())
            .await
    }

    /// Moves the ticket to the closed state.
    pub async fn close(&self, ticket_id: TicketID) -> Result<MessageResponse, Error> {
        self.client
            .patch(format!("/tickets/{}/close", ticket_id).as_str(), &json!({}))
            .await
    }

    /// Private notes on a ticket.
    pub async fn notes(
        &self,
        ticket_id: TicketID,
        query: &ListQuery,
    ) -> Result<PagedResponse<TicketNote>, Error> {
        self.client
            .get::<PagedResponse<TicketNote>, ListQuery>(
                format!("/tickets/{}/notes", ticket_id).as_str(),
                Some(query),
            )
            .await
    }

    pub async fn add_note(
        &self,
        ticket_id: TicketID,
        note: &TicketNoteCreate,
    ) -> Result<CreatedResponse, Error> {
        self.client
            .post(format!("/tickets/{}/notes", ticket_id).as_str(), note)
            .await
    }

    /// Public conversation (replies and customer messages) on a ticket.
    pub async fn messages(
        &self,
        ticket_id: TicketID,
        query: &ListQuery,
    ) -> Result<PagedResponse<TicketMessage>, Error> {
        self.client
            .get::<PagedResponse<TicketMessage>, ListQuery>(
                format!("/tickets/{}/updates", ticket_id).as_str(),
                Some(query),
            )
            .await
    }

    pub async fn reply(
        &self,
        ticket_id: TicketID,
        message: &TicketMessageCreate,
    ) -> Result<CreatedResponse, Error> {
        self.client
            .post(format!("/tickets/{}/updates", ticket_id).as_str(), message)
            .await
    }
}
