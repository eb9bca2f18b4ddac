use crate::{
    pagination::Paginator,
    query::WorklogQuery,
    types::{
        CreatedResponse, MessageResponse, PagedResponse, TicketID, Worklog, WorklogCreate,
        WorklogID, WorklogUpdate,
    },
    Client, Error,
};

/// Worklog (time tracking) endpoints.
///
/// Listing works across all tickets or for one ticket when the query has a
/// ticket ID. Writes are always scoped to a ticket.
pub struct Worklogs<'a> {
    client: &'a Client,
}

fn list_path(query: &WorklogQuery) -> String {
    match query.ticket_id {
        Some(ticket_id) => format!("/tickets/{}/worklogs", ticket_id),
        None => "/worklogs".to_string(),
    }
}

impl<'a> Worklogs<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of worklogs matching the given query.
    pub async fn list(&self, query: &WorklogQuery) -> Result<PagedResponse<Worklog>, Error> {
        self.client
            .get::<PagedResponse<Worklog>, WorklogQuery>(list_path(query).as_str(), Some(query))
            .await
    }

    /// Fetches one page of a single ticket's worklogs.
    pub async fn for_ticket(
        &self,
        ticket_id: TicketID,
        query: &WorklogQuery,
    ) -> Result<PagedResponse<Worklog>, Error> {
        self.list(&query.clone().with_ticket_id(ticket_id)).await
    }

    /// Walks every page of worklogs matching the query.
    pub fn all(&self, query: WorklogQuery) -> Paginator<'a, Worklog, WorklogQuery> {
        let client = self.client;
        Paginator::new(query, move |q: WorklogQuery| async move {
            client
                .get::<PagedResponse<Worklog>, WorklogQuery>(list_path(&q).as_str(), Some(&q))
                .await
        })
        .with_rate_limiter(client.rate_limiter())
    }

    pub async fn create(
        &self,
        ticket_id: TicketID,
        worklog: &WorklogCreate,
    ) -> Result<CreatedResponse, Error> {
        self.client
            .post(format!("/tickets/{}/worklogs", ticket_id).as_str(), worklog)
            .await
    }

    pub async fn update(
        &self,
        ticket_id: TicketID,
        worklog_id: WorklogID,
        update: &WorklogUpdate,
    ) -> Result<MessageResponse, Error> {
        self.client
            .put(
                format!("/tickets/{}/worklogs/{}", ticket_id, worklog_id).as_str(),
                update,
            )
            .await
    }

    pub async fn delete(
        &self,
        ticket_id: TicketID,
        worklog_id: WorklogID,
    ) -> Result<MessageResponse, Error> {
        self.client
            .delete(format!("/tickets/{}/worklogs/{}", ticket_id, worklog_id).as_str())
            .await
    }
}
