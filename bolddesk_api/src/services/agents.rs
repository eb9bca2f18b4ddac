use serde_json::json;

use crate::{
    pagination::Paginator,
    query::{AgentQuery, ListQuery},
    types::{Agent, AgentCreate, AgentID, AgentUpdate, CreatedResponse, MessageResponse, PagedResponse},
    Client, Error,
};

/// Agent endpoints. Agents cannot be deleted through the API, only deactivated.
pub struct Agents<'a> {
    client: &'a Client,
}

impl<'a> Agents<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of agents matching the given query.
    pub async fn list(&self, query: &AgentQuery) -> Result<PagedResponse<Agent>, Error> {
        self.client
            .get::<PagedResponse<Agent>, AgentQuery>("/agents", Some(query))
            .await
    }

    /// Walks every page of agents matching the query.
    pub fn all(&self, query: AgentQuery) -> Paginator<'a, Agent, AgentQuery> {
        let client = self.client;
        Paginator::new(query, move |q: AgentQuery| async move {
            client
                .get::<PagedResponse<Agent>, AgentQuery>("/agents", Some(&q))
                .await
        })
        .with_rate_limiter(client.rate_limiter())
    }

    pub async fn get(&self, agent_id: AgentID) -> Result<Agent, Error> {
        self.client
            .get::<Agent, ListQuery>(format!("/agents/{}", agent_id).as_str(), None)
            .await
    }

    /// Invites a new agent.
    pub async fn create(&self, agent: &AgentCreate) -> Result<CreatedResponse, Error> {
        self.client.post("/agents", agent).await
    }

    pub async fn update(&self, agent_id: AgentID, update: &AgentUpdate) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/agents/{}", agent_id).as_str(), update)
            .await
    }

    pub async fn activate(&self, agent_id: AgentID) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/agents/{}/activate", agent_id).as_str(), &json!({}))
            .await
    }

    pub async fn deactivate(&self, agent_id: AgentID) -> Result<MessageResponse, Error> {
        self.client
            .put(format!("/agents/{}/deactivate", agent_id).as_str(), &json!({}))
            .await
    }
}
