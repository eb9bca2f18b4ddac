use crate::{
    query::ListQuery,
    types::{CreatedResponse, FieldID, FieldOption, FieldOptionCreate, MessageResponse, PagedResponse, TicketField},
    Client, Error,
};

/// Ticket and contact field definitions, and dropdown options.
pub struct Fields<'a> {
    client: &'a Client,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of ticket field definitions.
    pub async fn list(&self, query: &ListQuery) -> Result<PagedResponse<TicketField>, Error> {
        self.client
            .get::<PagedResponse<TicketField>, ListQuery>("/ticket_fields", Some(query))
            .await
    }

    /// Fetches one page of contact field definitions.
    pub async fn contact_fields(&self, query: &ListQuery) -> Result<PagedResponse<TicketField>, Error> {
        self.client
            .get::<PagedResponse<TicketField>, ListQuery>("/contact_fields", Some(query))
            .await
    }

    pub async fn get(&self, field_id: FieldID) -> Result<TicketField, Error> {
        self.client
            .get::<TicketField, ListQuery>(format!("/ticket_fields/{}", field_id).as_str(), None)
            .await
    }

    /// Options of a dropdown or multi-select field.
    pub async fn options(&self, field_id: FieldID) -> Result<PagedResponse<FieldOption>, Error> {
        self.client
            .get::<PagedResponse<FieldOption>, ListQuery>(
                format!("/ticket_fields/{}/options", field_id).as_str(),
                None,
            )
            .await
    }

    pub async fn add_option(
        &self,
        field_id: FieldID,
        option: &FieldOptionCreate,
    ) -> Result<CreatedResponse, Error> {
        self.client
            .post(format!("/ticket_fields/{}/options", field_id).as_str(), option)
            .await
    }

    pub async fn delete_option(&self, field_id: FieldID, option_id: i64) -> Result<MessageResponse, Error> {
        self.client
            .delete(format!("/ticket_fields/{}/options/{}", field_id, option_id).as_str())
            .await
    }
}
