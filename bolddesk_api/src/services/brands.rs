use crate::{
    pagination::Paginator,
    query::ListQuery,
    types::{Brand, BrandID, PagedResponse},
    Client, Error,
};

/// Brand endpoints (read-only).
pub struct Brands<'a> {
    client: &'a Client,
}

impl<'a> Brands<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches one page of brands.
    pub async fn list(&self, query: &ListQuery) -> Result<PagedResponse<Brand>, Error> {
        self.client
            .get::<PagedResponse<Brand>, ListQuery>("/brands", Some(query))
            .await
    }

    pub fn all(&self, query: ListQuery) -> Paginator<'a, Brand, ListQuery> {
        let client = self.client;
        Paginator::new(query, move |q: ListQuery| async move {
            client
                .get::<PagedResponse<Brand>, ListQuery>("/brands", Some(&q))
                .await
        })
        .with_rate_limiter(client.rate_limiter())
    }

    pub async fn get(&self, brand_id: BrandID) -> Result<Brand, Error> {
        self.client
            .get::<Brand, ListQuery>(format!("/brands/{}", brand_id).as_str(), None)
            .await
    }
}
