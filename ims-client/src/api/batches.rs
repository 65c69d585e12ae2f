//! `/api/batches`

use shared::models::{Batch, BatchForm};

use super::{into_ack, into_data};
use crate::client::HttpClient;
use crate::{ApiResponse, ClientResult};

pub struct BatchApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> BatchApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Batch>> {
        let resp: ApiResponse<Vec<Batch>> = self.http.get("/api/batches").await?;
        into_data(resp, "batch list")
    }

    pub async fn create(&self, form: &BatchForm) -> ClientResult<()> {
        let resp = self.http.post("/api/batches", form).await?;
        into_ack(resp, "batch create")
    }
}
