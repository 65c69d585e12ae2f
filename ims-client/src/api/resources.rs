//! `/api/resources*`

use serde::Serialize;
use shared::models::{Resource, ResourceFilter, ResourceForm};

use super::{into_ack, into_data, segment};
use crate::client::{HttpClient, UploadFile};
use crate::{ApiResponse, ClientResult};

pub struct ResourceApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> ResourceApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Resource>> {
        let resp: ApiResponse<Vec<Resource>> = self.http.get("/api/resources").await?;
        into_data(resp, "resource list")
    }

    pub async fn get(&self, id: &str) -> ClientResult<Resource> {
        let resp: ApiResponse<Resource> = self
            .http
            .get(&format!("/api/resources/{}", segment(id)))
            .await?;
        into_data(resp, "resource")
    }

    /// The create endpoint takes a list; the console always sends one.
    pub async fn create(&self, form: &ResourceForm) -> ClientResult<()> {
        let resp = self
            .http
            .post("/api/resources", &std::slice::from_ref(form))
            .await?;
        into_ack(resp, "resource create")
    }

    /// Partial update: `changes` holds only the fields that differ.
    pub async fn update<B: Serialize + Sync>(&self, id: &str, changes: &B) -> ClientResult<()> {
        let resp = self
            .http
            .patch(&format!("/api/resources/{}", segment(id)), changes)
            .await?;
        into_ack(resp, "resource update")
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let resp = self
            .http
            .delete(&format!("/api/resources/{}", segment(id)))
            .await?;
        into_ack(resp, "resource delete")
    }

    /// Barcode image (raw bytes) rendered by the backend
    pub async fn barcode(&self, id: &str) -> ClientResult<Vec<u8>> {
        self.http
            .get_bytes(&format!("/api/resources/{}/barcode", segment(id)))
            .await
    }

    /// Bulk import from a spreadsheet, optionally bound to a batch
    pub async fn upload_excel(&self, file: UploadFile, batch_id: Option<&str>) -> ClientResult<()> {
        let fields = batch_id
            .map(|id| vec![("batchId".to_string(), id.to_string())])
            .unwrap_or_default();
        let resp = self
            .http
            .post_multipart("/api/resources/upload-excel", fields, file)
            .await?;
        into_ack(resp, "spreadsheet upload")
    }

    pub async fn filter(&self, filter: &ResourceFilter) -> ClientResult<Vec<Resource>> {
        let query = filter
            .criteria()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let path = if query.is_empty() {
            "/api/resources/filter".to_string()
        } else {
            format!("/api/resources/filter?{}", query)
        };
        let resp: ApiResponse<Vec<Resource>> = self.http.get(&path).await?;
        into_data(resp, "resource filter")
    }
}
