//! Batches: create-only list plus spreadsheet import into a batch

use async_trait::async_trait;
use ims_client::{ClientResult, HttpClient, ImsClient, UploadFile};
use shared::models::{Batch, BatchForm};

use super::crud::{Collection, Creatable, CrudPage};
use crate::error::{ConsoleError, ConsoleResult};
use crate::notify::Notifier;

/// `/api/batches`
#[derive(Debug, Clone)]
pub struct BatchCollection<H> {
    client: ImsClient<H>,
}

impl<H> BatchCollection<H> {
    pub fn new(client: ImsClient<H>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<H: HttpClient> Collection for BatchCollection<H> {
    type Record = Batch;

    fn name(&self) -> &'static str {
        "Batch"
    }

    fn record_id(record: &Batch) -> &str {
        &record.batch_id
    }

    async fn fetch_all(&self) -> ClientResult<Vec<Batch>> {
        self.client.batches().list().await
    }
}

#[async_trait]
impl<H: HttpClient> Creatable for BatchCollection<H> {
    type Draft = BatchForm;

    fn normalize(mut draft: BatchForm) -> BatchForm {
        draft.resource_type = draft.resource_type.trim().to_string();
        draft.description = draft
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        draft
    }

    async fn create(&self, draft: &BatchForm) -> ClientResult<()> {
        self.client.batches().create(draft).await
    }
}

#[derive(Debug)]
pub struct BatchesPage<H: HttpClient> {
    list: CrudPage<BatchCollection<H>>,
    client: ImsClient<H>,
    notifier: Notifier,
}

impl<H: HttpClient + Clone> BatchesPage<H> {
    pub fn new(client: ImsClient<H>, notifier: Notifier) -> Self {
        Self {
            list: CrudPage::new(BatchCollection::new(client.clone()), notifier.clone()),
            client,
            notifier,
        }
    }
}

impl<H: HttpClient> BatchesPage<H> {
    pub fn list(&self) -> &CrudPage<BatchCollection<H>> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut CrudPage<BatchCollection<H>> {
        &mut self.list
    }

    pub async fn mount(&mut self) -> ConsoleResult<()> {
        self.list.load().await
    }

    /// Import the resources of `file` into batch `batch_id`.
    pub async fn upload_spreadsheet(
        &mut self,
        batch_id: &str,
        file: UploadFile,
    ) -> ConsoleResult<()> {
        let batch_id = batch_id.trim();
        if batch_id.is_empty() {
            self.notifier.error("Select a batch first");
            return Err(ConsoleError::invalid_state("no batch selected for upload"));
        }

        match self.client.resources().upload_excel(file, Some(batch_id)).await {
            Ok(()) => {
                tracing::info!(batch_id = %batch_id, "Spreadsheet imported into batch");
                self.notifier.success("File uploaded successfully");
                self.list.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.user_message("Failed to upload file"));
                Err(e.into())
            }
        }
    }
}
