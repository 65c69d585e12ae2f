//! Inventory page: resources with their master-data dropdowns

use async_trait::async_trait;
use futures::future::join3;
use ims_client::{ClientResult, HttpClient, ImsClient, UploadFile};
use shared::models::{MasterKind, Resource, ResourceForm, master_names};

use super::crud::{Collection, Creatable, CrudPage, Editable};
use crate::error::ConsoleResult;
use crate::forms::Patch;
use crate::notify::Notifier;

/// `/api/resources`
#[derive(Debug, Clone)]
pub struct ResourceCollection<H> {
    client: ImsClient<H>,
}

impl<H> ResourceCollection<H> {
    pub fn new(client: ImsClient<H>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<H: HttpClient> Collection for ResourceCollection<H> {
    type Record = Resource;

    fn name(&self) -> &'static str {
        "Resource"
    }

    fn record_id(record: &Resource) -> &str {
        &record.resource_id
    }

    async fn fetch_all(&self) -> ClientResult<Vec<Resource>> {
        self.client.resources().list().await
    }

    async fn fetch_one(&self, id: &str) -> ClientResult<Resource> {
        self.client.resources().get(id).await
    }
}

#[async_trait]
impl<H: HttpClient> Creatable for ResourceCollection<H> {
    type Draft = ResourceForm;

    fn normalize(draft: ResourceForm) -> ResourceForm {
        draft.trimmed()
    }

    async fn create(&self, draft: &ResourceForm) -> ClientResult<()> {
        self.client.resources().create(draft).await
    }
}

#[async_trait]
impl<H: HttpClient> Editable for ResourceCollection<H> {
    type Form = ResourceForm;

    fn normalize_form(form: ResourceForm) -> ResourceForm {
        form.trimmed()
    }

    async fn update(&self, id: &str, patch: &Patch) -> ClientResult<()> {
        self.client.resources().update(id, patch).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.client.resources().delete(id).await
    }
}

/// Names offered by the class/type/status dropdowns
///
/// Loaded together with the list and not refreshed when master data changes
/// on another page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterOptions {
    pub classes: Vec<String>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
}

impl MasterOptions {
    pub fn get(&self, kind: MasterKind) -> &[String] {
        match kind {
            MasterKind::ResourceClass => &self.classes,
            MasterKind::ResourceType => &self.types,
            MasterKind::ResourceStatus => &self.statuses,
        }
    }

    fn set(&mut self, kind: MasterKind, names: Vec<String>) {
        match kind {
            MasterKind::ResourceClass => self.classes = names,
            MasterKind::ResourceType => self.types = names,
            MasterKind::ResourceStatus => self.statuses = names,
        }
    }
}

#[derive(Debug)]
pub struct InventoryPage<H: HttpClient> {
    list: CrudPage<ResourceCollection<H>>,
    client: ImsClient<H>,
    notifier: Notifier,
    options: MasterOptions,
}

impl<H: HttpClient + Clone> InventoryPage<H> {
    pub fn new(client: ImsClient<H>, notifier: Notifier) -> Self {
        Self {
            list: CrudPage::new(ResourceCollection::new(client.clone()), notifier.clone()),
            client,
            notifier,
            options: MasterOptions::default(),
        }
    }
}

impl<H: HttpClient> InventoryPage<H> {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.list = self.list.with_page_size(page_size);
        self
    }

    pub fn list(&self) -> &CrudPage<ResourceCollection<H>> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut CrudPage<ResourceCollection<H>> {
        &mut self.list
    }

    pub fn options(&self) -> &MasterOptions {
        &self.options
    }

    /// Load the resource list and the dropdown options side by side.
    pub async fn mount(&mut self) -> ConsoleResult<()> {
        let client = &self.client;
        let notifier = &self.notifier;
        let options = &mut self.options;
        let (list, ()) = tokio::join!(self.list.load(), load_options(client, notifier, options));
        list
    }

    /// PNG bytes of the resource's barcode.
    pub async fn barcode(&self, id: &str) -> ConsoleResult<Vec<u8>> {
        self.client.resources().barcode(id).await.map_err(|e| {
            self.notifier.error(e.user_message("Failed to generate barcode"));
            e.into()
        })
    }

    /// Bulk-import resources from a spreadsheet, then re-fetch the list.
    pub async fn upload_spreadsheet(&mut self, file: UploadFile) -> ConsoleResult<()> {
        let file_name = file.file_name.clone();
        match self.client.resources().upload_excel(file, None).await {
            Ok(()) => {
                tracing::info!(file = %file_name, "Spreadsheet imported");
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

/// Fetch the three master lists; a failing list keeps its previous options.
async fn load_options<H: HttpClient>(
    client: &ImsClient<H>,
    notifier: &Notifier,
    options: &mut MasterOptions,
) {
    let [class, ty, status] = MasterKind::ALL;
    let (classes, types, statuses) = join3(
        client.master(class).list(),
        client.master(ty).list(),
        client.master(status).list(),
    )
    .await;

    for (kind, result) in [(class, classes), (ty, types), (status, statuses)] {
        match result {
            Ok(records) => options.set(kind, master_names(&records)),
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Failed to load master options");
                let fallback = format!("Failed to load {} options", kind.label().to_lowercase());
                notifier.error(e.user_message(&fallback));
            }
        }
    }
}
