//! Advanced search: server-side resource filter with edit/delete on results
//!
//! After a mutation the current filter is re-run, the same re-read contract
//! as the inventory list.

use async_trait::async_trait;
use ims_client::{ClientResult, HttpClient, ImsClient};
use shared::models::{Resource, ResourceFilter, ResourceForm};

use super::crud::{Collection, CrudPage, Editable};
use crate::error::ConsoleResult;
use crate::forms::Patch;
use crate::notify::Notifier;

/// Resources matching the active filter
#[derive(Debug, Clone)]
pub struct FilteredResources<H> {
    client: ImsClient<H>,
    filter: ResourceFilter,
}

impl<H> FilteredResources<H> {
    pub fn new(client: ImsClient<H>) -> Self {
        Self {
            client,
            filter: ResourceFilter::default(),
        }
    }

    pub fn filter(&self) -> &ResourceFilter {
        &self.filter
    }
}

#[async_trait]
impl<H: HttpClient> Collection for FilteredResources<H> {
    type Record = Resource;

    fn name(&self) -> &'static str {
        "Resource"
    }

    fn record_id(record: &Resource) -> &str {
        &record.resource_id
    }

    async fn fetch_all(&self) -> ClientResult<Vec<Resource>> {
        self.client.resources().filter(&self.filter).await
    }

    async fn fetch_one(&self, id: &str) -> ClientResult<Resource> {
        self.client.resources().get(id).await
    }
}

#[async_trait]
impl<H: HttpClient> Editable for FilteredResources<H> {
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

#[derive(Debug)]
pub struct FiltersPage<H: HttpClient> {
    results: CrudPage<FilteredResources<H>>,
}

impl<H: HttpClient> FiltersPage<H> {
    pub fn new(client: ImsClient<H>, notifier: Notifier) -> Self {
        Self {
            results: CrudPage::new(FilteredResources::new(client), notifier),
        }
    }

    pub fn results(&self) -> &CrudPage<FilteredResources<H>> {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut CrudPage<FilteredResources<H>> {
        &mut self.results
    }

    /// Run `filter` against the backend and show the matches.
    pub async fn search(&mut self, filter: ResourceFilter) -> ConsoleResult<()> {
        tracing::debug!(criteria = filter.criteria().len(), "Running resource filter");
        self.results.collection_mut().filter = filter;
        self.results.load().await
    }

    /// Reset the form and list everything.
    pub async fn clear(&mut self) -> ConsoleResult<()> {
        self.search(ResourceFilter::default()).await
    }
}
