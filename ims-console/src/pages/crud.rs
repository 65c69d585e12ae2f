//! Generic list page with create/edit/delete modals
//!
//! Every page keeps the last fetched snapshot of its list and never patches it
//! locally: a successful mutation is always followed by a full re-fetch, a
//! failed one leaves the snapshot as it was.

use std::fmt;

use async_trait::async_trait;
use ims_client::{ClientError, ClientResult};
use serde::Serialize;
use validator::Validate;

use super::state::{ModalMode, ModalState, PageState};
use crate::error::{ConsoleError, ConsoleResult};
use crate::forms::{Patch, build_patch, validate_form};
use crate::list::{self, ListQuery, Page, Searchable};
use crate::notify::Notifier;

/// Backend list a page is built on
#[async_trait]
pub trait Collection: Send + Sync {
    type Record: Clone + fmt::Debug + Send + Sync + 'static;

    /// Label used in notifications, e.g. "Resource"
    fn name(&self) -> &'static str;

    fn record_id(record: &Self::Record) -> &str;

    async fn fetch_all(&self) -> ClientResult<Vec<Self::Record>>;

    /// Single record for the detail view. Collections without a get-by-id
    /// endpoint look it up in a fresh list.
    async fn fetch_one(&self, id: &str) -> ClientResult<Self::Record> {
        self.fetch_all()
            .await?
            .into_iter()
            .find(|r| Self::record_id(r) == id)
            .ok_or_else(|| ClientError::NotFound(format!("{} {} not found", self.name(), id)))
    }
}

#[async_trait]
pub trait Creatable: Collection {
    type Draft: Validate + Default + Clone + Send + Sync;

    /// Applied before validation (trimming and the like).
    fn normalize(draft: Self::Draft) -> Self::Draft {
        draft
    }

    async fn create(&self, draft: &Self::Draft) -> ClientResult<()>;
}

#[async_trait]
pub trait Editable: Collection {
    type Form: Validate + Serialize + Clone + Send + Sync + for<'a> From<&'a Self::Record>;

    fn normalize_form(form: Self::Form) -> Self::Form {
        form
    }

    async fn update(&self, id: &str, patch: &Patch) -> ClientResult<()>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// List page over collection `C`
#[derive(Debug)]
pub struct CrudPage<C: Collection> {
    collection: C,
    notifier: Notifier,
    state: PageState,
    records: Vec<C::Record>,
    modal: ModalState,
    /// Record shown in the view/edit modal, as last fetched
    selected: Option<C::Record>,
    pending_delete: Option<String>,
    query: ListQuery,
}

impl<C: Collection> CrudPage<C> {
    pub fn new(collection: C, notifier: Notifier) -> Self {
        Self {
            collection,
            notifier,
            state: PageState::Idle,
            records: Vec::new(),
            modal: ModalState::Closed,
            selected: None,
            pending_delete: None,
            query: ListQuery::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.query = ListQuery::with_page_size(page_size);
        self
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut C {
        &mut self.collection
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn records(&self) -> &[C::Record] {
        &self.records
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn selected(&self) -> Option<&C::Record> {
        self.selected.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Fetch the full list. On failure the previous snapshot is kept.
    pub async fn load(&mut self) -> ConsoleResult<()> {
        self.state = PageState::Loading;
        match self.collection.fetch_all().await {
            Ok(records) => {
                tracing::debug!(
                    page = self.collection.name(),
                    count = records.len(),
                    "List loaded"
                );
                self.records = records;
                self.state = PageState::Loaded;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(&format!("{} list", self.fallback("load")));
                tracing::warn!(page = self.collection.name(), error = %e, "List load failed");
                self.notifier.error(message.clone());
                self.state = PageState::Error(message);
                Err(e.into())
            }
        }
    }

    /// Re-read after a successful write. The write already happened, so a
    /// failing re-fetch is reported through the page state only.
    pub async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!(
                page = self.collection.name(),
                error = %e,
                "Re-fetch after write failed"
            );
        }
    }

    pub async fn open_view(&mut self, id: &str) -> ConsoleResult<()> {
        match self.collection.fetch_one(id).await {
            Ok(record) => {
                self.selected = Some(record);
                self.modal = ModalState::open(ModalMode::View);
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.user_message(&self.fallback("fetch")));
                Err(e.into())
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
        self.selected = None;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.set_search(search);
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    /// Generic text for a failed `action` when the backend gives none,
    /// e.g. "Failed to delete resource".
    fn fallback(&self, action: &str) -> String {
        format!("Failed to {} {}", action, self.collection.name().to_lowercase())
    }

    fn mutation_failed(&mut self, verb: &str, e: ClientError) -> ConsoleError {
        let message = e.user_message(&self.fallback(verb));
        tracing::warn!(
            page = self.collection.name(),
            action = verb,
            error = %e,
            "Mutation failed"
        );
        self.notifier.error(message.clone());
        self.modal.fail(message);
        e.into()
    }
}

impl<C> CrudPage<C>
where
    C: Collection,
    C::Record: Searchable,
{
    /// Current page of the list after applying the search box.
    pub fn visible(&self) -> Page<C::Record> {
        list::query(&self.records, &self.query)
    }
}

impl<C: Creatable> CrudPage<C> {
    /// Open an empty create form.
    pub fn open_create(&mut self) -> C::Draft {
        self.selected = None;
        self.modal = ModalState::open(ModalMode::Create);
        C::Draft::default()
    }

    /// Validate locally, then create and re-fetch.
    ///
    /// A draft that fails validation never reaches the backend.
    pub async fn submit_create(&mut self, draft: C::Draft) -> ConsoleResult<()> {
        let draft = C::normalize(draft);
        if let Err(errors) = validate_form(&draft) {
            self.modal.reject_fields(errors.clone());
            return Err(ConsoleError::Validation(errors));
        }

        self.modal.begin_submit(ModalMode::Create)?;
        match self.collection.create(&draft).await {
            Ok(()) => {
                self.modal.succeed();
                self.notifier.success(format!("{} created successfully", self.collection.name()));
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.mutation_failed("create", e)),
        }
    }
}

impl<C: Editable> CrudPage<C> {
    /// Open the edit form prefilled from the last fetched snapshot.
    pub async fn open_edit(&mut self, id: &str) -> ConsoleResult<C::Form> {
        let record = match self.records.iter().find(|r| C::record_id(r) == id) {
            Some(record) => record.clone(),
            None => match self.collection.fetch_one(id).await {
                Ok(record) => record,
                Err(e) => {
                    self.notifier.error(e.user_message(&self.fallback("fetch")));
                    return Err(e.into());
                }
            },
        };
        let form = C::Form::from(&record);
        self.selected = Some(record);
        self.modal = ModalState::open(ModalMode::Edit);
        Ok(form)
    }

    /// Send the fields that differ from the snapshot.
    ///
    /// Returns `false` when nothing changed; no request is made and the modal
    /// closes.
    pub async fn submit_edit(&mut self, form: C::Form) -> ConsoleResult<bool> {
        let Some(snapshot) = self.selected.clone() else {
            return Err(ConsoleError::invalid_state("no record is being edited"));
        };

        let form = C::normalize_form(form);
        if let Err(errors) = validate_form(&form) {
            self.modal.reject_fields(errors.clone());
            return Err(ConsoleError::Validation(errors));
        }

        let patch = build_patch(&C::Form::from(&snapshot), &form)?;
        if patch.is_empty() {
            self.close_modal();
            self.notifier.info("No changes to save");
            return Ok(false);
        }

        self.modal.begin_submit(ModalMode::Edit)?;
        let id = C::record_id(&snapshot).to_string();
        tracing::debug!(
            page = self.collection.name(),
            id = %id,
            fields = patch.len(),
            "Submitting update"
        );
        match self.collection.update(&id, &patch).await {
            Ok(()) => {
                self.modal.succeed();
                self.selected = None;
                self.notifier.success(format!("{} updated successfully", self.collection.name()));
                self.refresh().await;
                Ok(true)
            }
            Err(e) => Err(self.mutation_failed("update", e)),
        }
    }

    /// First step of a delete: ask for confirmation.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> ConsoleResult<()> {
        let Some(id) = self.pending_delete.take() else {
            return Err(ConsoleError::invalid_state("no delete awaiting confirmation"));
        };
        match self.collection.delete(&id).await {
            Ok(()) => {
                self.notifier.success(format!("{} deleted successfully", self.collection.name()));
                if self.selected.as_ref().is_some_and(|r| C::record_id(r) == id) {
                    self.close_modal();
                }
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(&self.fallback("delete"));
                tracing::warn!(
                    page = self.collection.name(),
                    id = %id,
                    error = %e,
                    "Delete failed"
                );
                self.notifier.error(message);
                Err(e.into())
            }
        }
    }
}
