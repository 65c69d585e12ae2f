//! Master data pages: resource classes, types and statuses

use async_trait::async_trait;
use ims_client::{ClientResult, HttpClient, ImsClient};
use shared::models::{MasterEntity, MasterForm, MasterKind};

use super::crud::{Collection, Creatable, CrudPage};
use crate::error::ConsoleResult;
use crate::notify::Notifier;

/// `/api/master/{kind}`
#[derive(Debug, Clone)]
pub struct MasterCollection<H> {
    client: ImsClient<H>,
    kind: MasterKind,
}

impl<H> MasterCollection<H> {
    pub fn new(client: ImsClient<H>, kind: MasterKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> MasterKind {
        self.kind
    }
}

#[async_trait]
impl<H: HttpClient> Collection for MasterCollection<H> {
    type Record = MasterEntity;

    fn name(&self) -> &'static str {
        self.kind.label()
    }

    fn record_id(record: &MasterEntity) -> &str {
        &record.id
    }

    async fn fetch_all(&self) -> ClientResult<Vec<MasterEntity>> {
        self.client.master(self.kind).list().await
    }

    async fn fetch_one(&self, id: &str) -> ClientResult<MasterEntity> {
        self.client.master(self.kind).get(id).await
    }
}

#[async_trait]
impl<H: HttpClient> Creatable for MasterCollection<H> {
    type Draft = MasterForm;

    fn normalize(mut draft: MasterForm) -> MasterForm {
        draft.name = draft.name.trim().to_string();
        draft
    }

    async fn create(&self, draft: &MasterForm) -> ClientResult<()> {
        self.client.master(self.kind).create(draft).await
    }
}

/// The three master lists, one tab each
#[derive(Debug)]
pub struct MasterDataPage<H: HttpClient> {
    classes: CrudPage<MasterCollection<H>>,
    types: CrudPage<MasterCollection<H>>,
    statuses: CrudPage<MasterCollection<H>>,
}

impl<H: HttpClient + Clone> MasterDataPage<H> {
    pub fn new(client: ImsClient<H>, notifier: Notifier) -> Self {
        let tab = |kind| {
            CrudPage::new(MasterCollection::new(client.clone(), kind), notifier.clone())
        };
        Self {
            classes: tab(MasterKind::ResourceClass),
            types: tab(MasterKind::ResourceType),
            statuses: tab(MasterKind::ResourceStatus),
        }
    }
}

impl<H: HttpClient> MasterDataPage<H> {
    pub fn tab(&self, kind: MasterKind) -> &CrudPage<MasterCollection<H>> {
        match kind {
            MasterKind::ResourceClass => &self.classes,
            MasterKind::ResourceType => &self.types,
            MasterKind::ResourceStatus => &self.statuses,
        }
    }

    pub fn tab_mut(&mut self, kind: MasterKind) -> &mut CrudPage<MasterCollection<H>> {
        match kind {
            MasterKind::ResourceClass => &mut self.classes,
            MasterKind::ResourceType => &mut self.types,
            MasterKind::ResourceStatus => &mut self.statuses,
        }
    }

    /// Load all three lists; each tab keeps its own error state.
    pub async fn mount(&mut self) -> ConsoleResult<()> {
        let (classes, types, statuses) =
            tokio::join!(self.classes.load(), self.types.load(), self.statuses.load());
        classes.and(types).and(statuses)
    }
}
