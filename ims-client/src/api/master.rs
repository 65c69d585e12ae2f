//! `/api/master/{resource-class,resource-type,resource-status}`

use shared::models::{MasterEntity, MasterForm, MasterKind};

use super::{into_ack, into_data, segment};
use crate::client::HttpClient;
use crate::{ApiResponse, ClientResult};

pub struct MasterApi<'a, H> {
    http: &'a H,
    kind: MasterKind,
}

impl<'a, H: HttpClient> MasterApi<'a, H> {
    pub(crate) fn new(http: &'a H, kind: MasterKind) -> Self {
        Self { http, kind }
    }

    fn base(&self) -> String {
        format!("/api/master/{}", self.kind.path_segment())
    }

    pub async fn list(&self) -> ClientResult<Vec<MasterEntity>> {
        let resp: ApiResponse<Vec<MasterEntity>> = self.http.get(&self.base()).await?;
        into_data(resp, self.kind.label())
    }

    pub async fn get(&self, id: &str) -> ClientResult<MasterEntity> {
        let resp: ApiResponse<MasterEntity> = self
            .http
            .get(&format!("{}/{}", self.base(), segment(id)))
            .await?;
        into_data(resp, self.kind.label())
    }

    pub async fn create(&self, form: &MasterForm) -> ClientResult<()> {
        let resp = self.http.post(&self.base(), form).await?;
        into_ack(resp, self.kind.label())
    }
}
