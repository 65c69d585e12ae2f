//! REST wrappers
//!
//! One thin wrapper per backend resource. Every call branches on the
//! envelope's `success` flag; a 2xx answer with `success: false` is an error.

mod auth;
mod batches;
mod dashboard;
mod master;
mod resources;
mod users;

pub use auth::AuthApi;
pub use batches::BatchApi;
pub use dashboard::DashboardApi;
pub use master::MasterApi;
pub use resources::ResourceApi;
pub use users::UserApi;

use shared::models::MasterKind;

use crate::client::{HttpClient, NetworkHttpClient};
use crate::session::SessionContext;
use crate::{ApiResponse, ClientConfig, ClientError, ClientResult};

/// Entry point to the backend API over a transport `H`
#[derive(Debug, Clone)]
pub struct ImsClient<H> {
    http: H,
}

impl ImsClient<NetworkHttpClient> {
    /// Network client for `config`, authenticated through `session`.
    pub fn connect(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config, session)?))
    }
}

impl<H: HttpClient> ImsClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn session(&self) -> &SessionContext {
        self.http.session()
    }

    pub fn auth(&self) -> AuthApi<'_, H> {
        AuthApi::new(&self.http)
    }

    pub fn resources(&self) -> ResourceApi<'_, H> {
        ResourceApi::new(&self.http)
    }

    pub fn batches(&self) -> BatchApi<'_, H> {
        BatchApi::new(&self.http)
    }

    pub fn master(&self, kind: MasterKind) -> MasterApi<'_, H> {
        MasterApi::new(&self.http, kind)
    }

    pub fn dashboard(&self) -> DashboardApi<'_, H> {
        DashboardApi::new(&self.http)
    }

    pub fn users(&self) -> UserApi<'_, H> {
        UserApi::new(&self.http)
    }
}

/// Payload of a successful envelope; `what` names it in the error otherwise.
pub(crate) fn into_data<T>(resp: ApiResponse<T>, what: &str) -> ClientResult<T> {
    if !resp.success {
        tracing::warn!(message = ?resp.message, "{} rejected by server", what);
        return Err(ClientError::Rejected {
            message: resp.message,
        });
    }
    resp.data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
}

/// Acknowledgement of a mutation; any payload is ignored.
pub(crate) fn into_ack(resp: ApiResponse<serde_json::Value>, what: &str) -> ClientResult<()> {
    if !resp.success {
        tracing::warn!(message = ?resp.message, "{} rejected by server", what);
        return Err(ClientError::Rejected {
            message: resp.message,
        });
    }
    Ok(())
}

/// Percent-encode an identifier for use as a path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
