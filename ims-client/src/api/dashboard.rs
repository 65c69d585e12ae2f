//! `/api/admin/dashboard/count-by-*`

use shared::models::{CountDimension, CountEntry};

use super::into_data;
use crate::client::HttpClient;
use crate::{ApiResponse, ClientResult};

pub struct DashboardApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> DashboardApi<'a, H> {
    pub(crate) fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn count_by(&self, dimension: CountDimension) -> ClientResult<Vec<CountEntry>> {
        let path = format!("/api/admin/dashboard/count-by-{}", dimension.path_suffix());
        let resp: ApiResponse<Vec<CountEntry>> = self.http.get(&path).await?;
        into_data(resp, "dashboard count")
    }
}
