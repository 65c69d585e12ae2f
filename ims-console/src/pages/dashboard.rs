//! Admin dashboard: resource counts by dimension

use futures::future::join_all;
use ims_client::{HttpClient, ImsClient};
use shared::models::{CountDimension, CountEntry};

/// State of one chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CountState {
    #[default]
    Idle,
    Loaded(Vec<CountEntry>),
    Error(String),
}

#[derive(Debug)]
pub struct DashboardPage<H> {
    client: ImsClient<H>,
    counts: Vec<(CountDimension, CountState)>,
}

impl<H: HttpClient> DashboardPage<H> {
    pub fn new(client: ImsClient<H>) -> Self {
        Self {
            client,
            counts: CountDimension::ALL
                .iter()
                .map(|d| (*d, CountState::Idle))
                .collect(),
        }
    }

    /// Fetch all four counts concurrently. A failing dimension only marks its
    /// own chart as failed.
    pub async fn load(&mut self) {
        let client = &self.client;
        let results = join_all(
            CountDimension::ALL
                .iter()
                .map(|dim| async move { (*dim, client.dashboard().count_by(*dim).await) }),
        )
        .await;

        self.counts = results
            .into_iter()
            .map(|(dim, result)| {
                let state = match result {
                    Ok(entries) => CountState::Loaded(entries),
                    Err(e) => {
                        tracing::warn!(
                            dimension = dim.path_suffix(),
                            error = %e,
                            "Dashboard count failed"
                        );
                        CountState::Error(e.user_message("Failed to load dashboard data"))
                    }
                };
                (dim, state)
            })
            .collect();
    }

    pub fn counts(&self) -> &[(CountDimension, CountState)] {
        &self.counts
    }

    pub fn count(&self, dimension: CountDimension) -> Option<&CountState> {
        self.counts
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, state)| state)
    }
}
