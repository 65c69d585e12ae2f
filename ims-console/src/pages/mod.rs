//! Console pages
//!
//! Each page owns its state and talks to the backend through an
//! [`ims_client::ImsClient`]. Shared plumbing lives in [`crud`] and [`state`].

pub mod auth;
pub mod batches;
pub mod crud;
pub mod dashboard;
pub mod filters;
pub mod home;
pub mod inventory;
pub mod master;
pub mod state;
pub mod users;

pub use auth::{AuthPage, Route};
pub use batches::{BatchCollection, BatchesPage};
pub use crud::{Collection, Creatable, CrudPage, Editable};
pub use dashboard::{CountState, DashboardPage};
pub use filters::{FilteredResources, FiltersPage};
pub use home::HomePage;
pub use inventory::{InventoryPage, MasterOptions, ResourceCollection};
pub use master::{MasterCollection, MasterDataPage};
pub use state::{ModalMode, ModalState, PageState};
pub use users::{UserCollection, UsersPage, users_page};
