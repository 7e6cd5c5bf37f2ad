//! User lookup collaborator.

pub mod memory;

use async_trait::async_trait;

use incidenthub_core::result::AppResult;
use incidenthub_core::types::id::UserId;
use incidenthub_entity::user::User;

pub use memory::InMemoryUserDirectory;

/// Read access to user records owned by the storage layer.
///
/// Implementations return only the users that exist; unknown identifiers
/// are simply absent from the result. An `Err` means the lookup itself
/// failed (store unreachable, query error).
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch every user whose id appears in `ids`.
    async fn find_users_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>>;
}
