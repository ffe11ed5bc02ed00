//! Photo repository capability and its network-backed implementation.
//!
//! The repository is the single upstream collaborator of the fetch
//! controller: one operation, `fetch_all`, returning the photo list in
//! server order or a classified [`NetworkError`].

mod error;
mod network;

pub use error::NetworkError;
pub use network::NetworkPhotoRepository;

use async_trait::async_trait;

use crate::model::Photo;

/// Capability for fetching the photo list.
///
/// Implementations must be stateless with respect to callers: the same
/// instance may be shared across controllers behind an `Arc` without
/// synchronization.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Fetch all photos, preserving server order. The list may be empty.
    async fn fetch_all(&self) -> Result<Vec<Photo>, NetworkError>;
}
