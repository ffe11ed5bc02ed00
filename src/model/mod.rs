//! Data contract for the remote photo feed.

use serde::{Deserialize, Serialize};

/// One photo entry as served by the feed API.
///
/// Instances are created only by deserializing a repository response and are
/// never mutated; a new fetch replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Server-assigned identifier.
    pub id: String,
    /// Absolute URL of the image.
    pub img_src: String,
}
