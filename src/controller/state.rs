//! The observable fetch state.

use crate::model::Photo;

/// Result of the most recent fetch attempt.
///
/// Exactly one value is current at any observable instant. `Loading` is both
/// the initial state and the state during every in-flight attempt; a settled
/// attempt replaces it with `Success` or `Error` wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// A fetch attempt is in flight (or none has been issued yet).
    #[default]
    Loading,
    /// The last attempt completed; photos are in server order, possibly empty.
    Success(Vec<Photo>),
    /// The last attempt failed. Failure detail is logged, not surfaced.
    Error,
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// True once an attempt has settled, successfully or not.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// The photo list, if the last attempt succeeded.
    pub fn photos(&self) -> Option<&[Photo]> {
        match self {
            FetchState::Success(photos) => Some(photos),
            _ => None,
        }
    }
}
