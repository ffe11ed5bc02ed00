//! Reactive fetch-state client for a remote photo feed.
//!
//! The crate wraps a single REST resource (a photo list) in a
//! [`FetchController`](controller::FetchController) that exposes the fetch
//! lifecycle as a tri-state value: `Loading`, `Success(photos)`, or `Error`.
//! Renderers subscribe to the state; the only command back into the
//! controller is `refresh()`.

pub mod config;
pub mod controller;
pub mod model;
pub mod repository;

pub use config::Config;
pub use controller::{FetchController, FetchState};
pub use model::Photo;
pub use repository::{NetworkError, NetworkPhotoRepository, PhotoRepository};
