//! Shared test utilities: fake repositories and a mock photo server.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use photofeed::config::Config;
use photofeed::model::Photo;
use photofeed::repository::{NetworkError, PhotoRepository};

pub type FetchResult = Result<Vec<Photo>, NetworkError>;

pub fn photo(id: &str, img_src: &str) -> Photo {
    Photo {
        id: id.to_string(),
        img_src: img_src.to_string(),
    }
}

/// Repository that always succeeds with a fixed list.
pub struct FixedRepository {
    pub photos: Vec<Photo>,
}

#[async_trait]
impl PhotoRepository for FixedRepository {
    async fn fetch_all(&self) -> FetchResult {
        Ok(self.photos.clone())
    }
}

/// Repository that always fails with a server error.
pub struct FailingRepository;

#[async_trait]
impl PhotoRepository for FailingRepository {
    async fn fetch_all(&self) -> FetchResult {
        Err(NetworkError::Status { status: 500 })
    }
}

/// Repository whose calls block until the test releases them.
///
/// Each expected call must be queued up front with [`queue_gate`]; the
/// returned sender decides that call's outcome and when it settles. Used to
/// pin down orderings in refresh races and teardown tests.
///
/// [`queue_gate`]: GatedRepository::queue_gate
pub struct GatedRepository {
    gates: Mutex<VecDeque<oneshot::Receiver<FetchResult>>>,
    started: AtomicUsize,
}

impl GatedRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gates: Mutex::new(VecDeque::new()),
            started: AtomicUsize::new(0),
        })
    }

    /// Queue the gate for the next fetch call, in call order.
    pub fn queue_gate(&self) -> oneshot::Sender<FetchResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push_back(rx);
        tx
    }

    /// Number of fetch calls that have started (whether or not released).
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Wait until at least `n` fetch calls have started.
    pub async fn wait_for_started(&self, n: usize) {
        while self.started() < n {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl PhotoRepository for GatedRepository {
    async fn fetch_all(&self) -> FetchResult {
        let gate = self
            .gates
            .lock()
            .pop_front()
            .expect("no gate queued for this fetch call");
        self.started.fetch_add(1, Ordering::SeqCst);
        gate.await.expect("gate sender dropped before release")
    }
}

/// Spin up a mock photo server answering `GET /photos` with a canned
/// response, and return a client config pointing at it.
pub async fn mock_photos_server(status: u16, body: &'static str) -> (SocketAddr, Config) {
    let response_status = StatusCode::from_u16(status).expect("invalid mock status");
    let app = Router::new().route(
        "/photos",
        get(move || async move {
            (
                response_status,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock server");
    let addr = listener.local_addr().expect("failed to read mock address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server failed");
    });

    let config = Config {
        base_url: format!("http://{addr}"),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    (addr, config)
}

/// Reserve a port with nothing listening on it.
pub fn unused_port() -> u16 {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind to free port");
    let port = listener.local_addr().expect("failed to read port").port();
    drop(listener);
    port
}
