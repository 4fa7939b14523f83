//! Loading the user listing from the remote endpoint.
//!
//! [`UserSource`] is the seam between the UI and the network. The real
//! implementation is [`HttpUserSource`]; [`spawn_fetch`] runs a source on a
//! worker thread so the event loop stays responsive while the request is
//! in flight.
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::error::FetchError;
use crate::model::{User, decode_users};

/// Fixed listing endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Result of one request for the listing, as delivered to the event loop.
pub type FetchOutcome = Result<Vec<User>, FetchError>;

pub trait UserSource: Send + Sync {
    fn list_users(&self) -> FetchOutcome;
}

/// Plain GET against a JSON endpoint. No auth, no query, no retries.
pub struct HttpUserSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl UserSource for HttpUserSource {
    fn list_users(&self) -> FetchOutcome {
        let response = self.client.get(&self.endpoint).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.bytes()?;
        decode_users(&body)
    }
}

/// Ask `source` for the listing once and log how it went.
pub fn load_users(source: &dyn UserSource) -> FetchOutcome {
    match source.list_users() {
        Ok(users) => {
            tracing::info!(count = users.len(), "loaded users");
            Ok(users)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load users");
            Err(err)
        }
    }
}

/// Run [`load_users`] on a worker thread and send the outcome to `tx`.
///
/// Overlapping calls are not de-duplicated; whichever finishes last is
/// applied last. A closed channel means the view is gone and the outcome
/// is dropped.
pub fn spawn_fetch(
    source: Arc<dyn UserSource>,
    tx: Sender<FetchOutcome>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("user-fetch".to_string())
        .spawn(move || {
            let outcome = load_users(source.as_ref());
            if tx.send(outcome).is_err() {
                tracing::debug!("view closed before users arrived; dropping result");
            }
        })
}
