//! One-shot discovery of joinable servers

use crate::error::FetchError;
use log::{debug, info, warn};
use reqwest::StatusCode;
use shared::ServerDirectory;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

pub type DirectoryResult = Result<ServerDirectory, FetchError>;

pub struct DirectoryFetcher {
    http: reqwest::Client,
    url: String,
}

impl DirectoryFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Requests the directory once. No retry, and no timeout beyond the
    /// client's own defaults.
    pub async fn fetch(self) -> DirectoryResult {
        info!("Fetching server directory from {}", self.url);

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::new(format!("unexpected status {}", status)));
        }

        let body = response.text().await?;
        let directory = parse_directory(&body)?;
        info!("Server directory lists {} server(s)", directory.len());
        Ok(directory)
    }

    /// Runs the fetch on `handle`. A result that settles after the receiver
    /// is gone is dropped.
    pub fn spawn(self, handle: &Handle) -> oneshot::Receiver<DirectoryResult> {
        let (tx, rx) = oneshot::channel();
        handle.spawn(self.fetch_into(tx));
        rx
    }

    async fn fetch_into(self, tx: oneshot::Sender<DirectoryResult>) {
        let result = self.fetch().await;
        if tx.send(result).is_err() {
            debug!("Directory result discarded, nobody is listening");
        }
    }
}

/// Parses a `/serverinfo` body: a JSON array of address strings.
pub fn parse_directory(body: &str) -> DirectoryResult {
    let directory: ServerDirectory = serde_json::from_str(body)?;

    for entry in directory.entries() {
        if !entry.as_str().starts_with('/') {
            warn!("Server address {:?} has no leading '/'", entry.as_str());
        }
    }

    Ok(directory)
}
