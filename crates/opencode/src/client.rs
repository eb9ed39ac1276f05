//! HTTP client for the OpenCode server API.

use crate::sse::{SseEvent, SseParser};
use crate::{Error, Event, Message, Result, Session};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::future::Future;
use tracing::{debug, warn};

/// Default address of a locally running `opencode serve`.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4096";

/// Read access to sessions and their messages.
///
/// The idle handler is written against this trait so tests can substitute a
/// canned implementation for the HTTP client.
pub trait SessionApi: Send + Sync {
    /// Fetch a session record by id.
    fn session(&self, id: &str) -> impl Future<Output = Result<Session>> + Send;

    /// Fetch the messages of a session, oldest first.
    fn messages(&self, id: &str) -> impl Future<Output = Result<Vec<Message>>> + Send;
}

/// Builder for creating an OpenCode client.
#[derive(Debug, Clone)]
pub struct OpencodeClientBuilder {
    base_url: String,
    directory: Option<String>,
}

impl OpencodeClientBuilder {
    /// Create a new builder for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            directory: None,
        }
    }

    /// Scope every request to the project instance serving `directory`.
    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<OpencodeClient> {
        let invalid = |reason: &str| Error::InvalidUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let base_url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a base url"));
        }

        Ok(OpencodeClient {
            client: reqwest::Client::new(),
            base_url,
            directory: self.directory,
        })
    }
}

/// Client for a running OpenCode server.
#[derive(Debug, Clone)]
pub struct OpencodeClient {
    client: reqwest::Client,
    base_url: Url,
    directory: Option<String>,
}

impl OpencodeClient {
    /// Create a builder for the client.
    pub fn builder(base_url: impl Into<String>) -> OpencodeClientBuilder {
        OpencodeClientBuilder::new(base_url)
    }

    /// Subscribe to the server's event bus.
    pub async fn events(&self) -> Result<EventStream> {
        let url = self.endpoint(&["event"]);
        debug!(%url, "subscribing to events");

        let response = self
            .client
            .get(url)
            .header("accept", "text/event-stream")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let response = check_status(response).await?;

        Ok(EventStream {
            response,
            parser: SseParser::new(),
            pending: VecDeque::new(),
            finished: false,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(directory) = &self.directory {
            url.query_pairs_mut().append_pair("directory", directory);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }
}

impl std::fmt::Display for OpencodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "opencode({})", self.base_url)
    }
}

impl SessionApi for OpencodeClient {
    async fn session(&self, id: &str) -> Result<Session> {
        self.get_json(self.endpoint(&["session", id])).await
    }

    async fn messages(&self, id: &str) -> Result<Vec<Message>> {
        self.get_json(self.endpoint(&["session", id, "message"]))
            .await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Api { status, body })
}

/// Events decoded from the server's `text/event-stream`.
pub struct EventStream {
    response: reqwest::Response,
    parser: SseParser,
    pending: VecDeque<SseEvent>,
    finished: bool,
}

impl EventStream {
    /// Wait for the next event. Returns `Ok(None)` once the server closes
    /// the stream.
    ///
    /// Payloads that are not valid event JSON are logged and skipped.
    pub async fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            if let Some(sse) = self.pending.pop_front() {
                match Event::from_json(&sse.data) {
                    Ok(event) => return Ok(Some(event)),
                    Err(e) => {
                        warn!(error = %e, data = %sse.data, "skipping malformed event");
                        continue;
                    }
                }
            }

            if self.finished {
                return Ok(None);
            }

            let chunk = self
                .response
                .chunk()
                .await
                .map_err(|e| Error::Network(e.to_string()))?;
            match chunk {
                Some(bytes) => self.pending.extend(self.parser.feed(&bytes)),
                None => {
                    self.finished = true;
                    self.pending.extend(self.parser.flush());
                }
            }
        }
    }
}
