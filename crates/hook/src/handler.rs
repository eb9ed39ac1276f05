//! The session-idle event handler.

use crate::Result;
use notifier::preview::{self, DEFAULT_WORD_LIMIT, FALLBACK_PREVIEW};
use notifier::{ERROR_ICON, INFO_ICON, Notification, Notifier};
use opencode::{Event, SessionApi};
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

const DEFAULT_TITLE: &str = "OpenCode";
const SESSION_FETCH_FAILED: &str = "Error: Failed to fetch session";
const NO_MESSAGES: &str = "Error: No messages found";

/// Presentation settings for notifications sent by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Title of every notification.
    pub title: String,
    /// Maximum number of words in a reply preview.
    pub word_limit: NonZeroUsize,
    pub info_icon: String,
    pub error_icon: String,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            word_limit: DEFAULT_WORD_LIMIT,
            info_icon: INFO_ICON.to_string(),
            error_icon: ERROR_ICON.to_string(),
        }
    }
}

/// What the handler did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event was not a session-idle event.
    Ignored,
    /// The idle session belongs to a subagent; nothing was sent.
    Subagent,
    /// A notification was dispatched.
    Notified(Notification),
}

/// Turns session-idle events into desktop notifications.
///
/// Holds no state between events, so a single handler can serve an entire
/// event stream.
pub struct IdleHandler<C, N> {
    client: C,
    notifier: N,
    options: HandlerOptions,
}

impl<C: SessionApi, N: Notifier> IdleHandler<C, N> {
    /// Create a handler with default options.
    pub fn new(client: C, notifier: N) -> Self {
        Self {
            client,
            notifier,
            options: HandlerOptions::default(),
        }
    }

    /// Replace the notification options.
    pub fn with_options(mut self, options: HandlerOptions) -> Self {
        self.options = options;
        self
    }

    /// Handle one event.
    ///
    /// Only a failing notification command is returned as an error; fetch
    /// failures are shown to the user as error notifications.
    pub async fn handle(&self, event: &Event) -> Result<Outcome> {
        let session_id = match event {
            Event::SessionIdle { properties } => properties.session_id.as_str(),
            Event::Unrecognized => return Ok(Outcome::Ignored),
        };

        let Some(notification) = self.compose(session_id).await else {
            debug!(session_id, "subagent session went idle, skipping");
            return Ok(Outcome::Subagent);
        };

        info!(session_id, body = %notification.body, "notifying");
        self.notifier.notify(&notification).await?;
        Ok(Outcome::Notified(notification))
    }

    /// Decide what to tell the user about an idle session. `None` means
    /// stay silent.
    async fn compose(&self, session_id: &str) -> Option<Notification> {
        let session = match self.client.session(session_id).await {
            Ok(session) => session,
            Err(e) => {
                warn!(session_id, error = %e, "failed to fetch session");
                return Some(self.error(SESSION_FETCH_FAILED));
            }
        };

        if session.is_subagent() {
            return None;
        }

        let messages = match self.client.messages(session_id).await {
            Ok(messages) => messages,
            Err(e) => {
                warn!(session_id, error = %e, "failed to fetch messages");
                return Some(self.error(NO_MESSAGES));
            }
        };

        let Some(last) = messages.last() else {
            return Some(self.error(NO_MESSAGES));
        };

        if !last.is_assistant() {
            debug!(session_id, role = %last.info.role, "last message is not from the assistant");
            return Some(self.info(FALLBACK_PREVIEW));
        }

        let body = match last.last_text() {
            Some(text) => preview::extract_preview(text, self.options.word_limit),
            None => FALLBACK_PREVIEW.to_string(),
        };
        Some(self.info(body))
    }

    fn info(&self, body: impl Into<String>) -> Notification {
        Notification::info(&self.options.title, body).with_icon(&self.options.info_icon)
    }

    fn error(&self, body: &str) -> Notification {
        Notification::error(&self.options.title, body).with_icon(&self.options.error_icon)
    }
}
