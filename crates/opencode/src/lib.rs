//! Client and wire types for the OpenCode server.
//!
//! The idle hook only needs three things from the server: the session record
//! (to tell top-level sessions from subagents), the message list (to find the
//! last assistant reply), and the event bus (to learn when a session goes
//! idle).
//!
//! # Example
//!
//! ```no_run
//! use opencode::{Event, OpencodeClient, SessionApi};
//!
//! # async fn example() -> opencode::Result<()> {
//! let client = OpencodeClient::builder("http://127.0.0.1:4096").build()?;
//! let mut events = client.events().await?;
//!
//! while let Some(event) = events.next_event().await? {
//!     if let Event::SessionIdle { properties } = event {
//!         let messages = client.messages(&properties.session_id).await?;
//!         println!("{} is idle with {} messages", properties.session_id, messages.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod sse;
mod types;

pub use client::{
    DEFAULT_SERVER_URL, EventStream, OpencodeClient, OpencodeClientBuilder, SessionApi,
};
pub use error::{Error, Result};
pub use types::{Event, IdleProperties, Message, MessageInfo, Part, Role, Session};
