//! Session-idle hook for OpenCode.
//!
//! When a top-level session goes idle, [`IdleHandler`] looks at the last
//! message and sends a desktop notification previewing the assistant's reply.
//! Subagent sessions are skipped. Fetch failures are reported to the user as
//! error notifications rather than returned.
//!
//! # Example
//!
//! ```no_run
//! use hook::IdleHandler;
//! use notifier::NotifySend;
//! use opencode::{Event, OpencodeClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpencodeClient::builder("http://127.0.0.1:4096").build()?;
//! let handler = IdleHandler::new(client, NotifySend::new());
//!
//! let outcome = handler.handle(&Event::session_idle("ses_123")).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;

pub use error::{Error, Result};
pub use handler::{HandlerOptions, IdleHandler, Outcome};
