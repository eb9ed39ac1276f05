//! Notification side of the idle hook.
//!
//! Two independent pieces live here:
//!
//! - [`preview`] turns a raw assistant reply into a short single-line summary
//!   with code stripped out.
//! - [`Notifier`] implementations hand a [`Notification`] to an external
//!   command, either directly ([`NotifySend`]) or through `sh -c`
//!   ([`ShellNotifier`], which quotes arguments with [`shell::quote`]).
//!
//! # Example
//!
//! ```no_run
//! use notifier::{Notification, Notifier, NotifySend, preview};
//!
//! # async fn example() -> notifier::Result<()> {
//! let body = preview::extract_preview("All done! ```diff\n+fix\n```", preview::DEFAULT_WORD_LIMIT);
//! NotifySend::new()
//!     .notify(&Notification::info("OpenCode", body))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod error;
pub mod preview;
pub mod shell;

pub use dispatch::{
    DesktopNotifier, ERROR_ICON, INFO_ICON, Notification, Notifier, NotifySend, ShellNotifier,
};
pub use error::{Error, Result};
