//! Desktop notification dispatch through an external command.

use crate::shell;
use crate::{Error, Result};
use std::future::Future;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Icon used for ordinary notifications.
pub const INFO_ICON: &str = "dialog-information";

/// Icon used when the hook itself hit a problem.
pub const ERROR_ICON: &str = "dialog-error";

const DEFAULT_PROGRAM: &str = "notify-send";

/// A notification to show on the desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
}

impl Notification {
    /// Create a notification with the information icon.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: INFO_ICON.to_string(),
        }
    }

    /// Create a notification with the error icon.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::info(title, body).with_icon(ERROR_ICON)
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    fn icon_flag(&self) -> String {
        format!("--icon={}", self.icon)
    }
}

/// Something that can put a notification in front of the user.
pub trait Notifier: Send + Sync {
    /// Show the notification. Resolves once the underlying command exits.
    fn notify(&self, notification: &Notification) -> impl Future<Output = Result<()>> + Send;
}

/// Runs a notification program directly with an argument vector.
///
/// The program receives any configured leading arguments, then the title,
/// the body and `--icon=<icon>`. No shell is involved, so message text is
/// never interpreted.
#[derive(Debug, Clone)]
pub struct NotifySend {
    program: String,
    args: Vec<String>,
}

impl NotifySend {
    /// Use `notify-send` from `PATH`.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a different notification program.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the title.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for NotifySend {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifySend {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(&notification.title)
            .arg(&notification.body)
            .arg(notification.icon_flag());

        debug!(program = %self.program, title = %notification.title, "sending notification");
        run(cmd, &self.program).await
    }
}

/// Runs a shell command line with the quoted title, body and icon appended.
///
/// For notification commands that need shell features, such as
/// `dunstify -u low` or a pipeline. Every appended argument is single-quoted
/// with [`shell::quote`].
#[derive(Debug, Clone)]
pub struct ShellNotifier {
    command: String,
}

impl ShellNotifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The full command line handed to `sh -c`.
    pub fn command_line(&self, notification: &Notification) -> String {
        format!(
            "{} {} {} {}",
            self.command,
            shell::quote(&notification.title),
            shell::quote(&notification.body),
            shell::quote(&notification.icon_flag()),
        )
    }
}

impl Notifier for ShellNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(self.command_line(notification));

        debug!(command = %self.command, title = %notification.title, "sending notification via shell");
        run(cmd, &self.command).await
    }
}

/// Either notifier, chosen from configuration at startup.
#[derive(Debug, Clone)]
pub enum DesktopNotifier {
    Exec(NotifySend),
    Shell(ShellNotifier),
}

impl Notifier for DesktopNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        match self {
            Self::Exec(notifier) => notifier.notify(notification).await,
            Self::Shell(notifier) => notifier.notify(notification).await,
        }
    }
}

/// Run the command to completion with its output discarded.
async fn run(mut cmd: Command, label: &str) -> Result<()> {
    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|source| Error::Spawn {
            command: label.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(Error::ExitStatus {
            command: label.to_string(),
            status,
        });
    }
    Ok(())
}
