use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("notification failed: {0}")]
    Notify(#[from] notifier::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
