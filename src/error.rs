use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A startup asset (the data directory or the tilesheet) is missing or unreadable.
    #[error("Could not find {what} ({})", .path.display())]
    ResourceNotFound { what: String, path: PathBuf },

    /// The window or terminal backend could not be brought up.
    #[error("Failed to initialize render backend: {0}")]
    BackendInit(String),

    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
