//! Error types for image composition.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The one input the image cannot be built without is absent.
    #[error("{name} binary not found at {}", path.display())]
    MissingRequiredInput { name: String, path: PathBuf },

    /// Reading a present source or writing the destination failed.
    #[error("I/O error on {}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A component ends beyond what the image can address.
    #[error("{name} at {offset:#x} with size {size} does not fit in the image address space")]
    OutOfRange { name: String, offset: u64, size: u64 },
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }
}
