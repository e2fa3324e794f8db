//! Input binaries.
//!
//! A `Blob` is an opaque pre-built binary (bootloader, partition table,
//! application) destined for a fixed flash offset. A `BlobSource` is the
//! user's declaration of where to find one and whether the image can be
//! built without it.

use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Backing storage for a blob's contents.
pub enum BlobData {
    /// Read-only mapping of the source file.
    Mapped(Mmap),
    /// Bytes supplied directly by the caller.
    Owned(Vec<u8>),
}

impl Deref for BlobData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            BlobData::Mapped(mmap) => &mmap[..],
            BlobData::Owned(bytes) => &bytes[..],
        }
    }
}

/// A binary placed verbatim into the image at `offset`.
pub struct Blob {
    /// Logical component name (e.g. "boot", "partition", "app").
    pub name: String,
    /// Absolute flash offset of the first byte.
    pub offset: u64,
    data: BlobData,
}

impl Blob {
    /// Creates a blob from bytes already in memory.
    pub fn from_bytes(name: impl Into<String>, offset: u64, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            offset,
            data: BlobData::Owned(bytes.into()),
        }
    }

    /// Maps the file at `path` as the contents of a blob.
    pub fn load(name: impl Into<String>, path: &Path, offset: u64) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::storage(path, e))?;
        let len = file.metadata().map_err(|e| Error::storage(path, e))?.len();

        let data = if len == 0 {
            BlobData::Owned(Vec::new())
        } else {
            // Sources must not be modified while the image is being composed.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::storage(path, e))?;
            BlobData::Mapped(mmap)
        };

        Ok(Self {
            name: name.into(),
            offset,
            data,
        })
    }

    /// The bytes placed into the image.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length of the contents in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The first offset past this blob.
    pub fn end(&self) -> Result<u64> {
        self.offset
            .checked_add(self.size())
            .ok_or_else(|| Error::OutOfRange {
                name: self.name.clone(),
                offset: self.offset,
                size: self.size(),
            })
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("name", &self.name)
            .field("offset", &format_args!("{:#x}", self.offset))
            .field("size", &self.size())
            .finish()
    }
}

/// Whether the image can be produced without a given source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

/// Where a component comes from and where it goes.
#[derive(Debug, Clone)]
pub struct BlobSource {
    pub name: String,
    pub path: PathBuf,
    pub offset: u64,
    pub requirement: Requirement,
}

impl BlobSource {
    pub fn required(name: impl Into<String>, path: impl Into<PathBuf>, offset: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            offset,
            requirement: Requirement::Required,
        }
    }

    pub fn optional(name: impl Into<String>, path: impl Into<PathBuf>, offset: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            offset,
            requirement: Requirement::Optional,
        }
    }

    /// Loads the source if it names an existing regular file.
    ///
    /// A missing optional source is dropped with a warning and yields
    /// `Ok(None)`. A missing required source is an error. A source that
    /// exists but cannot be read is always an error.
    pub fn resolve(&self) -> Result<Option<Blob>> {
        if !self.path.is_file() {
            return match self.requirement {
                Requirement::Required => Err(Error::MissingRequiredInput {
                    name: self.name.clone(),
                    path: self.path.clone(),
                }),
                Requirement::Optional => {
                    tracing::warn!(
                        "{} not found at {}, leaving it out of the image",
                        self.name,
                        self.path.display()
                    );
                    Ok(None)
                }
            };
        }

        Blob::load(self.name.clone(), &self.path, self.offset).map(Some)
    }
}
