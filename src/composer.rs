//! Core composition logic.
//!
//! This module contains the `Composer` struct which orchestrates building an image:
//! 1. Input Collection: Resolves declared sources into blobs, in apply order.
//! 2. Sizing: The image ends at the highest `offset + size` of any component.
//! 3. Placement: Copies each component over an erased buffer, later ones winning.
//! 4. Signature: Optionally stamps the boot header over offset 0, last of all.

use crate::blob::{Blob, BlobSource};
use crate::error::{Error, Result};
use crate::header::header_bytes;
use crate::layout::{find_overlaps, Image};

/// One line of the component summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub name: &'a str,
    pub offset: u64,
    pub size: u64,
}

#[derive(Debug, Default)]
pub struct Composer {
    blobs: Vec<Blob>,
    add_header: bool,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the boot signature at offset 0.
    pub fn set_header(&mut self, add_header: bool) {
        self.add_header = add_header;
    }

    /// Appends a component. Components are applied in the order they are added.
    pub fn add_blob(&mut self, blob: Blob) {
        self.blobs.push(blob);
    }

    /// Resolves `source` and appends it. Returns whether it was included.
    pub fn add_source(&mut self, source: &BlobSource) -> Result<bool> {
        match source.resolve()? {
            Some(blob) => {
                tracing::debug!(
                    "Adding {} from {} at {:#x} ({} bytes)",
                    blob.name,
                    source.path.display(),
                    blob.offset,
                    blob.size()
                );
                self.add_blob(blob);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn components(&self) -> &[Blob] {
        &self.blobs
    }

    /// Included components in apply order.
    pub fn report(&self) -> impl Iterator<Item = Placement<'_>> {
        self.blobs.iter().map(|blob| Placement {
            name: &blob.name,
            offset: blob.offset,
            size: blob.size(),
        })
    }

    /// Size of the image `compose` would produce.
    pub fn image_size(&self) -> Result<u64> {
        let mut end = 0;
        for blob in &self.blobs {
            end = end.max(blob.end()?);
        }
        Ok(end)
    }

    /// Builds the image.
    pub fn compose(&self) -> Result<Image> {
        let size = self.image_size()?;
        let len = usize::try_from(size).map_err(|_| self.out_of_range(size))?;

        for overlap in find_overlaps(&self.blobs) {
            tracing::warn!(
                "{} overwrites {} in range {:#x}..{:#x}",
                overlap.later,
                overlap.earlier,
                overlap.start,
                overlap.end
            );
        }

        let mut image = Image::erased(len).map_err(|_| self.out_of_range(size))?;
        for blob in &self.blobs {
            // Fits: no end exceeds `len`.
            image.place(blob.offset as usize, blob.data());
            tracing::debug!("Placed {} at {:#x}", blob.name, blob.offset);
        }

        if self.add_header {
            image.apply_header(&header_bytes());
            tracing::debug!("Wrote boot signature at 0x0");
        }

        Ok(image)
    }

    /// Blames the component that ends at `end` for an image that cannot be built.
    fn out_of_range(&self, end: u64) -> Error {
        let (name, offset, size) = self
            .blobs
            .iter()
            .find(|blob| blob.end().ok() == Some(end))
            .map(|blob| (blob.name.clone(), blob.offset, blob.size()))
            .unwrap_or_default();
        Error::OutOfRange { name, offset, size }
    }
}
