//! Flash layout.
//!
//! This module defines the output buffer mirroring the target's flash
//! address space. Every byte starts out in the erased state and components
//! are copied over it at their offsets.

use std::collections::TryReserveError;

use crate::blob::Blob;
use crate::header::HEADER_LEN;

/// Value of an erased, unwritten flash byte.
pub const ERASED: u8 = 0xFF;

/// A flash-shaped byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
}

impl Image {
    /// Creates an image of `len` erased bytes.
    ///
    /// Fails instead of aborting when the buffer cannot be allocated.
    pub fn erased(len: usize) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, ERASED);
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Copies `bytes` to `offset`, replacing whatever was there.
    ///
    /// The image grows (with erased bytes) if the range extends past its end.
    pub fn place(&mut self, offset: usize, bytes: &[u8]) {
        let end = offset + bytes.len();
        if end > self.data.len() {
            self.data.resize(end, ERASED);
        }
        self.data[offset..end].copy_from_slice(bytes);
    }

    /// Stamps the boot signature over the first `HEADER_LEN` bytes.
    pub fn apply_header(&mut self, header: &[u8; HEADER_LEN]) {
        self.place(0, header);
    }
}

/// Two components whose flash ranges intersect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap<'a> {
    /// The component applied first (and partly overwritten).
    pub earlier: &'a str,
    /// The component applied later.
    pub later: &'a str,
    /// First shared offset.
    pub start: u64,
    /// One past the last shared offset.
    pub end: u64,
}

/// Finds every pair of blobs that would write to the same bytes.
///
/// Pairs are reported in apply order; empty blobs cover no bytes.
pub fn find_overlaps(blobs: &[Blob]) -> Vec<Overlap<'_>> {
    let mut overlaps = Vec::new();
    for (i, earlier) in blobs.iter().enumerate() {
        let a_end = earlier.offset.saturating_add(earlier.size());
        for later in &blobs[i + 1..] {
            let b_end = later.offset.saturating_add(later.size());
            let start = earlier.offset.max(later.offset);
            let end = a_end.min(b_end);
            if start < end {
                overlaps.push(Overlap {
                    earlier: &earlier.name,
                    later: &later.name,
                    start,
                    end,
                });
            }
        }
    }
    overlaps
}
