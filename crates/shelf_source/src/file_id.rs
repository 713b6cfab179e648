//! Opaque identifier for a file registered in a [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Index of a file within one ingestion batch.
///
/// Ids are handed out in registration order and are only meaningful for the
/// [`SourceDb`](crate::SourceDb) that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Placeholder for diagnostics that are not tied to any input file.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Wraps a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
