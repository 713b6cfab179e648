//! Errors reported by session operations.

use crate::store::Ledger;
use shelf_source::FileKind;
use std::fmt;

/// Result type for session operations.
pub type PlaceResult<T> = Result<T, PlaceError>;

/// A query or command that cannot be answered from the current state.
///
/// Malformed input records are not errors; parsers skip them and report a
/// diagnostic instead. Nodes that legalization cannot place are part of a
/// normal result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaceError {
    /// An ingestion batch lacked one or more required file kinds.
    #[error("missing required file(s): {}", list_missing(.0))]
    MissingInput(Vec<FileKind>),

    /// A node or net id does not exist in the current state.
    #[error("{kind} `{id}` not found")]
    NotFound {
        /// What was looked up.
        kind: EntityKind,
        /// The id as given by the caller.
        id: String,
    },

    /// The operation needs a collection that is empty or was never ingested.
    #[error("no {0} available")]
    NoData(Collection),
}

impl PlaceError {
    pub(crate) fn node_not_found(id: &str) -> Self {
        PlaceError::NotFound {
            kind: EntityKind::Node,
            id: id.to_string(),
        }
    }

    pub(crate) fn net_not_found(id: &str) -> Self {
        PlaceError::NotFound {
            kind: EntityKind::Net,
            id: id.to_string(),
        }
    }
}

fn list_missing(kinds: &[FileKind]) -> String {
    kinds
        .iter()
        .map(|k| format!(".{k}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The kind of entity a [`PlaceError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A cell or terminal.
    Node,
    /// A hyperedge.
    Net,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Net => write!(f, "net"),
        }
    }
}

/// A collection an operation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Parsed `.nodes` entries.
    Nodes,
    /// Parsed `.scl` rows.
    Rows,
    /// Parsed `.nets` hyperedges.
    Nets,
    /// Entries of one placement ledger.
    Placement(Ledger),
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Nodes => write!(f, "nodes"),
            Collection::Rows => write!(f, "rows"),
            Collection::Nets => write!(f, "nets"),
            Collection::Placement(ledger) => write!(f, "{ledger} placement"),
        }
    }
}
