//! Bookshelf placement analysis and greedy row legalization.
//!
//! A [`Session`] ingests the four companion files of a Bookshelf design
//! (`.nodes`, `.pl`, `.scl`, `.nets`) from a [`SourceDb`](shelf_source::SourceDb)
//! and answers queries against either of two placement ledgers:
//!
//! - half-perimeter wirelength, per net and in total,
//! - node coordinates and size rankings,
//! - overlap, row alignment and bounds checks,
//! - row legalization with [`FirstFitLeftPack`] or [`RightToLeftPack`].
//!
//! Parsing never fails on a bad record. Skipped lines surface as warnings in
//! the caller's [`DiagnosticSink`](shelf_diagnostics::DiagnosticSink); only
//! session-level problems become a [`PlaceError`].

#![warn(missing_docs)]

pub mod data;
pub mod error;
pub mod legalize;
pub mod metrics;
pub mod parse;
pub mod report;
pub mod session;
pub mod store;
pub mod write;

pub use data::{Design, Die, Net, Node, NodeTable, Point, Rect, Row};
pub use error::{Collection, EntityKind, PlaceError, PlaceResult};
pub use legalize::{FirstFitLeftPack, Legalization, RightToLeftPack, RowLegalizer, Strategy};
pub use metrics::{LegalityDetails, LegalityReport, PlacedRect};
pub use report::{DesignSummary, ExtremeNets, NetWirelength, NodeSize};
pub use session::{EditOutcome, IngestOptions, IngestStats, Session, SharedSession, TrialStats};
pub use store::{Ledger, Placement};
pub use write::write_pl;
