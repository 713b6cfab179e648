//! Bookshelf input files, their classification, and line-level source spans.
//!
//! The [`SourceDb`] owns the text of every file in an ingestion batch. Each
//! file is tagged with the [`FileKind`] derived from its extension, and
//! [`SourceFile::lines`] hands parsers one [`SourceLine`] at a time so every
//! skipped record can be reported with a [`Span`] pointing back at its line.

#![warn(missing_docs)]

pub mod file_id;
pub mod kind;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use kind::FileKind;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::{SourceFile, SourceLine};
pub use span::Span;
