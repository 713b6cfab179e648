//! Structured diagnostics for Bookshelf ingestion and legalization.
//!
//! Parsers never abort on a bad record: they skip it and emit a
//! [`Diagnostic`] into a [`DiagnosticSink`]. Front ends drain the sink and
//! format its contents with a [`DiagnosticRenderer`] or serialize them as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
