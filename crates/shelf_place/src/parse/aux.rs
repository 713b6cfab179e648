//! `.aux` parser: `RowBasedPlacement : a.nodes a.nets a.wts a.pl a.scl`.

use super::code;
use shelf_diagnostics::{Diagnostic, DiagnosticSink};
use shelf_source::{SourceFile, Span};

/// Returns the companion file names listed by an `.aux` file.
///
/// Names are returned as written, relative to the aux file's directory.
/// Emits `P006` and returns `None` when no `RowBasedPlacement` line is found.
pub fn parse_aux(file: &SourceFile, sink: &DiagnosticSink) -> Option<Vec<String>> {
    for line in file.lines() {
        let Some((key, rest)) = line.text.split_once(':') else {
            continue;
        };
        if key.trim() == "RowBasedPlacement" {
            return Some(rest.split_whitespace().map(str::to_string).collect());
        }
    }

    sink.emit(
        Diagnostic::warning(
            code(6),
            format!("`{}` does not list any design files", file.path.display()),
            Span::new(file.id, 0, 0),
        )
        .with_help("expected a line `RowBasedPlacement : <name>.nodes <name>.nets ...`"),
    );
    None
}
