//! `.nodes` parser: `name width height [terminal]`.

use super::{code, is_boilerplate, parse_real};
use crate::data::{Node, NodeTable};
use shelf_diagnostics::{Diagnostic, DiagnosticSink};
use shelf_source::SourceFile;

/// Parses cell and terminal declarations.
///
/// Ids are lowercased. A line whose width or height is not a number is
/// skipped with `P001`. A repeated id overwrites the earlier attributes in
/// place and is noted with `P007`.
pub fn parse_nodes(file: &SourceFile, sink: &DiagnosticSink) -> NodeTable {
    let mut table = NodeTable::new();

    for line in file.lines() {
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        if is_boilerplate(&tokens) {
            continue;
        }
        if tokens.len() < 3 {
            sink.emit(Diagnostic::warning(
                code(1),
                format!("node record skipped: expected `name width height`, found `{}`", line.text.trim()),
                line.span,
            ));
            continue;
        }

        let (Some(width), Some(height)) = (parse_real(tokens[1]), parse_real(tokens[2])) else {
            sink.emit(Diagnostic::warning(
                code(1),
                format!("node record skipped: non-numeric size for `{}`", tokens[0]),
                line.span,
            ));
            continue;
        };

        let node = Node {
            name: tokens[0].to_lowercase(),
            width,
            height,
            is_terminal: tokens
                .get(3)
                .is_some_and(|t| t.eq_ignore_ascii_case("terminal")),
        };
        let name = node.name.clone();
        if table.insert(node).is_some() {
            sink.emit(
                Diagnostic::note(code(7), format!("node `{name}` declared again"), line.span)
                    .with_note("the later declaration replaces the earlier size"),
            );
        }
    }

    table
}
