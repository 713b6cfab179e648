//! `.pl` parser: `name x y [: orientation] [/FIXED]`.

use super::{code, is_boilerplate, parse_real};
use crate::data::Point;
use crate::store::Placement;
use shelf_diagnostics::{Diagnostic, DiagnosticSink};
use shelf_source::SourceFile;

/// Parses node origins.
///
/// A line qualifies when it has at least three tokens and the second and
/// third are numbers; everything after the coordinates is ignored. Ids keep
/// their case here. A later line for the same id wins.
pub fn parse_pl(file: &SourceFile, sink: &DiagnosticSink) -> Placement {
    let mut placement = Placement::new();

    for line in file.lines() {
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        if is_boilerplate(&tokens) {
            continue;
        }
        let coords = match tokens.as_slice() {
            [_, x, y, ..] => parse_real(x).zip(parse_real(y)),
            _ => None,
        };
        match coords {
            Some((x, y)) => placement.set(tokens[0], Point::new(x, y)),
            None => sink.emit(Diagnostic::warning(
                code(2),
                format!("placement record skipped: expected `name x y`, found `{}`", line.text.trim()),
                line.span,
            )),
        }
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_source::SourceDb;

    fn parse(text: &str) -> (Placement, DiagnosticSink) {
        let mut db = SourceDb::new();
        let id = db.add_source("t.pl", text.to_string());
        let sink = DiagnosticSink::new();
        let placement = parse_pl(db.get_file(id), &sink);
        (placement, sink)
    }

    #[test]
    fn reads_origins_and_ignores_trailer() {
        let (pl, sink) = parse("UCLA pl 1.0\n\nO0 10 20 : N\np0 0 0 : N /FIXED\n");
        assert_eq!(pl.len(), 2);
        assert_eq!(pl.get("O0"), Some(Point::new(10.0, 20.0)));
        assert!(pl.get("o0").is_none());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn later_line_wins() {
        let (pl, _) = parse("a 1 1\na 2 3\n");
        assert_eq!(pl.len(), 1);
        assert_eq!(pl.get("a"), Some(Point::new(2.0, 3.0)));
    }

    #[test]
    fn non_numeric_coordinates_warn() {
        let (pl, sink) = parse("a x 1\nb 2\nc 4 5\n");
        assert_eq!(pl.len(), 1);
        assert_eq!(sink.diagnostics().len(), 2);
        assert_eq!(format!("{}", sink.diagnostics()[0].code), "P002");
    }
}
