//! `.scl` parser: `CoreRow Horizontal` ... `End` blocks.
//!
//! ```text
//! CoreRow Horizontal
//!   Coordinate   : 459
//!   Height       : 12
//!   Sitewidth    : 1
//!   Sitespacing  : 1
//!   Siteorient   : 1
//!   Sitesymmetry : 1
//!   SubrowOrigin : 459  NumSites : 10692
//! End
//! ```

use super::{code, parse_real};
use crate::data::Row;
use shelf_diagnostics::{Diagnostic, DiagnosticSink};
use shelf_source::{SourceFile, Span};

/// Fields captured for the row currently open.
#[derive(Default)]
struct RowDraft {
    coordinate: Option<f64>,
    height: Option<f64>,
    site_width: Option<f64>,
    site_spacing: Option<f64>,
    subrow_origin: Option<f64>,
    num_sites: Option<f64>,
}

impl RowDraft {
    fn finish(self) -> Result<Row, Vec<&'static str>> {
        match (
            self.coordinate,
            self.height,
            self.site_width,
            self.subrow_origin,
            self.num_sites,
        ) {
            (Some(coordinate), Some(height), Some(site_width), Some(subrow_origin), Some(num_sites)) => {
                Ok(Row {
                    coordinate,
                    height,
                    site_width,
                    site_spacing: self.site_spacing,
                    subrow_origin,
                    num_sites,
                })
            }
            _ => {
                let missing = [
                    ("Coordinate", self.coordinate),
                    ("Height", self.height),
                    ("Sitewidth", self.site_width),
                    ("SubrowOrigin", self.subrow_origin),
                    ("NumSites", self.num_sites),
                ]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(label, _)| label)
                .collect();
                Err(missing)
            }
        }
    }
}

/// Parses site rows in file order.
///
/// Field lines are matched by label substring after collapsing whitespace;
/// `NumSites` and `Numsites` are both accepted. A field whose value is not a
/// number is left unset with `P003`, and a block that reaches `End` without
/// all of coordinate, height, site width, subrow origin and site count is
/// dropped with `P004`. Lines outside a block are ignored.
pub fn parse_scl(file: &SourceFile, sink: &DiagnosticSink) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut open: Option<(RowDraft, Span)> = None;

    for line in file.lines() {
        let text = line
            .text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace("NumSites", "Numsites");

        if text.contains("CoreRow Horizontal") {
            open = Some((RowDraft::default(), line.span));
            continue;
        }
        let Some((draft, start)) = open.as_mut() else {
            continue;
        };
        if text.contains("End") {
            let start = *start;
            if let Some((draft, _)) = open.take() {
                match draft.finish() {
                    Ok(row) => rows.push(row),
                    Err(missing) => sink.emit(
                        Diagnostic::warning(code(4), "incomplete row discarded", start)
                            .with_note(format!("missing: {}", missing.join(", "))),
                    ),
                }
            }
            continue;
        }

        let (label, slot, value) = if text.contains("Coordinate :") {
            ("Coordinate", &mut draft.coordinate, after_colon(&text))
        } else if text.contains("Height :") {
            ("Height", &mut draft.height, after_colon(&text))
        } else if text.contains("Sitewidth :") {
            ("Sitewidth", &mut draft.site_width, after_colon(&text))
        } else if text.contains("Sitespacing :") {
            ("Sitespacing", &mut draft.site_spacing, after_colon(&text))
        } else if text.contains("SubrowOrigin :") && text.contains("Numsites :") {
            match split_origin_sites(&text) {
                Some((origin, sites)) => {
                    draft.subrow_origin = Some(origin);
                    draft.num_sites = Some(sites);
                }
                None => sink.emit(Diagnostic::warning(
                    code(3),
                    "invalid `SubrowOrigin`/`NumSites` values in row",
                    line.span,
                )),
            }
            continue;
        } else {
            continue;
        };

        match value {
            Some(v) => *slot = Some(v),
            None => sink.emit(Diagnostic::warning(
                code(3),
                format!("invalid `{label}` value in row"),
                line.span,
            )),
        }
    }

    if let Some((_, start)) = open {
        sink.emit(
            Diagnostic::warning(code(4), "incomplete row discarded", start)
                .with_note("file ended before `End`"),
        );
    }

    rows
}

/// The value between the first and second colon.
fn after_colon(text: &str) -> Option<f64> {
    text.split(':').nth(1).and_then(parse_real)
}

fn split_origin_sites(text: &str) -> Option<(f64, f64)> {
    let (_, rest) = text.split_once("SubrowOrigin :")?;
    let (origin, sites) = rest.split_once("Numsites :")?;
    Some((parse_real(origin)?, parse_real(sites)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (Vec<Row>, DiagnosticSink) {
        let mut db = shelf_source::SourceDb::new();
        let id = db.add_source("t.scl", text.to_string());
        let sink = DiagnosticSink::new();
        let rows = parse_scl(db.get_file(id), &sink);
        (rows, sink)
    }

    const ROW: &str = "CoreRow Horizontal\n  Coordinate   :   0\n  Height   : 12\n  Sitewidth :  1\n  Sitespacing : 1\n  Siteorient : 1\n  SubrowOrigin :  5   NumSites  :  100\nEnd\n";

    #[test]
    fn parses_complete_row() {
        let text = format!("UCLA scl 1.0\nNumRows : 1\n\n{ROW}");
        let (rows, sink) = parse(&text);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.coordinate, 0.0);
        assert_eq!(row.height, 12.0);
        assert_eq!(row.site_width, 1.0);
        assert_eq!(row.site_spacing, Some(1.0));
        assert_eq!(row.subrow_origin, 5.0);
        assert_eq!(row.num_sites, 100.0);
        assert_eq!(row.right_edge(), 105.0);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn lowercase_numsites_spelling() {
        let text = "CoreRow Horizontal\nCoordinate : 12\nHeight : 12\nSitewidth : 2\nSubrowOrigin : 0 Numsites : 4\nEnd\n";
        let (rows, _) = parse(text);
        assert_eq!(rows[0].right_edge(), 8.0);
        assert_eq!(rows[0].site_spacing, None);
    }

    #[test]
    fn invalid_field_discards_row() {
        let text = format!(
            "CoreRow Horizontal\nCoordinate : abc\nHeight : 12\nSitewidth : 1\nSubrowOrigin : 0 NumSites : 4\nEnd\n{ROW}"
        );
        let (rows, sink) = parse(&text);
        assert_eq!(rows.len(), 1);
        let codes: Vec<_> = sink.diagnostics().iter().map(|d| d.code.to_string()).collect();
        assert_eq!(codes, vec!["P003", "P004"]);
    }

    #[test]
    fn unterminated_row_is_dropped() {
        let (rows, sink) = parse("CoreRow Horizontal\nCoordinate : 0\n");
        assert!(rows.is_empty());
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn rows_keep_file_order() {
        let second = ROW.replace("Coordinate   :   0", "Coordinate : 12");
        let (rows, _) = parse(&format!("{ROW}{second}"));
        let ys: Vec<_> = rows.iter().map(|r| r.coordinate).collect();
        assert_eq!(ys, vec![0.0, 12.0]);
    }
}
