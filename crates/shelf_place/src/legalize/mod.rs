//! Greedy row legalization.
//!
//! Both packers fill rows with per-row cursors that live only for one run.
//! They never fail as a whole: a node no row can take is listed in
//! [`Legalization::failures`] and left out of the result.
//!
//! | Code   | Meaning                                          |
//! |--------|--------------------------------------------------|
//! | `L001` | movable node could not be placed in any row      |
//! | `L002` | terminal has no source origin and was not copied |

mod first_fit;
mod right_to_left;

pub use first_fit::FirstFitLeftPack;
pub use right_to_left::RightToLeftPack;

use crate::data::{Design, Node, Row};
use crate::store::Placement;
use serde::{Deserialize, Serialize};
use shelf_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use shelf_source::Span;
use std::fmt;

/// A row-packing heuristic.
pub trait RowLegalizer {
    /// Which strategy this is.
    fn strategy(&self) -> Strategy;

    /// Packs the movable nodes of `design` into its rows, starting from
    /// `source`. `source` is never modified.
    fn legalize(&self, design: &Design, source: &Placement) -> Legalization;
}

/// The available packers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Declaration order, leftmost free site of the first row that fits.
    #[default]
    FirstFitLeftPack,
    /// Descending source x, rightmost free site of the first row that fits.
    RightToLeftPack,
}

impl Strategy {
    /// The packer implementing this strategy.
    pub fn legalizer(self) -> &'static dyn RowLegalizer {
        match self {
            Strategy::FirstFitLeftPack => &FirstFitLeftPack,
            Strategy::RightToLeftPack => &RightToLeftPack,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FirstFitLeftPack => write!(f, "first-fit-left-pack"),
            Strategy::RightToLeftPack => write!(f, "right-to-left-pack"),
        }
    }
}

/// Output of one legalization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legalization {
    /// Strategy that produced this result.
    pub strategy: Strategy,
    /// Legalized movable nodes plus the copied terminals.
    pub placement: Placement,
    /// Movable nodes no row could take, in the order they were tried.
    pub failures: Vec<String>,
    /// Terminals absent from the source placement.
    pub skipped_terminals: Vec<String>,
}

impl Legalization {
    /// Returns `true` if every movable node was placed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Reports failures (`L001`) and skipped terminals (`L002`).
    pub fn emit_diagnostics(&self, sink: &DiagnosticSink) {
        for node in &self.failures {
            sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Legality, 1),
                format!("node `{node}` does not fit in any row"),
                Span::DUMMY,
            ));
        }
        for node in &self.skipped_terminals {
            sink.emit(Diagnostic::note(
                DiagnosticCode::new(Category::Legality, 2),
                format!("terminal `{node}` has no origin to copy"),
                Span::DUMMY,
            ));
        }
    }
}

/// Row-fit predicate shared by both packers: the node must be no taller than
/// the row.
fn fits_height(row: &Row, node: &Node) -> bool {
    row.admits_height(node)
}

/// Copies every terminal's source origin into `out`, returning the terminals
/// that had none.
fn copy_terminals(design: &Design, source: &Placement, out: &mut Placement) -> Vec<String> {
    let mut skipped = Vec::new();
    for node in design.nodes.iter().filter(|n| n.is_terminal) {
        match source.get(&node.name) {
            Some(at) => out.set(node.name.clone(), at),
            None => skipped.push(node.name.clone()),
        }
    }
    skipped
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use shelf_diagnostics::Severity;

    #[test]
    fn strategy_names_round_trip() {
        for s in [Strategy::FirstFitLeftPack, Strategy::RightToLeftPack] {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{s}\""));
            assert_eq!(s.legalizer().strategy(), s);
        }
    }

    #[test]
    fn failures_become_warnings() {
        let d = design(
            vec![node("big", 1.0, 5.0, false), node("p", 1.0, 1.0, true)],
            vec![row(0.0, 2.0, 0.0, 10.0)],
        );
        let result = Strategy::FirstFitLeftPack
            .legalizer()
            .legalize(&d, &Placement::new());
        assert!(!result.is_complete());
        let sink = DiagnosticSink::new();
        result.emit_diagnostics(&sink);
        assert_eq!(sink.count(Severity::Warning), 1);
        assert_eq!(sink.count(Severity::Note), 1);
    }
}
