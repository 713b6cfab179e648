//! Overlap, row-alignment and bounds checks.
//!
//! Only movable nodes that have an entry in the placement are checked.
//! Terminals are excluded from all three checks.

use crate::data::{Design, Die, Rect};
use crate::store::Placement;
use serde::Serialize;

/// Violation counts for one placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LegalityReport {
    /// Unordered pairs of nodes whose rectangles overlap.
    pub overlaps: usize,
    /// Nodes not contained in any row.
    pub misaligned: usize,
    /// Nodes extending past the die.
    pub out_of_bounds: usize,
}

impl LegalityReport {
    /// Returns `true` if every count is zero.
    pub fn is_legal(&self) -> bool {
        self.overlaps == 0 && self.misaligned == 0 && self.out_of_bounds == 0
    }
}

/// A placed node and the rectangle it occupies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRect {
    /// Node id.
    pub node: String,
    /// Occupied rectangle.
    pub rect: Rect,
}

/// Every violation behind a [`LegalityReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegalityDetails {
    /// Overlapping pairs, earlier node (in declaration order) first.
    pub overlapping_pairs: Vec<(String, String)>,
    /// Nodes not contained in any row.
    pub misaligned: Vec<PlacedRect>,
    /// Nodes extending past the die.
    pub out_of_bounds: Vec<PlacedRect>,
}

impl LegalityDetails {
    /// The counts summarizing these details.
    pub fn report(&self) -> LegalityReport {
        LegalityReport {
            overlaps: self.overlapping_pairs.len(),
            misaligned: self.misaligned.len(),
            out_of_bounds: self.out_of_bounds.len(),
        }
    }
}

/// Runs all three checks against `placement`.
pub fn legality_details(design: &Design, die: Die, placement: &Placement) -> LegalityDetails {
    let placed: Vec<(&str, Rect, bool)> = design
        .nodes
        .iter()
        .filter(|n| !n.is_terminal)
        .filter_map(|n| {
            let at = placement.get(&n.name)?;
            Some((n.name.as_str(), n.rect_at(at), die.holds(n, at)))
        })
        .collect();

    let mut details = LegalityDetails::default();

    for (i, (a, ra, _)) in placed.iter().enumerate() {
        for (b, rb, _) in &placed[i + 1..] {
            if ra.overlaps(rb) {
                details
                    .overlapping_pairs
                    .push((a.to_string(), b.to_string()));
            }
        }
    }

    for (name, rect, in_die) in &placed {
        if !design.rows.iter().any(|row| row.rect().contains(rect)) {
            details.misaligned.push(PlacedRect {
                node: name.to_string(),
                rect: *rect,
            });
        }
        if !in_die {
            details.out_of_bounds.push(PlacedRect {
                node: name.to_string(),
                rect: *rect,
            });
        }
    }

    details
}

/// Counts-only form of [`legality_details`].
pub fn legality_report(design: &Design, die: Die, placement: &Placement) -> LegalityReport {
    legality_details(design, die, placement).report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Node, NodeTable, Point, Row};

    fn node(name: &str, w: f64, h: f64, terminal: bool) -> Node {
        Node {
            name: name.into(),
            width: w,
            height: h,
            is_terminal: terminal,
        }
    }

    fn design(nodes: Vec<Node>) -> Design {
        Design {
            nodes: nodes.into_iter().collect::<NodeTable>(),
            rows: vec![Row {
                coordinate: 0.0,
                height: 2.0,
                site_width: 1.0,
                site_spacing: None,
                subrow_origin: 0.0,
                num_sites: 10.0,
            }],
            nets: Vec::new(),
        }
    }

    fn placed(entries: &[(&str, f64, f64)]) -> Placement {
        entries
            .iter()
            .map(|(id, x, y)| (id.to_string(), Point::new(*x, *y)))
            .collect()
    }

    #[test]
    fn two_overlapping_squares() {
        let d = design(vec![node("a", 2.0, 2.0, false), node("b", 2.0, 2.0, false)]);
        let die = d.die().unwrap();
        let report = legality_report(&d, die, &placed(&[("a", 0.0, 0.0), ("b", 1.0, 0.0)]));
        assert_eq!(
            report,
            LegalityReport {
                overlaps: 1,
                misaligned: 0,
                out_of_bounds: 0
            }
        );
    }

    #[test]
    fn overlap_count_ignores_declaration_order() {
        let pl = placed(&[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 1.5, 0.0)]);
        let fwd = design(vec![
            node("a", 2.0, 2.0, false),
            node("b", 2.0, 2.0, false),
            node("c", 2.0, 2.0, false),
        ]);
        let rev = design(vec![
            node("c", 2.0, 2.0, false),
            node("b", 2.0, 2.0, false),
            node("a", 2.0, 2.0, false),
        ]);
        let die = fwd.die().unwrap();
        assert_eq!(legality_report(&fwd, die, &pl).overlaps, 3);
        assert_eq!(legality_report(&rev, die, &pl).overlaps, 3);
    }

    #[test]
    fn misaligned_and_out_of_bounds() {
        let d = design(vec![
            node("a", 2.0, 2.0, false),
            node("b", 2.0, 2.0, false),
            node("c", 2.0, 2.0, false),
        ]);
        let die = d.die().unwrap();
        let pl = placed(&[("a", 0.0, 0.5), ("b", 9.0, 0.0), ("c", 4.0, 0.0)]);
        let details = legality_details(&d, die, &pl);
        let misaligned: Vec<_> = details.misaligned.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(misaligned, vec!["a", "b"]);
        let oob: Vec<_> = details.out_of_bounds.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(oob, vec!["a", "b"]);
        assert_eq!(details.report().misaligned, details.misaligned.len());
    }

    #[test]
    fn terminals_and_unplaced_nodes_are_ignored() {
        let d = design(vec![
            node("a", 2.0, 2.0, false),
            node("p", 2.0, 2.0, true),
            node("u", 2.0, 2.0, false),
        ]);
        let die = d.die().unwrap();
        let pl = placed(&[("a", 0.0, 0.0), ("p", 0.0, 0.0), ("ghost", 50.0, 50.0)]);
        let report = legality_report(&d, die, &pl);
        assert!(report.is_legal());
    }

    #[test]
    fn edge_contact_is_not_overlap() {
        let d = design(vec![node("a", 2.0, 2.0, false), node("b", 2.0, 2.0, false)]);
        let die = d.die().unwrap();
        let details = legality_details(&d, die, &placed(&[("a", 0.0, 0.0), ("b", 2.0, 0.0)]));
        assert!(details.overlapping_pairs.is_empty());
    }
}
