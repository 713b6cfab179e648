use super::{copy_terminals, fits_height, Legalization, RowLegalizer, Strategy};
use crate::data::{Design, Point};
use crate::store::Placement;

/// Packs movable nodes right to left, rightmost source origin first.
///
/// Only movable nodes with a source origin take part; they are tried in
/// descending source x (ties keep declaration order). Each row starts its
/// cursor at its right edge; a node goes to the first row that is tall
/// enough and has `|w|` of room left of the cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RightToLeftPack;

impl RowLegalizer for RightToLeftPack {
    fn strategy(&self) -> Strategy {
        Strategy::RightToLeftPack
    }

    fn legalize(&self, design: &Design, source: &Placement) -> Legalization {
        let mut placement = Placement::new();
        let skipped_terminals = copy_terminals(design, source, &mut placement);
        let mut cursors: Vec<f64> = design.rows.iter().map(|r| r.right_edge()).collect();
        let mut failures = Vec::new();

        let mut movable: Vec<_> = design
            .nodes
            .iter()
            .filter(|n| !n.is_terminal)
            .filter_map(|n| source.get(&n.name).map(|at| (n, at.x)))
            .collect();
        movable.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        for (node, _) in movable {
            let width = node.abs_width();
            let slot = design.rows.iter().zip(cursors.iter_mut()).find(|(row, cursor)| {
                fits_height(row, node) && **cursor - width >= row.subrow_origin
            });
            match slot {
                Some((row, cursor)) => {
                    *cursor -= width;
                    placement.set(node.name.clone(), Point::new(*cursor, row.coordinate));
                }
                None => failures.push(node.name.clone()),
            }
        }

        Legalization {
            strategy: Strategy::RightToLeftPack,
            placement,
            failures,
            skipped_terminals,
        }
    }
}
