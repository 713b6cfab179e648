use super::{copy_terminals, fits_height, Legalization, RowLegalizer, Strategy};
use crate::data::{Design, Point};
use crate::store::Placement;

/// Packs movable nodes left to right in declaration order.
///
/// Each row starts its cursor at its subrow origin. A node goes to the first
/// row that is tall enough and still has `|w|` of room before its right
/// edge; it lands at the cursor on the row's bottom edge. Source origins are
/// ignored except for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFitLeftPack;

impl RowLegalizer for FirstFitLeftPack {
    fn strategy(&self) -> Strategy {
        Strategy::FirstFitLeftPack
    }

    fn legalize(&self, design: &Design, source: &Placement) -> Legalization {
        let mut placement = Placement::new();
        let skipped_terminals = copy_terminals(design, source, &mut placement);
        let mut cursors: Vec<f64> = design.rows.iter().map(|r| r.subrow_origin).collect();
        let mut failures = Vec::new();

        for node in design.nodes.iter().filter(|n| !n.is_terminal) {
            let width = node.abs_width();
            let slot = design.rows.iter().zip(cursors.iter_mut()).find(|(row, cursor)| {
                fits_height(row, node) && **cursor + width <= row.right_edge()
            });
            match slot {
                Some((row, cursor)) => {
                    placement.set(node.name.clone(), Point::new(*cursor, row.coordinate));
                    *cursor += width;
                }
                None => failures.push(node.name.clone()),
            }
        }

        Legalization {
            strategy: Strategy::FirstFitLeftPack,
            placement,
            failures,
            skipped_terminals,
        }
    }
}
