//! UCLA `.pl` output.

use crate::data::NodeTable;
use crate::store::Placement;

/// Renders `placement` as a `.pl` file.
///
/// Lines follow declaration order; unplaced nodes and entries naming no node
/// are omitted. Terminals carry `/FIXED`. When `hpwl` is given it is written
/// as a comment under the banner.
pub fn write_pl(nodes: &NodeTable, placement: &Placement, hpwl: Option<f64>) -> String {
    let mut out = String::from("UCLA pl 1.0\n");
    if let Some(hpwl) = hpwl {
        out.push_str(&format!("# HPWL: {hpwl}\n"));
    }
    out.push('\n');

    for node in nodes.iter() {
        let Some(at) = placement.get(&node.name) else {
            continue;
        };
        out.push_str(&format!("{}\t{}\t{}\t: N", node.name, at.x, at.y));
        if node.is_terminal {
            out.push_str(" /FIXED");
        }
        out.push('\n');
    }

    out
}
