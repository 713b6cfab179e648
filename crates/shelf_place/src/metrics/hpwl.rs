//! Half-perimeter wirelength.

use crate::data::{Net, NodeTable, Point};
use crate::store::Placement;

/// HPWL of one net.
///
/// Only members that are declared nodes *and* placed count. Fewer than two
/// such members gives exactly 0. Node sizes do not enter; origins are used
/// as pin locations.
pub fn net_hpwl(net: &Net, nodes: &NodeTable, placement: &Placement) -> f64 {
    let mut pins = net
        .members
        .iter()
        .filter(|m| nodes.contains(m))
        .filter_map(|m| placement.get(m));

    let Some(first) = pins.next() else {
        return 0.0;
    };
    let mut bbox = (first, first);
    let mut count = 1usize;
    for p in pins {
        bbox.0 = Point::new(bbox.0.x.min(p.x), bbox.0.y.min(p.y));
        bbox.1 = Point::new(bbox.1.x.max(p.x), bbox.1.y.max(p.y));
        count += 1;
    }
    if count < 2 {
        return 0.0;
    }
    (bbox.1.x - bbox.0.x) + (bbox.1.y - bbox.0.y)
}

/// Sum of [`net_hpwl`] over `nets`.
pub fn total_wirelength(nets: &[Net], nodes: &NodeTable, placement: &Placement) -> f64 {
    nets.iter()
        .map(|net| net_hpwl(net, nodes, placement))
        .sum()
}
