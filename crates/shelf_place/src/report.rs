//! Sorted and aggregated views over a design and its metrics.

use crate::data::{Design, Die, NodeTable};
use crate::metrics::net_hpwl;
use crate::store::Placement;
use serde::Serialize;

/// One entry of the node-size ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSize {
    /// Node id.
    pub node: String,
    /// `|width| * |height|`.
    pub area: f64,
    /// Whether the node is a terminal.
    pub is_terminal: bool,
}

/// All nodes by area, largest first. Equal areas keep declaration order.
pub fn node_size_ranking(nodes: &NodeTable) -> Vec<NodeSize> {
    let mut sizes: Vec<NodeSize> = nodes
        .iter()
        .map(|n| NodeSize {
            node: n.name.clone(),
            area: n.area(),
            is_terminal: n.is_terminal,
        })
        .collect();
    sizes.sort_by(|a, b| b.area.total_cmp(&a.area));
    sizes
}

/// A net with its HPWL under some placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetWirelength {
    /// Synthetic net id.
    pub net_id: String,
    /// Half-perimeter wirelength.
    pub hpwl: f64,
    /// Member ids as parsed.
    pub members: Vec<String>,
}

/// Per-net HPWL in file order.
pub fn net_wirelengths(design: &Design, placement: &Placement) -> Vec<NetWirelength> {
    design
        .nets
        .iter()
        .map(|net| NetWirelength {
            net_id: net.id.clone(),
            hpwl: net_hpwl(net, &design.nodes, placement),
            members: net.members.clone(),
        })
        .collect()
}

/// Per-net HPWL, longest first. Ties keep file order.
pub fn net_ranking(design: &Design, placement: &Placement) -> Vec<NetWirelength> {
    let mut nets = net_wirelengths(design, placement);
    nets.sort_by(|a, b| b.hpwl.total_cmp(&a.hpwl));
    nets
}

/// The longest and shortest nets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeNets {
    /// First net with the maximum HPWL.
    pub largest: NetWirelength,
    /// First net with the minimum HPWL.
    pub smallest: NetWirelength,
}

/// Picks the first maximum and first minimum, or `None` for no nets.
pub fn extreme_nets(nets: Vec<NetWirelength>) -> Option<ExtremeNets> {
    let mut iter = nets.into_iter();
    let first = iter.next()?;
    let mut largest = first.clone();
    let mut smallest = first;
    for net in iter {
        if net.hpwl > largest.hpwl {
            largest = net.clone();
        }
        if net.hpwl < smallest.hpwl {
            smallest = net;
        }
    }
    Some(ExtremeNets { largest, smallest })
}

/// Size of the ingested design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSummary {
    /// Declared nodes, terminals included.
    pub nodes: usize,
    /// Terminal nodes.
    pub terminals: usize,
    /// Nets.
    pub nets: usize,
    /// Net members over all nets.
    pub pins: usize,
    /// Site rows.
    pub rows: usize,
    /// Region spanned by the rows.
    pub die: Option<Die>,
    /// Entries in the primary ledger.
    pub primary_placed: usize,
    /// Entries in the trial ledger, if one has been built.
    pub trial_placed: Option<usize>,
}

impl DesignSummary {
    /// Summarizes `design` and its ledgers.
    pub fn new(design: &Design, primary: &Placement, trial: Option<&Placement>) -> Self {
        Self {
            nodes: design.nodes.len(),
            terminals: design.nodes.terminal_count(),
            nets: design.nets.len(),
            pins: design.pin_count(),
            rows: design.rows.len(),
            die: design.die(),
            primary_placed: primary.len(),
            trial_placed: trial.map(Placement::len),
        }
    }
}
