//! Core placement data structures.
//!
//! A [`Design`] is what one ingestion batch produces: the node table, the
//! ordered site rows, and the nets. All three are replaced together on
//! re-ingestion and never mutated in between; coordinates live separately in
//! [`Placement`](crate::store::Placement) ledgers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A cell or a fixed terminal from the `.nodes` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Lowercase identifier.
    pub name: String,
    /// Width as written in the file; may be negative.
    pub width: f64,
    /// Height as written in the file; may be negative.
    pub height: f64,
    /// Fixed-position I/O pin, never moved by legalization or randomization.
    pub is_terminal: bool,
}

impl Node {
    /// Width used by every geometric computation.
    pub fn abs_width(&self) -> f64 {
        self.width.abs()
    }

    /// Height used by every geometric computation.
    pub fn abs_height(&self) -> f64 {
        self.height.abs()
    }

    /// Footprint area.
    pub fn area(&self) -> f64 {
        self.abs_width() * self.abs_height()
    }

    /// The node's rectangle when its lower-left corner is at `origin`.
    pub fn rect_at(&self, origin: Point) -> Rect {
        Rect {
            x_min: origin.x,
            x_max: origin.x + self.abs_width(),
            y_min: origin.y,
            y_max: origin.y + self.abs_height(),
        }
    }
}

/// Nodes in declaration order with lookup by name.
///
/// Re-declaring a name replaces the earlier node's attributes but keeps its
/// original position in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTable {
    nodes: Vec<Node>,
    /// Auxiliary index: node name to position (rebuilt on deserialization).
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl NodeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, returning the node it replaced, if any.
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        match self.by_name.get(&node.name) {
            Some(&idx) => Some(std::mem::replace(&mut self.nodes[idx], node)),
            None => {
                self.by_name.insert(node.name.clone(), self.nodes.len());
                self.nodes.push(node);
                None
            }
        }
    }

    /// Looks a node up by exact name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.by_name.get(name).map(|&idx| &self.nodes[idx])
    }

    /// Returns `true` if a node with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of terminal nodes.
    pub fn terminal_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_terminal).count()
    }

    /// Rebuilds the name index after deserialization.
    pub fn rebuild_index(&mut self) {
        self.by_name = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.name.clone(), idx))
            .collect();
    }
}

impl FromIterator<Node> for NodeTable {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut table = NodeTable::new();
        for node in iter {
            table.insert(node);
        }
        table
    }
}

/// One horizontal band of placement sites from the `.scl` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Bottom edge (y origin).
    pub coordinate: f64,
    /// Row height.
    pub height: f64,
    /// Width of one site.
    pub site_width: f64,
    /// Site pitch; recorded but not used by any computation.
    pub site_spacing: Option<f64>,
    /// Left edge (x origin).
    pub subrow_origin: f64,
    /// Number of sites.
    pub num_sites: f64,
}

impl Row {
    /// Right edge: `subrow_origin + num_sites * site_width`.
    pub fn right_edge(&self) -> f64 {
        self.subrow_origin + self.num_sites * self.site_width
    }

    /// Top edge: `coordinate + height`.
    pub fn top(&self) -> f64 {
        self.coordinate + self.height
    }

    /// The row's full rectangle.
    pub fn rect(&self) -> Rect {
        Rect {
            x_min: self.subrow_origin,
            x_max: self.right_edge(),
            y_min: self.coordinate,
            y_max: self.top(),
        }
    }

    /// Whether a node is short enough to sit in this row.
    pub fn admits_height(&self, node: &Node) -> bool {
        node.abs_height() <= self.height
    }
}

/// A hyperedge from the `.nets` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    /// Synthetic id assigned in file order: `n0`, `n1`, ...
    pub id: String,
    /// Name given on the `NetDegree` line, if any.
    pub label: Option<String>,
    /// Member node ids, lowercase, in file order with repeats kept.
    pub members: Vec<String>,
}

impl Net {
    /// Returns `true` if `node` is listed as a member.
    pub fn touches(&self, node: &str) -> bool {
        self.members.iter().any(|m| m == node)
    }
}

/// A coordinate pair. In a ledger it is a node's lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

impl Rect {
    /// Interiors intersect. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x_max <= other.x_min
            || self.x_min >= other.x_max
            || self.y_max <= other.y_min
            || self.y_min >= other.y_max)
    }

    /// `inner` lies entirely inside `self`, edges included.
    pub fn contains(&self, inner: &Rect) -> bool {
        self.x_min <= inner.x_min
            && inner.x_max <= self.x_max
            && self.y_min <= inner.y_min
            && inner.y_max <= self.y_max
    }
}

/// The placement region implied by the rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Die {
    /// Largest row right edge.
    pub width: f64,
    /// Largest row top edge.
    pub height: f64,
}

impl Die {
    /// Derives the die from the rows, or `None` when there are none.
    pub fn from_rows(rows: &[Row]) -> Option<Die> {
        if rows.is_empty() {
            return None;
        }
        let width = rows
            .iter()
            .map(Row::right_edge)
            .fold(f64::NEG_INFINITY, f64::max);
        let height = rows.iter().map(Row::top).fold(f64::NEG_INFINITY, f64::max);
        Some(Die { width, height })
    }

    /// Whether a node at `origin` stays within `[0, width] x [0, height]`.
    pub fn holds(&self, node: &Node, origin: Point) -> bool {
        0.0 <= origin.x
            && origin.x <= self.width - node.abs_width()
            && 0.0 <= origin.y
            && origin.y <= self.height - node.abs_height()
    }
}

/// Everything one ingestion batch parsed, apart from coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Cells and terminals.
    pub nodes: NodeTable,
    /// Site rows in file order.
    pub rows: Vec<Row>,
    /// Nets in file order.
    pub nets: Vec<Net>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// The die derived from the rows.
    pub fn die(&self) -> Option<Die> {
        Die::from_rows(&self.rows)
    }

    /// Looks up a net by its synthetic id.
    pub fn net(&self, id: &str) -> Option<&Net> {
        self.nets.iter().find(|n| n.id == id)
    }

    /// Total number of net members over all nets.
    pub fn pin_count(&self) -> usize {
        self.nets.iter().map(|n| n.members.len()).sum()
    }
}
