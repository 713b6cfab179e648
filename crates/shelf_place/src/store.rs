//! Placement ledgers: node id to lower-left origin.

use crate::data::{Die, NodeTable, Point};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Selects one of the two placement ledgers a session keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ledger {
    /// Parsed from `.pl`, then edited in place.
    #[default]
    Primary,
    /// Built by the random generator, then edited in place.
    Trial,
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ledger::Primary => write!(f, "primary"),
            Ledger::Trial => write!(f, "trial"),
        }
    }
}

/// A map from node id to origin.
///
/// Entries whose id names no node are kept but take no part in geometry.
/// Each entry also remembers when it was last set, so folding ids can honour
/// file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placement {
    origins: BTreeMap<String, Point>,
    #[serde(skip)]
    stamps: HashMap<String, u64>,
    #[serde(skip)]
    next_stamp: u64,
}

impl Placement {
    /// Creates an empty placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin of `id`, if placed.
    pub fn get(&self, id: &str) -> Option<Point> {
        self.origins.get(id).copied()
    }

    /// Places `id` at `at`, replacing any previous origin.
    pub fn set(&mut self, id: impl Into<String>, at: Point) {
        let id = id.into();
        self.stamps.insert(id.clone(), self.next_stamp);
        self.next_stamp += 1;
        self.origins.insert(id, at);
    }

    /// Returns `true` if `id` has an entry.
    pub fn contains(&self, id: &str) -> bool {
        self.origins.contains_key(id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Iterates entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.origins.iter().map(|(id, p)| (id.as_str(), *p))
    }

    /// A copy with every id lowercased.
    ///
    /// When two ids fold to the same key, the one set last wins.
    pub fn case_folded(&self) -> Placement {
        let mut entries: Vec<(&String, &Point)> = self.origins.iter().collect();
        entries.sort_by_key(|(id, _)| self.stamps.get(*id).copied().unwrap_or(0));
        entries
            .into_iter()
            .map(|(id, p)| (id.to_lowercase(), *p))
            .collect()
    }
}

impl PartialEq for Placement {
    fn eq(&self, other: &Self) -> bool {
        self.origins == other.origins
    }
}

impl FromIterator<(String, Point)> for Placement {
    fn from_iter<I: IntoIterator<Item = (String, Point)>>(iter: I) -> Self {
        let mut placement = Placement::new();
        for (id, at) in iter {
            placement.set(id, at);
        }
        placement
    }
}

/// Result of seeding a trial ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSeeding {
    /// The new trial ledger.
    pub placement: Placement,
    /// Terminals left out because the primary ledger has no entry for them.
    pub skipped_terminals: Vec<String>,
}

/// Builds a random trial ledger inside `die`.
///
/// Movable nodes get an origin drawn uniformly from
/// `[0, die.width - |w|] x [0, die.height - |h|]`; terminals copy their
/// primary origin verbatim.
pub fn seed_trial<R: Rng + ?Sized>(
    nodes: &NodeTable,
    die: Die,
    primary: &Placement,
    rng: &mut R,
) -> TrialSeeding {
    let mut placement = Placement::new();
    let mut skipped_terminals = Vec::new();

    for node in nodes.iter() {
        if node.is_terminal {
            match primary.get(&node.name) {
                Some(at) => placement.set(node.name.clone(), at),
                None => skipped_terminals.push(node.name.clone()),
            }
            continue;
        }
        let x = uniform(rng, die.width - node.abs_width());
        let y = uniform(rng, die.height - node.abs_height());
        placement.set(node.name.clone(), Point::new(x, y));
    }

    TrialSeeding {
        placement,
        skipped_terminals,
    }
}

/// A sample between 0 and `hi`. A negative `hi` samples `[hi, 0]`.
fn uniform<R: Rng + ?Sized>(rng: &mut R, hi: f64) -> f64 {
    hi * rng.gen::<f64>()
}
