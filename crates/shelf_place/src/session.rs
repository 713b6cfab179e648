//! The placement session: one ingested design and its two ledgers.
//!
//! Every operation a front end exposes goes through [`Session`]. Queries
//! borrow it immutably; ingestion, edits and trial randomization take
//! `&mut self`. [`SharedSession`] puts a session behind one `RwLock` for
//! callers that share it across threads.

use crate::data::{Design, Point};
use crate::error::{Collection, PlaceError, PlaceResult};
use crate::legalize::{Legalization, Strategy};
use crate::metrics::{self, LegalityDetails, LegalityReport};
use crate::parse::{parse_nets, parse_nodes, parse_pl, parse_scl};
use crate::report::{self, DesignSummary, ExtremeNets, NetWirelength, NodeSize};
use crate::store::{seed_trial, Ledger, Placement};
use rand::Rng;
use serde::Serialize;
use shelf_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use shelf_source::{FileKind, SourceDb, Span};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Knobs applied while ingesting a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Lowercase `.pl` ids so they match the lowercased `.nodes` ids.
    pub fold_placement_case: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            fold_placement_case: true,
        }
    }
}

/// What one successful ingestion loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Declared nodes.
    pub nodes: usize,
    /// Site rows kept.
    pub rows: usize,
    /// Nets.
    pub nets: usize,
    /// Primary ledger entries.
    pub placed: usize,
    /// Files in the batch that contributed nothing.
    pub ignored_files: usize,
}

/// Result of [`Session::randomize_trial`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialStats {
    /// Entries in the new trial ledger.
    pub placed: usize,
    /// Terminals left out because the primary ledger has no origin for them.
    pub skipped_terminals: Vec<String>,
}

/// Result of [`Session::edit_coordinate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditOutcome {
    /// The ledger key that was moved.
    pub node_id: String,
    /// Total wirelength of the ledger after the move.
    pub total_wirelength: f64,
    /// Every net listing the node, with its new HPWL.
    pub affected: Vec<NetWirelength>,
}

/// An ingested design plus its primary and trial placements.
#[derive(Debug, Clone, Default)]
pub struct Session {
    design: Design,
    primary: Placement,
    trial: Option<Placement>,
}

impl Session {
    /// Creates a session with nothing ingested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the design and primary ledger with the contents of `db`.
    ///
    /// Fails with [`PlaceError::MissingInput`] before touching any state if
    /// the batch lacks a `.nodes`, `.pl`, `.scl` or `.nets` file. On success
    /// the trial ledger is discarded. Files that contribute nothing are noted
    /// with `I002`.
    pub fn ingest(
        &mut self,
        db: &SourceDb,
        options: &IngestOptions,
        sink: &DiagnosticSink,
    ) -> PlaceResult<IngestStats> {
        let missing = db.missing_kinds();
        if !missing.is_empty() {
            return Err(PlaceError::MissingInput(missing));
        }
        let mut files = [None; 4];
        for (slot, kind) in files.iter_mut().zip(FileKind::REQUIRED) {
            *slot = db.file_of_kind(kind);
        }
        let [Some(nodes_file), Some(pl_file), Some(scl_file), Some(nets_file)] = files else {
            return Err(PlaceError::MissingInput(db.missing_kinds()));
        };

        let mut ignored_files = 0;
        for file in db.files() {
            let reason = match file.kind {
                None => "unrecognized extension",
                Some(FileKind::Wts) => "net weights are not used",
                Some(FileKind::Aux) => continue,
                Some(kind) if db.file_of_kind(kind).map(|f| f.id) != Some(file.id) => {
                    "superseded by a later file of the same kind"
                }
                Some(_) => continue,
            };
            ignored_files += 1;
            sink.emit(Diagnostic::note(
                DiagnosticCode::new(Category::Ingest, 2),
                format!("ignoring `{}`: {reason}", file.path.display()),
                Span::new(file.id, 0, 0),
            ));
        }

        let design = Design {
            nodes: parse_nodes(nodes_file, sink),
            rows: parse_scl(scl_file, sink),
            nets: parse_nets(nets_file, sink),
        };
        let parsed = parse_pl(pl_file, sink);
        let primary = if options.fold_placement_case {
            parsed.case_folded()
        } else {
            parsed
        };

        let stats = IngestStats {
            nodes: design.nodes.len(),
            rows: design.rows.len(),
            nets: design.nets.len(),
            placed: primary.len(),
            ignored_files,
        };
        self.design = design;
        self.primary = primary;
        self.trial = None;
        Ok(stats)
    }

    /// The ingested design.
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// The selected ledger. The trial ledger exists only after
    /// [`randomize_trial`](Self::randomize_trial).
    pub fn placement(&self, ledger: Ledger) -> PlaceResult<&Placement> {
        match ledger {
            Ledger::Primary => Ok(&self.primary),
            Ledger::Trial => self
                .trial
                .as_ref()
                .ok_or(PlaceError::NoData(Collection::Placement(Ledger::Trial))),
        }
    }

    fn placement_mut(&mut self, ledger: Ledger) -> PlaceResult<&mut Placement> {
        match ledger {
            Ledger::Primary => Ok(&mut self.primary),
            Ledger::Trial => self
                .trial
                .as_mut()
                .ok_or(PlaceError::NoData(Collection::Placement(Ledger::Trial))),
        }
    }

    /// The selected ledger, which must have at least one entry.
    fn populated(&self, ledger: Ledger) -> PlaceResult<&Placement> {
        let placement = self.placement(ledger)?;
        if placement.is_empty() {
            return Err(PlaceError::NoData(Collection::Placement(ledger)));
        }
        Ok(placement)
    }

    fn require_nets(&self) -> PlaceResult<()> {
        if self.design.nets.is_empty() {
            return Err(PlaceError::NoData(Collection::Nets));
        }
        Ok(())
    }

    /// Sum of HPWL over all nets.
    pub fn total_wirelength(&self, ledger: Ledger) -> PlaceResult<f64> {
        self.require_nets()?;
        let placement = self.populated(ledger)?;
        Ok(metrics::total_wirelength(
            &self.design.nets,
            &self.design.nodes,
            placement,
        ))
    }

    /// HPWL of the net with synthetic id `net_id`.
    pub fn net_wirelength(&self, ledger: Ledger, net_id: &str) -> PlaceResult<f64> {
        self.require_nets()?;
        let net = self
            .design
            .net(net_id)
            .ok_or_else(|| PlaceError::net_not_found(net_id))?;
        let placement = self.populated(ledger)?;
        Ok(metrics::net_hpwl(net, &self.design.nodes, placement))
    }

    /// Origin of `node_id`, trying the id as given and then lowercased.
    pub fn node_coordinates(&self, ledger: Ledger, node_id: &str) -> PlaceResult<Point> {
        let placement = self.populated(ledger)?;
        placement
            .get(node_id)
            .or_else(|| placement.get(&node_id.to_lowercase()))
            .ok_or_else(|| PlaceError::node_not_found(node_id))
    }

    /// All nodes by area, largest first.
    pub fn node_size_ranking(&self) -> PlaceResult<Vec<NodeSize>> {
        if self.design.nodes.is_empty() {
            return Err(PlaceError::NoData(Collection::Nodes));
        }
        Ok(report::node_size_ranking(&self.design.nodes))
    }

    /// All nets by HPWL, longest first.
    pub fn net_ranking(&self, ledger: Ledger) -> PlaceResult<Vec<NetWirelength>> {
        self.require_nets()?;
        let placement = self.populated(ledger)?;
        Ok(report::net_ranking(&self.design, placement))
    }

    /// The longest and shortest nets, evaluated with ledger ids lowercased.
    pub fn extreme_nets(&self, ledger: Ledger) -> PlaceResult<ExtremeNets> {
        self.require_nets()?;
        let folded = self.populated(ledger)?.case_folded();
        report::extreme_nets(report::net_wirelengths(&self.design, &folded))
            .ok_or(PlaceError::NoData(Collection::Nets))
    }

    /// Overlap, misalignment and out-of-bounds counts.
    pub fn legality_report(&self, ledger: Ledger) -> PlaceResult<LegalityReport> {
        Ok(self.legality_details(ledger)?.report())
    }

    /// Every violation behind [`legality_report`](Self::legality_report).
    pub fn legality_details(&self, ledger: Ledger) -> PlaceResult<LegalityDetails> {
        let die = self
            .design
            .die()
            .ok_or(PlaceError::NoData(Collection::Rows))?;
        let placement = self.placement(ledger)?;
        Ok(metrics::legality_details(&self.design, die, placement))
    }

    /// Rebuilds the trial ledger with random origins inside the die.
    pub fn randomize_trial<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PlaceResult<TrialStats> {
        let die = self
            .design
            .die()
            .ok_or(PlaceError::NoData(Collection::Rows))?;
        if self.design.nodes.is_empty() {
            return Err(PlaceError::NoData(Collection::Nodes));
        }
        let seeded = seed_trial(&self.design.nodes, die, &self.primary, rng);
        let stats = TrialStats {
            placed: seeded.placement.len(),
            skipped_terminals: seeded.skipped_terminals,
        };
        self.trial = Some(seeded.placement);
        Ok(stats)
    }

    /// Moves one ledger entry and reports the wirelength it now produces.
    ///
    /// The node must already have an entry; the id is tried as given and
    /// then lowercased. On error the ledger is left unchanged.
    pub fn edit_coordinate(
        &mut self,
        ledger: Ledger,
        node_id: &str,
        x: f64,
        y: f64,
    ) -> PlaceResult<EditOutcome> {
        let placement = self.placement_mut(ledger)?;
        let key = if placement.contains(node_id) {
            node_id.to_string()
        } else {
            let lower = node_id.to_lowercase();
            if !placement.contains(&lower) {
                return Err(PlaceError::node_not_found(node_id));
            }
            lower
        };
        placement.set(key.clone(), Point::new(x, y));

        let placement = self.placement(ledger)?;
        let member = key.to_lowercase();
        let affected = report::net_wirelengths(&self.design, placement)
            .into_iter()
            .filter(|n| n.members.contains(&member))
            .collect();
        Ok(EditOutcome {
            total_wirelength: metrics::total_wirelength(
                &self.design.nets,
                &self.design.nodes,
                placement,
            ),
            node_id: key,
            affected,
        })
    }

    /// Runs `strategy` over the primary ledger. The session is not modified.
    pub fn legalize(&self, strategy: Strategy) -> Legalization {
        strategy.legalizer().legalize(&self.design, &self.primary)
    }

    /// Counts of everything ingested.
    pub fn summary(&self) -> DesignSummary {
        DesignSummary::new(&self.design, &self.primary, self.trial.as_ref())
    }
}

/// A [`Session`] behind a single reader-writer lock.
///
/// Readers never observe a half-replaced ledger: ingestion, edits and
/// randomization hold the write guard for their whole duration.
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<RwLock<Session>>);

impl SharedSession {
    /// Wraps `session`.
    pub fn new(session: Session) -> Self {
        Self(Arc::new(RwLock::new(session)))
    }

    /// Acquires the lock for a query.
    pub fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the lock for a mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}
