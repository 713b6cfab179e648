//! Shared pipeline helpers for CLI commands.
//!
//! Every subcommand runs the same front half: load `shelf.toml`, find the
//! Bookshelf files, ingest them into a [`Session`], render the parse
//! diagnostics, and optionally build the trial ledger. [`load_design`] does
//! all of that and hands back a [`LoadedDesign`].

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use shelf_config::{LegalizerKind, ShelfConfig};
use shelf_diagnostics::{DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use shelf_place::parse::parse_aux;
use shelf_place::{IngestOptions, Ledger, Session, Strategy};
use shelf_source::{FileKind, SourceDb};

use crate::{DesignArgs, GlobalArgs, ReportFormat, StrategyChoice};

/// An ingested design ready for queries.
pub struct LoadedDesign {
    /// Display name from `[design] name` or the directory name.
    pub name: String,
    /// Effective configuration.
    pub config: ShelfConfig,
    /// The ingested session, with a trial ledger if `--trial` was given.
    pub session: Session,
    /// Ledger the command should operate on.
    pub ledger: Ledger,
    /// The files the session was built from, for diagnostic rendering.
    pub source_db: SourceDb,
}

/// Loads config, discovers and ingests the design, and prints diagnostics.
pub fn load_design(
    args: &DesignArgs,
    global: &GlobalArgs,
) -> Result<LoadedDesign, Box<dyn std::error::Error>> {
    let dir = args.design.as_path();
    if !dir.is_dir() {
        return Err(format!("design directory `{}` does not exist", dir.display()).into());
    }
    let config = match global.config {
        Some(ref path) => shelf_config::load_config_file(Path::new(path))?,
        None => shelf_config::load_config(dir)?,
    };
    let name = design_name(&config, dir);

    if !global.quiet {
        eprintln!("    Loading {name}");
    }

    let sink = DiagnosticSink::new();
    let source_db = load_sources(dir, &config, &sink)?;
    if global.verbose {
        for file in source_db.files() {
            eprintln!("       file {}", file.path.display());
        }
    }

    let mut session = Session::new();
    let options = IngestOptions {
        fold_placement_case: config.ingest.fold_placement_case,
    };
    let ingested = session.ingest(&source_db, &options, &sink);
    render_diagnostics(&sink, &source_db, global);
    let stats = ingested?;

    if !global.quiet {
        eprintln!(
            "   Ingested {} nodes, {} nets, {} rows, {} placed",
            stats.nodes, stats.nets, stats.rows, stats.placed
        );
    }

    let ledger = if args.trial {
        let seed = args.seed.or(config.trial.seed);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let trial = session.randomize_trial(&mut rng)?;
        if !global.quiet {
            eprintln!("  Randomized trial ledger ({} placed)", trial.placed);
        }
        if global.verbose {
            for node in &trial.skipped_terminals {
                eprintln!("       terminal {node} has no primary origin");
            }
        }
        Ledger::Trial
    } else {
        Ledger::Primary
    };

    Ok(LoadedDesign {
        name,
        config,
        session,
        ledger,
        source_db,
    })
}

/// Display name: `[design] name`, else the directory's file name.
pub fn design_name(config: &ShelfConfig, dir: &Path) -> String {
    if let Some(ref name) = config.design.name {
        return name.clone();
    }
    dir.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "design".to_string())
}

/// Loads the design's files into a fresh [`SourceDb`].
///
/// Sources, by precedence: `[design] files`, the `.aux` manifest named by
/// `[design] aux`, the single `.aux` in the directory, and finally every
/// file in the directory with a Bookshelf extension.
pub fn load_sources(
    dir: &Path,
    config: &ShelfConfig,
    sink: &DiagnosticSink,
) -> Result<SourceDb, Box<dyn std::error::Error>> {
    let mut db = SourceDb::new();

    if !config.design.files.is_empty() {
        for path in config.design.explicit_files(dir) {
            db.load_file(&path)
                .map_err(|e| format!("cannot read `{}`: {e}", path.display()))?;
        }
        return Ok(db);
    }

    let discovered = discover_design_files(dir)?;
    let aux = match config.design.aux {
        Some(ref aux) => Some(dir.join(aux)),
        None => {
            let mut manifests = discovered
                .iter()
                .filter(|(_, kind)| *kind == FileKind::Aux)
                .map(|(path, _)| path.clone());
            match (manifests.next(), manifests.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        }
    };

    if let Some(aux) = aux {
        let aux_id = db
            .load_file(&aux)
            .map_err(|e| format!("cannot read `{}`: {e}", aux.display()))?;
        if let Some(names) = parse_aux(db.get_file(aux_id), sink) {
            let base = aux.parent().unwrap_or(dir).to_path_buf();
            for name in names {
                let path = base.join(&name);
                db.load_file(&path)
                    .map_err(|e| format!("cannot read `{}`: {e}", path.display()))?;
            }
            return Ok(db);
        }
    }

    for (path, kind) in discovered {
        if kind != FileKind::Aux {
            db.load_file(&path)?;
        }
    }
    Ok(db)
}

/// Bookshelf files directly inside `dir`, sorted by path.
///
/// AppleDouble `._*` shadows and unrecognized extensions are left out.
pub fn discover_design_files(
    dir: &Path,
) -> Result<Vec<(PathBuf, FileKind)>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(kind) = FileKind::from_path(&path) {
            files.push((path, kind));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Renders diagnostics to stderr. Notes are only shown with `--verbose`.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(sink: &DiagnosticSink, source_db: &SourceDb, global: &GlobalArgs) -> usize {
    if global.quiet {
        return 0;
    }
    let renderer = TerminalRenderer::new(global.color);
    let mut shown = 0;
    for diag in sink.take_all() {
        if diag.severity < Severity::Warning && !global.verbose {
            continue;
        }
        eprintln!("{}", renderer.render(&diag, source_db));
        shown += 1;
    }
    shown
}

/// Picks the CLI strategy if given, else the configured one.
pub fn resolve_strategy(choice: Option<StrategyChoice>, config: &ShelfConfig) -> Strategy {
    match choice {
        Some(StrategyChoice::FirstFitLeftPack) => Strategy::FirstFitLeftPack,
        Some(StrategyChoice::RightToLeftPack) => Strategy::RightToLeftPack,
        None => match config.legalize.strategy {
            LegalizerKind::FirstFitLeftPack => Strategy::FirstFitLeftPack,
            LegalizerKind::RightToLeftPack => Strategy::RightToLeftPack,
        },
    }
}

/// Prints `value` as pretty JSON, or the text produced by `text`.
pub fn print_result<T: Serialize>(
    format: ReportFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        ReportFormat::Text => print!("{}", text()),
    }
    Ok(())
}

/// Formats a length or coordinate with the configured precision.
pub fn fmt_real(value: f64, config: &ShelfConfig) -> String {
    format!("{value:.prec$}", prec = config.report.precision)
}
