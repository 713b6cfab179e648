//! `shelf legalize`: greedy row packing of the primary ledger.

use serde::Serialize;
use shelf_diagnostics::DiagnosticSink;
use shelf_place::metrics::{legality_report, total_wirelength};
use shelf_place::{write_pl, LegalityReport, Strategy};

use crate::pipeline::{fmt_real, load_design, print_result, render_diagnostics, resolve_strategy};
use crate::{GlobalArgs, LegalizeArgs};

#[derive(Serialize)]
struct LegalizeOutput<'a> {
    strategy: Strategy,
    placed: usize,
    failures: &'a [String],
    hpwl: f64,
    legality: Option<LegalityReport>,
}

/// Runs the `shelf legalize` command.
///
/// Exits with 1 when some node could not be placed.
pub fn run(args: &LegalizeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if args.design.trial {
        return Err("legalization always starts from the primary ledger; drop `--trial`".into());
    }
    let loaded = load_design(&args.design, global)?;
    let strategy = resolve_strategy(args.strategy, &loaded.config);
    if !global.quiet {
        eprintln!(" Legalizing with {strategy}");
    }

    let result = loaded.session.legalize(strategy);
    let sink = DiagnosticSink::new();
    result.emit_diagnostics(&sink);
    render_diagnostics(&sink, &loaded.source_db, global);

    let design = loaded.session.design();
    let hpwl = total_wirelength(&design.nets, &design.nodes, &result.placement);
    let legality = design
        .die()
        .map(|die| legality_report(design, die, &result.placement));

    if let Some(ref path) = args.output {
        std::fs::write(path, write_pl(&design.nodes, &result.placement, Some(hpwl)))
            .map_err(|e| format!("cannot write `{}`: {e}", path.display()))?;
        if !global.quiet {
            eprintln!("      Wrote {}", path.display());
        }
    }

    let output = LegalizeOutput {
        strategy,
        placed: result.placement.len(),
        failures: &result.failures,
        hpwl,
        legality,
    };
    print_result(args.design.format, &output, || {
        let mut out = format!(
            "placed {} node(s), {} failed\nwirelength {}\n",
            output.placed,
            output.failures.len(),
            fmt_real(hpwl, &loaded.config)
        );
        if let Some(l) = output.legality {
            out.push_str(&format!(
                "overlaps {}, misaligned {}, out of bounds {}\n",
                l.overlaps, l.misaligned, l.out_of_bounds
            ));
        }
        for node in output.failures {
            out.push_str(&format!("  failed {node}\n"));
        }
        out
    })?;

    Ok(if result.is_complete() { 0 } else { 1 })
}
