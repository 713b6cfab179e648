//! `shelf edit`: move one node and report the new wirelength.

use shelf_place::write_pl;

use crate::pipeline::{fmt_real, load_design, print_result};
use crate::{EditArgs, GlobalArgs};

/// Runs the `shelf edit` command.
pub fn run(args: &EditArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut loaded = load_design(&args.design, global)?;
    let ledger = loaded.ledger;
    let outcome = loaded
        .session
        .edit_coordinate(ledger, &args.id, args.x, args.y)?;

    if let Some(ref path) = args.output {
        let placement = loaded.session.placement(ledger)?;
        let nodes = &loaded.session.design().nodes;
        std::fs::write(path, write_pl(nodes, placement, Some(outcome.total_wirelength)))
            .map_err(|e| format!("cannot write `{}`: {e}", path.display()))?;
        if !global.quiet {
            eprintln!("      Wrote {}", path.display());
        }
    }

    print_result(args.design.format, &outcome, || {
        let config = &loaded.config;
        let mut out = format!(
            "moved {} to ({}, {}) in {ledger} ledger\ntotal wirelength {}\n",
            outcome.node_id,
            fmt_real(args.x, config),
            fmt_real(args.y, config),
            fmt_real(outcome.total_wirelength, config)
        );
        for net in &outcome.affected {
            out.push_str(&format!("  {} {}\n", net.net_id, fmt_real(net.hpwl, config)));
        }
        out
    })?;
    Ok(0)
}
