//! `shelf legality`: overlap, alignment and bounds checks.

use serde::Serialize;
use shelf_place::{LegalityDetails, LegalityReport, Ledger};

use crate::pipeline::{fmt_real, load_design, print_result};
use crate::{GlobalArgs, LegalityArgs};

#[derive(Serialize)]
struct LegalityOutput {
    ledger: Ledger,
    #[serde(flatten)]
    counts: LegalityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<LegalityDetails>,
}

/// Runs the `shelf legality` command.
pub fn run(args: &LegalityArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_design(&args.design, global)?;
    let details = loaded.session.legality_details(loaded.ledger)?;
    let output = LegalityOutput {
        ledger: loaded.ledger,
        counts: details.report(),
        details: args.details.then_some(details),
    };

    print_result(args.design.format, &output, || {
        let c = &output.counts;
        let mut out = format!(
            "overlaps       {}\nmisaligned     {}\nout of bounds  {}\n",
            c.overlaps, c.misaligned, c.out_of_bounds
        );
        if let Some(ref d) = output.details {
            for (a, b) in &d.overlapping_pairs {
                out.push_str(&format!("  overlap     {a} / {b}\n"));
            }
            for (label, list) in [("misaligned", &d.misaligned), ("out of die", &d.out_of_bounds)] {
                for placed in list {
                    let r = placed.rect;
                    out.push_str(&format!(
                        "  {label:<11} {} [{}, {}] x [{}, {}]\n",
                        placed.node,
                        fmt_real(r.x_min, &loaded.config),
                        fmt_real(r.x_max, &loaded.config),
                        fmt_real(r.y_min, &loaded.config),
                        fmt_real(r.y_max, &loaded.config)
                    ));
                }
            }
        }
        out
    })?;
    Ok(0)
}
