//! `shelf node`: coordinates of one node.

use serde::Serialize;
use shelf_place::{Ledger, Point};

use crate::pipeline::{fmt_real, load_design, print_result};
use crate::{GlobalArgs, NodeArgs};

#[derive(Serialize)]
struct NodeReport<'a> {
    ledger: Ledger,
    node: &'a str,
    coordinates: Point,
}

/// Runs the `shelf node` command.
pub fn run(args: &NodeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_design(&args.design, global)?;
    let at = loaded.session.node_coordinates(loaded.ledger, &args.id)?;
    let report = NodeReport {
        ledger: loaded.ledger,
        node: &args.id,
        coordinates: at,
    };

    print_result(args.design.format, &report, || {
        format!(
            "{} ({}, {})\n",
            args.id,
            fmt_real(at.x, &loaded.config),
            fmt_real(at.y, &loaded.config)
        )
    })?;
    Ok(0)
}
