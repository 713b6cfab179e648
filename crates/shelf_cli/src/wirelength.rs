//! `shelf wirelength`: total HPWL, or the HPWL of one net.

use serde::Serialize;
use shelf_place::Ledger;

use crate::pipeline::{fmt_real, load_design, print_result};
use crate::{GlobalArgs, WirelengthArgs};

#[derive(Serialize)]
struct WirelengthReport<'a> {
    ledger: Ledger,
    #[serde(skip_serializing_if = "Option::is_none")]
    net: Option<&'a str>,
    hpwl: f64,
}

/// Runs the `shelf wirelength` command.
pub fn run(args: &WirelengthArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_design(&args.design, global)?;
    let ledger = loaded.ledger;
    let hpwl = match args.net {
        Some(ref net) => loaded.session.net_wirelength(ledger, net)?,
        None => loaded.session.total_wirelength(ledger)?,
    };
    let report = WirelengthReport {
        ledger,
        net: args.net.as_deref(),
        hpwl,
    };

    print_result(args.design.format, &report, || match report.net {
        Some(net) => format!("{net}: {}\n", fmt_real(hpwl, &loaded.config)),
        None => format!("total wirelength ({ledger}): {}\n", fmt_real(hpwl, &loaded.config)),
    })?;
    Ok(0)
}
