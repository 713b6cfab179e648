//! `shelf summary`: counts of everything ingested.

use serde::Serialize;
use shelf_place::DesignSummary;

use crate::pipeline::{fmt_real, load_design, print_result};
use crate::{DesignArgs, GlobalArgs};

#[derive(Serialize)]
struct SummaryReport<'a> {
    design: &'a str,
    #[serde(flatten)]
    summary: DesignSummary,
}

/// Runs the `shelf summary` command.
pub fn run(args: &DesignArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_design(args, global)?;
    let summary = loaded.session.summary();
    let report = SummaryReport {
        design: &loaded.name,
        summary,
    };

    print_result(args.format, &report, || {
        let s = &report.summary;
        let mut out = format!("design     {}\n", report.design);
        out.push_str(&format!("nodes      {} ({} terminal)\n", s.nodes, s.terminals));
        out.push_str(&format!("nets       {} ({} pins)\n", s.nets, s.pins));
        out.push_str(&format!("rows       {}\n", s.rows));
        if let Some(die) = s.die {
            out.push_str(&format!(
                "die        {} x {}\n",
                fmt_real(die.width, &loaded.config),
                fmt_real(die.height, &loaded.config)
            ));
        }
        out.push_str(&format!("placed     {} primary", s.primary_placed));
        if let Some(trial) = s.trial_placed {
            out.push_str(&format!(", {trial} trial"));
        }
        out.push('\n');
        out
    })?;
    Ok(0)
}
