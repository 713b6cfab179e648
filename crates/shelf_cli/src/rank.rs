//! `shelf sizes`, `shelf nets`, `shelf extremes`: ranked views.
//!
//! JSON output lists every entry unless `--limit` is given; text output is
//! cut at `--limit` or `[report] top_nets`.

use serde::Serialize;
use shelf_config::ShelfConfig;
use shelf_place::{Ledger, NetWirelength};

use crate::pipeline::{fmt_real, load_design, print_result};
use crate::{DesignArgs, GlobalArgs, RankArgs};

fn truncated<T: Clone>(items: &[T], limit: Option<usize>) -> Vec<T> {
    match limit {
        Some(n) => items.iter().take(n).cloned().collect(),
        None => items.to_vec(),
    }
}

fn text_limit(args: &RankArgs, config: &ShelfConfig) -> usize {
    args.limit.unwrap_or(config.report.top_nets)
}

/// Runs the `shelf sizes` command.
pub fn run_sizes(args: &RankArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_design(&args.design, global)?;
    let sizes = loaded.session.node_size_ranking()?;
    let shown = text_limit(args, &loaded.config);

    print_result(args.design.format, &truncated(&sizes, args.limit), || {
        let mut out = String::new();
        for entry in sizes.iter().take(shown) {
            let marker = if entry.is_terminal { " (terminal)" } else { "" };
            out.push_str(&format!(
                "{:>12}  {}{marker}\n",
                fmt_real(entry.area, &loaded.config),
                entry.node
            ));
        }
        if sizes.len() > shown {
            out.push_str(&format!("... {} more\n", sizes.len() - shown));
        }
        out
    })?;
    Ok(0)
}

/// Runs the `shelf nets` command.
pub fn run_nets(args: &RankArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_design(&args.design, global)?;
    let nets = loaded.session.net_ranking(loaded.ledger)?;
    let shown = text_limit(args, &loaded.config);

    print_result(args.design.format, &truncated(&nets, args.limit), || {
        let mut out = String::new();
        for net in nets.iter().take(shown) {
            out.push_str(&format!("{}\n", net_line(net, &loaded.config)));
        }
        if nets.len() > shown {
            out.push_str(&format!("... {} more\n", nets.len() - shown));
        }
        out
    })?;
    Ok(0)
}

#[derive(Serialize)]
struct ExtremesReport {
    ledger: Ledger,
    largest: NetWirelength,
    smallest: NetWirelength,
}

/// Runs the `shelf extremes` command.
pub fn run_extremes(args: &DesignArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = load_design(args, global)?;
    let extremes = loaded.session.extreme_nets(loaded.ledger)?;
    let report = ExtremesReport {
        ledger: loaded.ledger,
        largest: extremes.largest,
        smallest: extremes.smallest,
    };

    print_result(args.format, &report, || {
        format!(
            "largest   {}\nsmallest  {}\n",
            net_line(&report.largest, &loaded.config),
            net_line(&report.smallest, &loaded.config)
        )
    })?;
    Ok(0)
}

fn net_line(net: &NetWirelength, config: &ShelfConfig) -> String {
    format!(
        "{:>12}  {} [{}]",
        fmt_real(net.hpwl, config),
        net.net_id,
        net.members.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(id: &str, hpwl: f64) -> NetWirelength {
        NetWirelength {
            net_id: id.into(),
            hpwl,
            members: vec!["a".into(), "b".into()],
        }
    }

    #[test]
    fn truncation() {
        let nets = vec![net("n0", 3.0), net("n1", 2.0), net("n2", 1.0)];
        assert_eq!(truncated(&nets, Some(2)).len(), 2);
        assert_eq!(truncated(&nets, None).len(), 3);
        assert_eq!(truncated(&nets, Some(10)).len(), 3);
    }

    #[test]
    fn net_line_layout() {
        let line = net_line(&net("n7", 15.0), &ShelfConfig::default());
        assert_eq!(line, "       15.00  n7 [a b]");
    }
}
