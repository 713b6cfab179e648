//! `.nets` parser: `NetDegree : k [name]` followed by member lines.

use super::{code, parse_real};
use crate::data::Net;
use shelf_diagnostics::{Diagnostic, DiagnosticSink};
use shelf_source::{SourceFile, Span};

struct OpenNet {
    net: Net,
    degree: Option<usize>,
    span: Span,
}

impl OpenNet {
    fn close(self, sink: &DiagnosticSink, nets: &mut Vec<Net>) {
        if let Some(degree) = self.degree {
            if degree != self.net.members.len() {
                sink.emit(Diagnostic::warning(
                    code(5),
                    format!(
                        "net `{}` declares degree {degree} but lists {} member(s)",
                        self.net.id,
                        self.net.members.len()
                    ),
                    self.span,
                ));
            }
        }
        nets.push(self.net);
    }
}

/// Parses nets in file order, assigning ids `n0`, `n1`, ...
///
/// Any line containing `NetDegree` closes the open net and starts a new one.
/// Inside a net, every other non-blank, non-comment line adds its first
/// token (lowercased) as a member; repeats are kept. Lines before the first
/// `NetDegree` are headers and ignored. A member count that disagrees with
/// the declared degree is reported with `P005` but the net is kept as read.
pub fn parse_nets(file: &SourceFile, sink: &DiagnosticSink) -> Vec<Net> {
    let mut nets = Vec::new();
    let mut open: Option<OpenNet> = None;

    for line in file.lines() {
        if line.text.contains("NetDegree") {
            if let Some(prev) = open.take() {
                prev.close(sink, &mut nets);
            }
            let tokens: Vec<&str> = line.text.split_whitespace().collect();
            let after = tokens
                .iter()
                .position(|t| *t == ":")
                .map_or(&tokens[..0], |i| &tokens[i + 1..]);
            open = Some(OpenNet {
                net: Net {
                    id: format!("n{}", nets.len()),
                    label: after.get(1).map(|s| s.to_string()),
                    members: Vec::new(),
                },
                degree: after
                    .first()
                    .and_then(|t| parse_real(t))
                    .filter(|d| *d >= 0.0 && d.fract() == 0.0)
                    .map(|d| d as usize),
                span: line.span,
            });
            continue;
        }

        let Some(current) = open.as_mut() else {
            continue;
        };
        match line.text.split_whitespace().next() {
            Some(first) if !first.starts_with('#') => {
                current.net.members.push(first.to_lowercase());
            }
            _ => {}
        }
    }

    if let Some(last) = open {
        last.close(sink, &mut nets);
    }

    nets
}
