//! Human-readable rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use shelf_source::SourceDb;

/// Formats a diagnostic for output.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic, resolving its span through `source_db`.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a compiler-style layout:
///
/// ```text
/// warning[P003]: incomplete row skipped
///   --> ibm01.scl:14:1
///    |
/// 14 | End
///    |
///    = note: missing field: numsites
/// ```
pub struct TerminalRenderer {
    /// Whether to emit ANSI colors for the severity tag.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn severity_tag(&self, severity: Severity) -> String {
        if !self.color {
            return severity.to_string();
        }
        let ansi = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
            Severity::Help => "32",
        };
        format!("\x1b[1;{ansi}m{severity}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = format!(
            "{}[{}]: {}\n",
            self.severity_tag(diag.severity),
            diag.code,
            diag.message
        );

        if !diag.primary_span.is_dummy() {
            let resolved = source_db.resolve_span(diag.primary_span);
            let line_num = resolved.start_line.to_string();
            let padding = " ".repeat(line_num.len());
            let line_text = source_db
                .get_file(diag.primary_span.file)
                .lines()
                .nth(resolved.start_line as usize - 1)
                .map_or("", |line| line.text);

            out.push_str(&format!("  --> {resolved}\n"));
            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_text}\n"));
            out.push_str(&format!("{padding} |\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use shelf_source::Span;

    #[test]
    fn render_with_source_line() {
        let mut db = SourceDb::new();
        let id = db.add_source("chip.scl", "CoreRow Horizontal\n Height : abc\nEnd\n".to_string());
        let line = db.get_file(id).lines().nth(1).unwrap();
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Parse, 2),
            "invalid height",
            line.span,
        );

        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.contains("warning[P002]: invalid height"));
        assert!(out.contains("--> chip.scl:2:1"));
        assert!(out.contains("2 |  Height : abc"));
    }

    #[test]
    fn render_without_span() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Ingest, 1),
            "missing required file(s): .scl",
            Span::DUMMY,
        )
        .with_help("pass the design directory containing all four files");

        let out = TerminalRenderer::new(false).render(&diag, &db);
        assert!(out.starts_with("error[I001]"));
        assert!(!out.contains("-->"));
        assert!(out.contains("= help: pass the design directory"));
    }

    #[test]
    fn color_wraps_severity() {
        let db = SourceDb::new();
        let diag = Diagnostic::note(DiagnosticCode::new(Category::Ingest, 2), "n", Span::DUMMY);
        let out = TerminalRenderer::new(true).render(&diag, &db);
        assert!(out.starts_with("\x1b[1;36mnote\x1b[0m[I002]"));
    }
}
