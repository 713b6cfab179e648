//! Line-oriented parsers for the Bookshelf companion files.
//!
//! Each parser reads one [`SourceFile`](shelf_source::SourceFile) and returns
//! the records it recognized. Nothing here fails: a line that cannot be
//! turned into a record is skipped and, unless it is a header or comment, a
//! warning carrying the line's span is emitted into the
//! [`DiagnosticSink`](shelf_diagnostics::DiagnosticSink).
//!
//! | Code   | Meaning                                      |
//! |--------|----------------------------------------------|
//! | `P001` | `.nodes` record skipped                      |
//! | `P002` | `.pl` record skipped                         |
//! | `P003` | `.scl` row field has a non-numeric value     |
//! | `P004` | `.scl` row discarded for missing fields      |
//! | `P005` | `.nets` member count differs from the degree |
//! | `P006` | `.aux` file has no `RowBasedPlacement` line  |
//! | `P007` | `.nodes` id declared twice                   |

pub mod aux;
pub mod nets;
pub mod nodes;
pub mod pl;
pub mod scl;

pub use aux::parse_aux;
pub use nets::parse_nets;
pub use nodes::parse_nodes;
pub use pl::parse_pl;
pub use scl::parse_scl;

use shelf_diagnostics::{Category, DiagnosticCode};

/// Parses a real number the way every Bookshelf field is read.
///
/// Surrounding whitespace is ignored; exponents and a leading sign are
/// accepted.
pub fn parse_real(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}

/// Whether a tokenized line is file boilerplate rather than a record.
///
/// Covers blank lines, `#` comments, the `UCLA <kind> 1.0` banner, and
/// `Key : value` count headers such as `NumNodes : 12`.
pub(crate) fn is_boilerplate(tokens: &[&str]) -> bool {
    match tokens {
        [] => true,
        [first, ..] if first.starts_with('#') => true,
        ["UCLA", ..] => true,
        [_, ":", ..] => true,
        _ => false,
    }
}

pub(crate) fn code(number: u16) -> DiagnosticCode {
    DiagnosticCode::new(Category::Parse, number)
}
