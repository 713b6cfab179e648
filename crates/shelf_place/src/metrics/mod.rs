//! Wirelength and legality metrics over a design and one placement.

pub mod hpwl;
pub mod legality;

pub use hpwl::{net_hpwl, total_wirelength};
pub use legality::{legality_details, legality_report, LegalityDetails, LegalityReport, PlacedRect};
