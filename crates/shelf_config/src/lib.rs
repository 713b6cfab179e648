//! Parsing and validation of the optional `shelf.toml` design configuration.
//!
//! A design directory may carry a `shelf.toml` that names its Bookshelf
//! files and sets defaults for ingestion, the trial ledger seed,
//! legalization, and report formatting. Without one, [`ShelfConfig::default`]
//! applies.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
