//! Configuration types deserialized from `shelf.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// The whole configuration file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ShelfConfig {
    /// Which files make up the design.
    #[serde(default)]
    pub design: DesignConfig,
    /// Ingestion behaviour.
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Random trial ledger settings.
    #[serde(default)]
    pub trial: TrialConfig,
    /// Legalization defaults.
    #[serde(default)]
    pub legalize: LegalizeConfig,
    /// Text report formatting.
    #[serde(default)]
    pub report: ReportConfig,
}

/// The `[design]` section.
#[derive(Debug, Default, Deserialize)]
pub struct DesignConfig {
    /// Display name; front ends fall back to the directory name.
    pub name: Option<String>,
    /// A Bookshelf `.aux` manifest naming the companion files.
    pub aux: Option<String>,
    /// Explicit file list, as one string or a list. Overrides discovery.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub files: Vec<String>,
}

impl DesignConfig {
    /// Resolves `files` against the design directory.
    pub fn explicit_files(&self, design_dir: &Path) -> Vec<PathBuf> {
        self.files.iter().map(|f| design_dir.join(f)).collect()
    }
}

/// Accepts `files = "a.nodes"` as well as `files = ["a.nodes", "a.pl"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a file name or a list of file names")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut files = Vec::new();
            while let Some(file) = seq.next_element::<String>()? {
                files.push(file);
            }
            Ok(files)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// The `[ingest]` section.
#[derive(Debug, Deserialize)]
pub struct IngestConfig {
    /// Lowercase `.pl` node ids when seeding the primary ledger so they
    /// match the lowercased ids from `.nodes` and `.nets`.
    #[serde(default = "default_true")]
    pub fold_placement_case: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            fold_placement_case: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The `[trial]` section.
#[derive(Debug, Default, Deserialize)]
pub struct TrialConfig {
    /// Seed for the random trial ledger; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// The `[legalize]` section.
#[derive(Debug, Default, Deserialize)]
pub struct LegalizeConfig {
    /// Strategy used when none is given on the command line.
    #[serde(default)]
    pub strategy: LegalizerKind,
}

/// Names of the row legalization heuristics.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LegalizerKind {
    /// Pack nodes leftwards into the first row with room, in node order.
    #[default]
    FirstFitLeftPack,
    /// Pack nodes rightwards by descending original x.
    RightToLeftPack,
}

/// The `[report]` section.
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Rows printed by the ranked net listing in text mode.
    #[serde(default = "default_top_nets")]
    pub top_nets: usize,
    /// Decimal places for lengths and coordinates in text mode.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_nets: default_top_nets(),
            precision: default_precision(),
        }
    }
}

fn default_top_nets() -> usize {
    10
}

fn default_precision() -> usize {
    2
}
