//! Classification of Bookshelf companion files by extension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The role a file plays in a Bookshelf design.
///
/// The four kinds returned by [`FileKind::REQUIRED`] must all be present for
/// an ingestion batch to succeed. `.aux` files only name the others and
/// `.wts` files are recognized but carry nothing this tool consumes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Cell geometry (`.nodes`).
    Nodes,
    /// Cell coordinates (`.pl`).
    Pl,
    /// Placement-site rows (`.scl`).
    Scl,
    /// Connectivity hyperedges (`.nets`).
    Nets,
    /// Net weights (`.wts`).
    Wts,
    /// Design manifest naming the other files (`.aux`).
    Aux,
}

impl FileKind {
    /// The kinds every ingestion batch must supply, in reporting order.
    pub const REQUIRED: [FileKind; 4] = [
        FileKind::Nodes,
        FileKind::Pl,
        FileKind::Scl,
        FileKind::Nets,
    ];

    /// Classifies a path by its extension.
    ///
    /// Returns `None` for unrecognized extensions and for AppleDouble
    /// metadata files (`._name`), which share the extension of the file they
    /// shadow but hold no design data.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        let name = path.file_name()?.to_str()?;
        if name.starts_with("._") {
            return None;
        }
        match path.extension()?.to_str()? {
            "nodes" => Some(FileKind::Nodes),
            "pl" => Some(FileKind::Pl),
            "scl" => Some(FileKind::Scl),
            "nets" => Some(FileKind::Nets),
            "wts" => Some(FileKind::Wts),
            "aux" => Some(FileKind::Aux),
            _ => None,
        }
    }

    /// The file extension for this kind, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Nodes => "nodes",
            FileKind::Pl => "pl",
            FileKind::Scl => "scl",
            FileKind::Nets => "nets",
            FileKind::Wts => "wts",
            FileKind::Aux => "aux",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_required_kinds() {
        assert_eq!(FileKind::from_path(Path::new("ibm01.nodes")), Some(FileKind::Nodes));
        assert_eq!(FileKind::from_path(Path::new("dir/ibm01.pl")), Some(FileKind::Pl));
        assert_eq!(FileKind::from_path(Path::new("ibm01.scl")), Some(FileKind::Scl));
        assert_eq!(FileKind::from_path(Path::new("ibm01.nets")), Some(FileKind::Nets));
    }

    #[test]
    fn classify_optional_kinds() {
        assert_eq!(FileKind::from_path(Path::new("ibm01.aux")), Some(FileKind::Aux));
        assert_eq!(FileKind::from_path(Path::new("ibm01.wts")), Some(FileKind::Wts));
    }

    #[test]
    fn appledouble_files_ignored() {
        assert_eq!(FileKind::from_path(Path::new("._ibm01.nodes")), None);
    }

    #[test]
    fn unknown_extension_ignored() {
        assert_eq!(FileKind::from_path(Path::new("README.md")), None);
        assert_eq!(FileKind::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn display_is_extension() {
        assert_eq!(format!("{}", FileKind::Scl), "scl");
        assert_eq!(FileKind::Nets.extension(), "nets");
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&FileKind::Nodes).unwrap();
        assert_eq!(json, "\"nodes\"");
    }
}
