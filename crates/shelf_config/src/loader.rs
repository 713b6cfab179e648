//! Loading and validating `shelf.toml`.

use crate::error::ConfigError;
use crate::types::ShelfConfig;
use std::io::ErrorKind;
use std::path::Path;

/// File name looked up in a design directory.
pub const CONFIG_FILE_NAME: &str = "shelf.toml";

/// Loads `<design_dir>/shelf.toml`, or the defaults if there is none.
pub fn load_config(design_dir: &Path) -> Result<ShelfConfig, ConfigError> {
    match std::fs::read_to_string(design_dir.join(CONFIG_FILE_NAME)) {
        Ok(content) => load_config_from_str(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ShelfConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Loads a configuration from an explicit path. The file must exist.
pub fn load_config_file(path: &Path) -> Result<ShelfConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<ShelfConfig, ConfigError> {
    let config: ShelfConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ShelfConfig) -> Result<(), ConfigError> {
    if config.report.top_nets == 0 {
        return Err(ConfigError::ValidationError(
            "report.top_nets must be at least 1".to_string(),
        ));
    }
    if config.report.precision > 9 {
        return Err(ConfigError::ValidationError(
            "report.precision must be between 0 and 9".to_string(),
        ));
    }
    if let Some(aux) = &config.design.aux {
        if aux.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "design.aux must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LegalizerKind;

    #[test]
    fn empty_file_gives_defaults() {
        let config = load_config_from_str("").unwrap();
        assert!(config.design.name.is_none());
        assert!(config.design.files.is_empty());
        assert!(config.ingest.fold_placement_case);
        assert!(config.trial.seed.is_none());
        assert_eq!(config.legalize.strategy, LegalizerKind::FirstFitLeftPack);
        assert_eq!(config.report.top_nets, 10);
        assert_eq!(config.report.precision, 2);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[design]
name = "ibm01"
aux = "ibm01.aux"

[ingest]
fold_placement_case = false

[trial]
seed = 7

[legalize]
strategy = "right-to-left-pack"

[report]
top_nets = 25
precision = 3
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.design.name.as_deref(), Some("ibm01"));
        assert_eq!(config.design.aux.as_deref(), Some("ibm01.aux"));
        assert!(!config.ingest.fold_placement_case);
        assert_eq!(config.trial.seed, Some(7));
        assert_eq!(config.legalize.strategy, LegalizerKind::RightToLeftPack);
        assert_eq!(config.report.top_nets, 25);
        assert_eq!(config.report.precision, 3);
    }

    #[test]
    fn zero_top_nets_rejected() {
        let err = load_config_from_str("[report]\ntop_nets = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn excessive_precision_rejected() {
        let err = load_config_from_str("[report]\nprecision = 12\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn blank_aux_rejected() {
        let err = load_config_from_str("[design]\naux = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("[design\nname = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file_in_dir_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.report.top_nets, 10);
    }

    #[test]
    fn reads_file_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[trial]\nseed = 99\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.trial.seed, Some(99));
    }

    #[test]
    fn explicit_file_must_exist() {
        let err = load_config_file(Path::new("/nonexistent/shelf.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
