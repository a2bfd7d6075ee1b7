use std::path::Path;

use anyhow::Context;
use import_alias_ast::Annotation;
use serde::Deserialize;
use serde::Serialize;

/// What to do when a multi-segment alias matches a reference that can only hold one segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedUpgradeMode {
  /// Leave the reference as written
  #[default]
  Ignore,
  /// Leave the reference as written and report a warning diagnostic
  Warn,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportAliasConfig {
  /// Qualified name of the alias annotation. Unqualified uses match on the last segment.
  pub annotation_name: String,
  pub unsupported_upgrade: UnsupportedUpgradeMode,
}

impl Default for ImportAliasConfig {
  fn default() -> Self {
    ImportAliasConfig {
      annotation_name: String::from("lombok.Import"),
      unsupported_upgrade: UnsupportedUpgradeMode::default(),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid import alias config: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Annotation name must not be empty")]
  EmptyAnnotationName,
}

impl ImportAliasConfig {
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
    let config: ImportAliasConfig = serde_json::from_str(json)?;
    if config.annotation_name.trim().is_empty() {
      return Err(ConfigError::EmptyAnnotationName);
    }
    Ok(config)
  }

  pub fn from_file(path: &Path) -> anyhow::Result<Self> {
    let json = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = Self::from_json_str(&json)
      .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "Loaded import alias config");
    Ok(config)
  }

  /// Last segment of the configured annotation name.
  pub fn simple_name(&self) -> &str {
    self
      .annotation_name
      .rsplit('.')
      .next()
      .unwrap_or(&self.annotation_name)
  }

  /// Whether `annotation` is written as the configured alias annotation.
  ///
  /// `@Import` matches `lombok.Import`, and so does `@lombok.Import`; `@other.Import` does not.
  pub fn matches(&self, annotation: &Annotation) -> bool {
    if annotation.name.len() > 1 {
      annotation.qualified_name() == self.annotation_name
    } else {
      annotation.simple_name() == self.simple_name()
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use import_alias_parser::parse_compilation_unit;
  use pretty_assertions::assert_eq;

  use super::*;

  fn annotation(source: &str) -> Annotation {
    let unit = parse_compilation_unit(&format!("{source} class Test {{}}")).unwrap();
    unit.types[0].annotations[0].clone()
  }

  #[test]
  fn defaults_apply_to_missing_fields() {
    assert_eq!(
      ImportAliasConfig::from_json_str("{}").unwrap(),
      ImportAliasConfig::default()
    );

    let config = ImportAliasConfig::from_json_str(r#"{"unsupportedUpgrade": "warn"}"#).unwrap();
    assert_eq!(config.annotation_name, "lombok.Import");
    assert_eq!(config.unsupported_upgrade, UnsupportedUpgradeMode::Warn);
  }

  #[test]
  fn rejects_unknown_mode() {
    let error = ImportAliasConfig::from_json_str(r#"{"unsupportedUpgrade": "fail"}"#).unwrap_err();
    assert!(matches!(error, ConfigError::Json(..)));
  }

  #[test]
  fn rejects_empty_annotation_name() {
    let error = ImportAliasConfig::from_json_str(r#"{"annotationName": " "}"#).unwrap_err();
    assert!(matches!(error, ConfigError::EmptyAnnotationName));
  }

  #[test]
  fn matches_simple_and_qualified_names() {
    let config = ImportAliasConfig::default();

    assert!(config.matches(&annotation("@Import(A = a.A)")));
    assert!(config.matches(&annotation("@lombok.Import(A = a.A)")));
    assert!(!config.matches(&annotation("@other.Import(A = a.A)")));
    assert!(!config.matches(&annotation("@Deprecated")));
  }

  #[test]
  fn matches_custom_annotation_name() {
    let config = ImportAliasConfig {
      annotation_name: String::from("Alias"),
      ..Default::default()
    };

    assert!(config.matches(&annotation("@Alias(A = a.A)")));
    assert!(!config.matches(&annotation("@Import(A = a.A)")));
  }

  #[test]
  fn loads_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"annotationName": "my.Alias"}}"#).unwrap();

    let config = ImportAliasConfig::from_file(file.path()).unwrap();

    assert_eq!(config.annotation_name, "my.Alias");
    assert_eq!(config.simple_name(), "Alias");
  }

  #[test]
  fn reports_the_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let error = ImportAliasConfig::from_file(&path).unwrap_err();

    assert!(error.to_string().contains("missing.json"));
  }
}
