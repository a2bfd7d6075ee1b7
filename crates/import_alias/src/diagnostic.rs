use import_alias_ast::Span;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum DiagnosticSeverity {
  /// Fails the compilation.
  Error,
  /// Shows a warning but the compilation succeeds.
  Warning,
}

/// A source range to point at, with an optional label.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodeHighlight {
  pub message: Option<String>,
  pub loc: Span,
}

/// A user facing problem found while transforming a unit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
  pub message: String,
  pub code_highlights: Option<Vec<CodeHighlight>>,
  pub hints: Option<Vec<String>>,
  pub severity: DiagnosticSeverity,
  pub documentation_url: Option<String>,
}

impl Diagnostic {
  pub fn error(message: impl Into<String>, loc: Span) -> Self {
    Diagnostic {
      message: message.into(),
      code_highlights: Some(vec![CodeHighlight { message: None, loc }]),
      hints: None,
      severity: DiagnosticSeverity::Error,
      documentation_url: None,
    }
  }

  pub fn warning(message: impl Into<String>, loc: Span) -> Self {
    Diagnostic {
      severity: DiagnosticSeverity::Warning,
      ..Diagnostic::error(message, loc)
    }
  }

  pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
    self.hints.get_or_insert_with(Vec::new).push(hint.into());
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == DiagnosticSeverity::Error
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn serializes_in_camel_case() {
    let diagnostic = Diagnostic::warning("Cannot expand", Span::new(3, 8)).with_hint("Qualify it");

    assert_eq!(
      serde_json::to_value(&diagnostic).unwrap(),
      json!({
        "message": "Cannot expand",
        "codeHighlights": [{ "message": null, "loc": { "lo": 3, "hi": 8 } }],
        "hints": ["Qualify it"],
        "severity": "Warning",
        "documentationUrl": null,
      })
    );
  }
}
