use std::fmt::Display;
use std::fmt::Formatter;

use import_alias_ast::Annotation;
use indexmap::IndexMap;

/// Replacement path of one alias, `java.util.List` stored as `["java", "util", "List"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasPath {
  segments: Vec<String>,
}

impl AliasPath {
  /// Splits raw path text on `.`.
  ///
  /// Empty pieces are kept, so `"a."` gives `["a", ""]`. Empty text gives no segments at all.
  pub fn parse(raw: &str) -> Self {
    let segments = if raw.is_empty() {
      Vec::new()
    } else {
      raw.split('.').map(String::from).collect()
    };
    AliasPath { segments }
  }

  pub fn segments(&self) -> &[String] {
    &self.segments
  }

  pub fn len(&self) -> usize {
    self.segments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// No segment carries any text. Such paths never change a reference.
  pub fn is_degenerate(&self) -> bool {
    self.segments.iter().all(String::is_empty)
  }
}

impl Display for AliasPath {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.segments.join("."))
  }
}

/// Short name to qualified path mapping of one alias annotation occurrence.
///
/// Entries keep the order they were declared in. Tables are immutable once built.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
  entries: IndexMap<String, AliasPath>,
}

impl AliasTable {
  /// Builds a table from `(name, raw path)` pairs.
  ///
  /// Names are expected to be unique; a repeated name keeps the last path. Pairs with an empty
  /// name are dropped.
  pub fn from_pairs<I, N, P>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (N, P)>,
    N: Into<String>,
    P: AsRef<str>,
  {
    let mut entries = IndexMap::new();
    for (name, raw_path) in pairs {
      let name = name.into();
      if name.is_empty() {
        tracing::trace!(raw_path = raw_path.as_ref(), "Skipping alias without a name");
        continue;
      }
      entries.insert(name, AliasPath::parse(raw_path.as_ref()));
    }
    AliasTable { entries }
  }

  /// Reads every `name = value` member of `annotation`, using the value's raw expression text
  /// as path.
  pub fn from_annotation(annotation: &Annotation) -> Self {
    AliasTable::from_pairs(annotation.member_names().filter_map(|name| {
      annotation
        .raw_expression(name)
        .map(|raw| (name, raw))
    }))
  }

  pub fn get(&self, name: &str) -> Option<&AliasPath> {
    self.entries.get(name)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &AliasPath)> {
    self.entries.iter().map(|(name, path)| (name.as_str(), path))
  }
}
