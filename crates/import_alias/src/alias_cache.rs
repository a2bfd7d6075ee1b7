use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;
use std::rc::Weak;

use import_alias_ast::Annotation;
use import_alias_ast::NodeId;
use import_alias_ast::UnitHandle;
use import_alias_ast::UnitId;
use xxhash_rust::xxh3::Xxh3Builder;

use crate::AliasTable;

/// Identity of one annotation occurrence across passes over the same unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationKey {
  pub unit: UnitId,
  pub node: NodeId,
}

impl AnnotationKey {
  pub fn new(unit: UnitId, node: NodeId) -> Self {
    AnnotationKey { unit, node }
  }
}

struct CacheEntry {
  /// Never upgraded for longer than a liveness check; the unit's tree must stay collectable.
  owner: Weak<UnitHandle>,
  table: Rc<AliasTable>,
  /// Key of the annotation as originally written, shared by its canonical marker's entry.
  occurrence: AnnotationKey,
}

impl CacheEntry {
  fn is_live(&self) -> bool {
    self.owner.strong_count() > 0
  }
}

/// Alias tables keyed by annotation occurrence.
///
/// A table is built once per occurrence and registered under both the original annotation and
/// the canonical marker that replaces it, so later passes that only see the marker get the same
/// [`Rc`]. Entries hold a [`Weak`] reference to their unit and are dropped once the unit is
/// gone.
#[derive(Default)]
pub struct AliasCache {
  entries: HashMap<AnnotationKey, CacheEntry, Xxh3Builder>,
  rewritten: HashSet<AnnotationKey, Xxh3Builder>,
}

impl AliasCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the table for annotation `id` in `annotations`, building it on first use.
  ///
  /// Building replaces the annotation in `annotations` with a zero-argument marker carrying a
  /// fresh node id. Returns `None` when nothing is cached for `id` and no annotation with that
  /// id is present.
  pub fn build(
    &mut self,
    unit: &Rc<UnitHandle>,
    annotations: &mut [Annotation],
    id: NodeId,
  ) -> Option<Rc<AliasTable>> {
    self.prune();

    let key = AnnotationKey::new(unit.id(), id);
    if let Some(table) = self.lookup(key) {
      tracing::trace!(node = key.node.0, "Reusing alias table");
      return Some(table);
    }

    let annotation = annotations.iter_mut().find(|annotation| annotation.id == id)?;
    let table = Rc::new(AliasTable::from_annotation(annotation));
    let marker = annotation.to_marker(unit.fresh_node_id());
    let marker_key = AnnotationKey::new(unit.id(), marker.id);
    *annotation = marker;

    tracing::debug!(
      node = key.node.0,
      marker = marker_key.node.0,
      aliases = table.len(),
      "Built alias table"
    );

    for entry_key in [key, marker_key] {
      self.entries.insert(
        entry_key,
        CacheEntry {
          owner: Rc::downgrade(unit),
          table: table.clone(),
          occurrence: key,
        },
      );
    }

    Some(table)
  }

  /// Table registered for `key`, which may be either the original annotation or its marker.
  pub fn lookup(&self, key: AnnotationKey) -> Option<Rc<AliasTable>> {
    self
      .entries
      .get(&key)
      .filter(|entry| entry.is_live())
      .map(|entry| entry.table.clone())
  }

  /// Records that the scope of `key`'s occurrence has been rewritten.
  pub fn mark_rewritten(&mut self, key: AnnotationKey) {
    if let Some(entry) = self.entries.get(&key) {
      self.rewritten.insert(entry.occurrence);
    }
  }

  pub fn is_rewritten(&self, key: AnnotationKey) -> bool {
    self
      .entries
      .get(&key)
      .is_some_and(|entry| self.rewritten.contains(&entry.occurrence))
  }

  /// Drops entries whose unit no longer exists.
  pub fn prune(&mut self) {
    let before = self.entries.len();
    self.entries.retain(|_, entry| entry.is_live());
    if self.entries.len() != before {
      tracing::trace!(dropped = before - self.entries.len(), "Pruned alias cache");
      let entries = &self.entries;
      self.rewritten.retain(|key| entries.contains_key(key));
    }
  }

  /// Drops every entry belonging to `unit`.
  pub fn discard_unit(&mut self, unit: UnitId) {
    self.entries.retain(|key, _| key.unit != unit);
    self.rewritten.retain(|key| key.unit != unit);
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use import_alias_ast::AnnotationArg;
  use import_alias_ast::AnnotationStyle;
  use import_alias_ast::Expr;
  use import_alias_ast::Ident;
  use import_alias_ast::Lit;
  use import_alias_ast::LitKind;
  use import_alias_ast::Span;
  use pretty_assertions::assert_eq;

  use super::*;

  fn import(unit: &UnitHandle, pairs: &[(&str, &str)]) -> Annotation {
    Annotation {
      id: unit.fresh_node_id(),
      span: Span::new(0, 10),
      name: vec![Ident::new("Import", Span::DUMMY)],
      style: AnnotationStyle::Normal,
      args: pairs
        .iter()
        .map(|(name, path)| AnnotationArg {
          name: Ident::new(*name, Span::DUMMY),
          value: Expr::Lit(Lit {
            span: Span::DUMMY,
            kind: LitKind::Str,
            raw: format!("\"{}\"", path),
          }),
        })
        .collect(),
    }
  }

  #[test]
  fn replaces_annotation_with_marker() {
    let unit = UnitHandle::new();
    let mut annotations = vec![import(&unit, &[("UList", "java.util.List")])];
    let id = annotations[0].id;

    let table = AliasCache::new()
      .build(&unit, &mut annotations, id)
      .unwrap();

    assert_eq!(table.get("UList").unwrap().to_string(), "java.util.List");
    assert_ne!(annotations[0].id, id);
    assert!(annotations[0].is_marker());
    assert_eq!(annotations[0].simple_name(), "Import");
  }

  #[test]
  fn building_twice_returns_the_same_table() {
    let unit = UnitHandle::new();
    let mut cache = AliasCache::new();
    let mut annotations = vec![import(&unit, &[("A", "x.A")])];
    let id = annotations[0].id;

    let first = cache.build(&unit, &mut annotations, id).unwrap();
    // The original annotation is gone, so a second build can only succeed from the cache.
    let second = cache.build(&unit, &mut annotations, id).unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(annotations.len(), 1);
  }

  #[test]
  fn original_and_marker_resolve_to_the_same_table() {
    let unit = UnitHandle::new();
    let mut cache = AliasCache::new();
    let mut annotations = vec![import(&unit, &[("A", "x.A")])];
    let id = annotations[0].id;

    let table = cache.build(&unit, &mut annotations, id).unwrap();
    let marker = annotations[0].id;

    let by_original = cache.lookup(AnnotationKey::new(unit.id(), id)).unwrap();
    let by_marker = cache.lookup(AnnotationKey::new(unit.id(), marker)).unwrap();
    let rebuilt_from_marker = cache.build(&unit, &mut annotations, marker).unwrap();

    assert!(Rc::ptr_eq(&table, &by_original));
    assert!(Rc::ptr_eq(&table, &by_marker));
    assert!(Rc::ptr_eq(&table, &rebuilt_from_marker));
    assert_eq!(cache.len(), 2);
  }

  #[test]
  fn lookup_of_unknown_occurrence_is_absent() {
    let unit = UnitHandle::new();
    let cache = AliasCache::new();
    assert!(cache.lookup(AnnotationKey::new(unit.id(), NodeId(42))).is_none());
  }

  #[test]
  fn missing_annotation_builds_nothing() {
    let unit = UnitHandle::new();
    let mut cache = AliasCache::new();
    assert!(cache.build(&unit, &mut [], NodeId(7)).is_none());
    assert!(cache.is_empty());
  }

  #[test]
  fn does_not_keep_units_alive() {
    let mut cache = AliasCache::new();
    let unit = UnitHandle::new();
    let weak_unit = Rc::downgrade(&unit);
    let mut annotations = vec![import(&unit, &[("A", "x.A")])];
    let id = annotations[0].id;
    let key = AnnotationKey::new(unit.id(), id);

    let table = cache.build(&unit, &mut annotations, id).unwrap();
    drop(annotations);
    drop(unit);

    assert!(weak_unit.upgrade().is_none());
    assert!(cache.lookup(key).is_none());
    // The caller's handle on the table is unaffected.
    assert_eq!(table.len(), 1);

    cache.prune();
    assert!(cache.is_empty());
  }

  #[test]
  fn discard_unit_drops_only_that_unit() {
    let mut cache = AliasCache::new();
    let first = UnitHandle::new();
    let second = UnitHandle::new();
    let mut first_annotations = vec![import(&first, &[("A", "x.A")])];
    let mut second_annotations = vec![import(&second, &[("B", "x.B")])];
    let first_id = first_annotations[0].id;
    let second_id = second_annotations[0].id;

    cache.build(&first, &mut first_annotations, first_id);
    cache.build(&second, &mut second_annotations, second_id);
    cache.mark_rewritten(AnnotationKey::new(first.id(), first_id));
    cache.discard_unit(first.id());

    assert!(cache.lookup(AnnotationKey::new(first.id(), first_id)).is_none());
    assert!(!cache.is_rewritten(AnnotationKey::new(first.id(), first_id)));
    assert!(cache.lookup(AnnotationKey::new(second.id(), second_id)).is_some());
  }

  #[test]
  fn rewritten_flag_is_shared_by_original_and_marker() {
    let unit = UnitHandle::new();
    let mut cache = AliasCache::new();
    let mut annotations = vec![import(&unit, &[("A", "x.A")])];
    let id = annotations[0].id;

    cache.build(&unit, &mut annotations, id);
    let marker = annotations[0].id;
    assert!(!cache.is_rewritten(AnnotationKey::new(unit.id(), marker)));

    cache.mark_rewritten(AnnotationKey::new(unit.id(), id));

    assert!(cache.is_rewritten(AnnotationKey::new(unit.id(), id)));
    assert!(cache.is_rewritten(AnnotationKey::new(unit.id(), marker)));
  }
}
