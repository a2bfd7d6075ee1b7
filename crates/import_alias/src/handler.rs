use std::rc::Rc;

use import_alias_ast::AnnotatedMut;
use import_alias_ast::DeclKind;
use import_alias_ast::NodeId;
use import_alias_ast::UnitHandle;

use crate::config::ImportAliasConfig;
use crate::config::UnsupportedUpgradeMode;
use crate::rewrite_scope;
use crate::AliasCache;
use crate::AliasTable;
use crate::AnnotationKey;
use crate::Diagnostic;
use crate::RewriteStats;
use crate::ScopeMut;
use crate::UnsupportedUpgrade;

/// Applies alias annotations to the declarations that carry them.
///
/// One handler should be reused for every pass over the same units; its cache is what keeps a
/// second pass from splitting the canonical marker again or rewriting a scope twice.
#[derive(Default)]
pub struct ImportAliasHandler {
  config: ImportAliasConfig,
  cache: AliasCache,
  diagnostics: Vec<Diagnostic>,
}

impl ImportAliasHandler {
  pub fn new(config: ImportAliasConfig) -> Self {
    ImportAliasHandler {
      config,
      cache: AliasCache::new(),
      diagnostics: Vec::new(),
    }
  }

  pub fn config(&self) -> &ImportAliasConfig {
    &self.config
  }

  pub fn cache(&self) -> &AliasCache {
    &self.cache
  }

  pub fn cache_mut(&mut self) -> &mut AliasCache {
    &mut self.cache
  }

  /// Builds or fetches the alias table of annotation `id` on `target`.
  ///
  /// The annotation is replaced by its canonical marker the first time this runs. No placement
  /// check and no rewriting happens here.
  pub fn pre_handle(
    &mut self,
    mut target: AnnotatedMut<'_>,
    unit: &Rc<UnitHandle>,
    id: NodeId,
  ) -> Option<Rc<AliasTable>> {
    self.cache.build(unit, target.annotations_mut(), id)
  }

  /// Rewrites the type references in the scope of annotation `id` on `target`.
  ///
  /// Anything but a type or method declaration gets one error diagnostic and is left untouched.
  /// A scope is rewritten at most once per occurrence; repeated calls return empty stats.
  pub fn handle(
    &mut self,
    mut target: AnnotatedMut<'_>,
    unit: &Rc<UnitHandle>,
    id: NodeId,
  ) -> Option<RewriteStats> {
    if !matches!(target.kind(), DeclKind::Type | DeclKind::Method) {
      self.report_misplaced(&target, id);
      return None;
    }

    let key = AnnotationKey::new(unit.id(), id);
    let table = self.cache.build(unit, target.annotations_mut(), id)?;
    if self.cache.is_rewritten(key) {
      tracing::trace!(
        node = id.0,
        decl = target.name().sym.as_str(),
        "Scope already rewritten"
      );
      return Some(RewriteStats::default());
    }

    let decl = target.name().sym.clone();
    let scope = match target {
      AnnotatedMut::Type(decl) => ScopeMut::Type(decl),
      AnnotatedMut::Method(decl) => ScopeMut::Method(decl),
      _ => return None,
    };
    let config = &self.config;
    let report = rewrite_scope(scope, &table, &|annotation| config.matches(annotation));
    self.cache.mark_rewritten(key);

    tracing::debug!(
      decl = decl.as_str(),
      aliases = table.len(),
      replaced = report.stats.replaced,
      expanded = report.stats.expanded,
      unsupported = report.stats.unsupported,
      "Applied import aliases"
    );

    if self.config.unsupported_upgrade == UnsupportedUpgradeMode::Warn {
      for upgrade in &report.unsupported {
        self.report_unsupported(upgrade);
      }
    }

    Some(report.stats)
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
    std::mem::take(&mut self.diagnostics)
  }

  fn report_misplaced(&mut self, target: &AnnotatedMut<'_>, id: NodeId) {
    let annotation = target.annotations().iter().find(|annotation| annotation.id == id);
    let name = annotation.map_or_else(|| self.config.simple_name(), |a| a.simple_name());
    let loc = annotation.map_or(target.name().span, |a| a.span);

    tracing::debug!(
      decl = target.name().sym.as_str(),
      kind = ?target.kind(),
      "Misplaced import alias annotation"
    );

    self.diagnostics.push(Diagnostic::error(
      format!("'@{name}' is only legal on types and methods."),
      loc,
    ));
  }

  fn report_unsupported(&mut self, upgrade: &UnsupportedUpgrade) {
    self.diagnostics.push(
      Diagnostic::warning(
        format!(
          "Cannot expand '{}' to '{}' in a reference that only holds a single name.",
          upgrade.alias, upgrade.path
        ),
        upgrade.span,
      )
      .with_hint(format!(
        "Write the reference as '{}' or give the alias a single-name path.",
        upgrade.path
      )),
    );
  }
}
