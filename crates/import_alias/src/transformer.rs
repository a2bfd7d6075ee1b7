use std::rc::Rc;

use import_alias_ast::visit::VisitMut;
use import_alias_ast::visit::VisitMutWith;
use import_alias_ast::AnnotatedMut;
use import_alias_ast::Annotation;
use import_alias_ast::CompilationUnit;
use import_alias_ast::FieldDecl;
use import_alias_ast::LocalVarDecl;
use import_alias_ast::MethodDecl;
use import_alias_ast::NodeId;
use import_alias_ast::Param;
use import_alias_ast::TypeDecl;
use import_alias_ast::UnitHandle;

use crate::config::ImportAliasConfig;
use crate::Diagnostic;
use crate::ImportAliasHandler;
use crate::RewriteStats;

/// Finds alias annotations in a unit and hands each one to an [`ImportAliasHandler`].
///
/// Types and methods are handled after their children, so the innermost alias scope is
/// rewritten first and enclosing scopes leave it alone.
///
/// ```ignore
/// let mut transformer = ImportAliasTransformer::new(config);
/// unit.visit_mut_with(&mut transformer);
/// ```
pub struct ImportAliasTransformer {
  handler: ImportAliasHandler,
  unit: Option<Rc<UnitHandle>>,
  stats: RewriteStats,
  handled: usize,
}

impl ImportAliasTransformer {
  pub fn new(config: ImportAliasConfig) -> Self {
    ImportAliasTransformer {
      handler: ImportAliasHandler::new(config),
      unit: None,
      stats: RewriteStats::default(),
      handled: 0,
    }
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    self.handler.diagnostics()
  }

  pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
    self.handler.take_diagnostics()
  }

  /// Counters summed over every scope rewritten so far.
  pub fn stats(&self) -> RewriteStats {
    self.stats
  }

  /// Number of alias annotations handled, including misplaced ones.
  pub fn handled(&self) -> usize {
    self.handled
  }

  pub fn handler(&self) -> &ImportAliasHandler {
    &self.handler
  }

  pub fn handler_mut(&mut self) -> &mut ImportAliasHandler {
    &mut self.handler
  }

  fn alias_annotations(&self, annotations: &[Annotation]) -> Vec<NodeId> {
    annotations
      .iter()
      .filter(|annotation| self.handler.config().matches(annotation))
      .map(|annotation| annotation.id)
      .collect()
  }

  fn handle_all<T>(&mut self, node: &mut T, target: impl Fn(&mut T) -> AnnotatedMut<'_>) {
    let ids = self.alias_annotations(target(node).annotations());
    if ids.is_empty() {
      return;
    }
    let Some(unit) = self.unit.clone() else {
      tracing::trace!("Skipping alias annotations outside of a compilation unit");
      return;
    };

    for id in ids {
      self.handled += 1;
      if let Some(stats) = self.handler.handle(target(node), &unit, id) {
        self.stats += stats;
      }
    }
  }
}

impl VisitMut for ImportAliasTransformer {
  fn visit_mut_compilation_unit(&mut self, node: &mut CompilationUnit) {
    let previous = self.unit.replace(node.handle.clone());
    node.visit_mut_children_with(self);
    self.unit = previous;
  }

  fn visit_mut_type_decl(&mut self, node: &mut TypeDecl) {
    node.visit_mut_children_with(self);
    self.handle_all(node, |node| AnnotatedMut::Type(node));
  }

  fn visit_mut_method_decl(&mut self, node: &mut MethodDecl) {
    node.visit_mut_children_with(self);
    self.handle_all(node, |node| AnnotatedMut::Method(node));
  }

  fn visit_mut_field_decl(&mut self, node: &mut FieldDecl) {
    self.handle_all(node, |node| AnnotatedMut::Field(node));
    node.visit_mut_children_with(self);
  }

  fn visit_mut_param(&mut self, node: &mut Param) {
    self.handle_all(node, |node| AnnotatedMut::Parameter(node));
    node.visit_mut_children_with(self);
  }

  fn visit_mut_local_var_decl(&mut self, node: &mut LocalVarDecl) {
    self.handle_all(node, |node| AnnotatedMut::LocalVariable(node));
    node.visit_mut_children_with(self);
  }
}
