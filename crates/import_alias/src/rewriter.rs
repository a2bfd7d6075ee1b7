use std::iter;
use std::ops::AddAssign;

use import_alias_ast::visit::VisitMut;
use import_alias_ast::visit::VisitMutWith;
use import_alias_ast::Annotation;
use import_alias_ast::Ident;
use import_alias_ast::MethodDecl;
use import_alias_ast::Span;
use import_alias_ast::TypeDecl;
use import_alias_ast::TypeRef;
use import_alias_ast::TypeRefShape;

use crate::AliasPath;
use crate::AliasTable;

/// Counters collected while rewriting one scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewriteStats {
  /// Type references visited
  pub visited: usize,
  /// Leading segments replaced by a single-segment path
  pub replaced: usize,
  /// Leading segments expanded into several segments
  pub expanded: usize,
  /// Matches whose path has no usable segment
  pub skipped_degenerate: usize,
  /// Matches left alone because the reference cannot hold several segments
  pub unsupported: usize,
}

impl RewriteStats {
  pub fn changed(&self) -> usize {
    self.replaced + self.expanded
  }
}

impl AddAssign for RewriteStats {
  fn add_assign(&mut self, rhs: Self) {
    self.visited += rhs.visited;
    self.replaced += rhs.replaced;
    self.expanded += rhs.expanded;
    self.skipped_degenerate += rhs.skipped_degenerate;
    self.unsupported += rhs.unsupported;
  }
}

/// A multi-segment alias matched a reference whose shape only holds one segment.
///
/// The reference is left as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedUpgrade {
  pub span: Span,
  pub shape: TypeRefShape,
  pub alias: String,
  pub path: String,
}

/// The declaration whose subtree an alias table applies to.
pub enum ScopeMut<'a> {
  Type(&'a mut TypeDecl),
  Method(&'a mut MethodDecl),
}

/// Result of [`rewrite_scope`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RewriteReport {
  pub stats: RewriteStats,
  pub unsupported: Vec<UnsupportedUpgrade>,
}

/// Replaces the leading segment of every type reference whose leading segment names an alias.
///
/// Only the first segment is ever matched, so `swt.Button` is rewritten through `swt` while
/// `x.UList` is not touched. Type arguments, array dimensions and wildcard bounds are visited
/// as references of their own.
///
/// A nested type or method carrying its own alias annotation is a separate scope and is not
/// entered; only the root passed to the rewriter is rewritten unconditionally.
pub struct ReferenceRewriter<'a> {
  table: &'a AliasTable,
  is_alias: &'a dyn Fn(&Annotation) -> bool,
  depth: usize,
  stats: RewriteStats,
  unsupported: Vec<UnsupportedUpgrade>,
}

impl<'a> ReferenceRewriter<'a> {
  pub fn new(table: &'a AliasTable) -> Self {
    ReferenceRewriter {
      table,
      is_alias: &no_nested_scopes,
      depth: 0,
      stats: RewriteStats::default(),
      unsupported: Vec::new(),
    }
  }

  /// Treats declarations with an annotation matching `is_alias` as scopes of their own.
  pub fn with_nested_scopes(mut self, is_alias: &'a dyn Fn(&Annotation) -> bool) -> Self {
    self.is_alias = is_alias;
    self
  }

  fn owns_scope(&self, annotations: &[Annotation]) -> bool {
    self.depth > 0 && annotations.iter().any(|annotation| (self.is_alias)(annotation))
  }

  pub fn stats(&self) -> RewriteStats {
    self.stats
  }

  pub fn into_report(self) -> RewriteReport {
    RewriteReport {
      stats: self.stats,
      unsupported: self.unsupported,
    }
  }

  fn rewrite(&mut self, node: &mut TypeRef) {
    let table = self.table;
    let Some(leading) = node.leading_segment() else {
      return;
    };
    let Some(path) = table.get(&leading.sym) else {
      return;
    };

    if path.is_degenerate() {
      tracing::trace!(alias = leading.sym.as_str(), "Skipping alias with empty path");
      self.stats.skipped_degenerate += 1;
      return;
    }

    let alias = leading.sym.clone();
    let segments = path.segments();
    if let [segment] = segments {
      if let Some(leading) = node.leading_segment_mut() {
        tracing::trace!(alias = alias.as_str(), to = segment.as_str(), "Replacing type reference");
        leading.sym.clone_from(segment);
        self.stats.replaced += 1;
      }
      return;
    }

    if !node.shape().is_multi_segment() {
      self.record_unsupported(node, alias, path);
      return;
    }

    match node {
      TypeRef::Qualified(ty) => {
        let replacement = expand(&ty.tokens[0], segments);
        ty.tokens.splice(0..1, replacement);
      }
      TypeRef::ParameterizedQualified(ty) => {
        let replacement = expand(&ty.tokens[0], segments);
        ty.tokens.splice(0..1, replacement);
        // The leading segment's arguments stay attached to the segment that now names the type.
        let leading_args = ty.type_args[0].take();
        let type_args = iter::repeat_with(|| None)
          .take(segments.len() - 1)
          .chain(iter::once(leading_args))
          .collect::<Vec<_>>();
        ty.type_args.splice(0..1, type_args);
      }
      _ => return,
    }

    tracing::trace!(alias = alias.as_str(), to = %path, "Expanding type reference");
    self.stats.expanded += 1;
  }

  fn record_unsupported(&mut self, node: &TypeRef, alias: String, path: &AliasPath) {
    tracing::trace!(
      alias = alias.as_str(),
      reference = node.dotted_name().as_str(),
      shape = ?node.shape(),
      "Cannot expand single-segment type reference"
    );
    self.stats.unsupported += 1;
    self.unsupported.push(UnsupportedUpgrade {
      span: node.span(),
      shape: node.shape(),
      alias,
      path: path.to_string(),
    });
  }
}

fn no_nested_scopes(_: &Annotation) -> bool {
  false
}

fn expand(leading: &Ident, segments: &[String]) -> Vec<Ident> {
  segments
    .iter()
    .map(|segment| Ident::new(segment.as_str(), leading.span))
    .collect()
}

impl VisitMut for ReferenceRewriter<'_> {
  fn visit_mut_type_decl(&mut self, node: &mut TypeDecl) {
    if self.owns_scope(&node.annotations) {
      tracing::trace!(decl = node.name.sym.as_str(), "Leaving nested alias scope alone");
      return;
    }
    self.depth += 1;
    node.visit_mut_children_with(self);
    self.depth -= 1;
  }

  fn visit_mut_method_decl(&mut self, node: &mut MethodDecl) {
    if self.owns_scope(&node.annotations) {
      tracing::trace!(decl = node.name.sym.as_str(), "Leaving nested alias scope alone");
      return;
    }
    self.depth += 1;
    node.visit_mut_children_with(self);
    self.depth -= 1;
  }

  fn visit_mut_type_ref(&mut self, node: &mut TypeRef) {
    self.stats.visited += 1;
    self.rewrite(node);
    node.visit_mut_children_with(self);
  }
}

/// Rewrites every type reference in the subtree of `scope` through `table`.
///
/// Nested declarations with an annotation matching `is_alias` are skipped; their own table
/// governs them.
pub fn rewrite_scope(
  scope: ScopeMut<'_>,
  table: &AliasTable,
  is_alias: &dyn Fn(&Annotation) -> bool,
) -> RewriteReport {
  let mut rewriter = ReferenceRewriter::new(table).with_nested_scopes(is_alias);
  match scope {
    ScopeMut::Type(decl) => decl.visit_mut_with(&mut rewriter),
    ScopeMut::Method(decl) => decl.visit_mut_with(&mut rewriter),
  }
  rewriter.into_report()
}
