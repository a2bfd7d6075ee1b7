use crate::Expr;
use crate::Ident;
use crate::NodeId;
use crate::Span;

/// How an annotation was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationStyle {
  /// `@Name`
  Marker,
  /// `@Name(value)`
  Single,
  /// `@Name(key = value, ...)`
  Normal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationArg {
  pub name: Ident,
  pub value: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
  pub id: NodeId,
  pub span: Span,
  /// Type name of the annotation, `Import` or `lombok.Import`
  pub name: Vec<Ident>,
  pub style: AnnotationStyle,
  /// For [`AnnotationStyle::Single`] the one argument is named `value`.
  pub args: Vec<AnnotationArg>,
}

impl Annotation {
  /// Zero-argument annotation with the same type name, source start and a new identity.
  pub fn to_marker(&self, id: NodeId) -> Annotation {
    Annotation {
      id,
      span: Span::new(self.span.lo, self.span.lo),
      name: self.name.clone(),
      style: AnnotationStyle::Marker,
      args: Vec::new(),
    }
  }

  pub fn simple_name(&self) -> &str {
    self.name.last().map(|ident| ident.sym.as_str()).unwrap_or("")
  }

  pub fn qualified_name(&self) -> String {
    self
      .name
      .iter()
      .map(|ident| ident.sym.as_str())
      .collect::<Vec<_>>()
      .join(".")
  }

  pub fn is_marker(&self) -> bool {
    self.style == AnnotationStyle::Marker
  }

  /// Names of the annotation members in source order.
  pub fn member_names(&self) -> impl Iterator<Item = &str> {
    self.args.iter().map(|arg| arg.name.sym.as_str())
  }

  /// Raw expression text of the member called `name`. A repeated member yields its last value.
  pub fn raw_expression(&self, name: &str) -> Option<String> {
    self
      .args
      .iter()
      .rfind(|arg| arg.name.sym == name)
      .map(|arg| arg.value.raw_text())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::FieldAccessExpr;

  fn import_annotation() -> Annotation {
    Annotation {
      id: NodeId(3),
      span: Span::new(10, 40),
      name: vec![Ident::new("lombok", Span::DUMMY), Ident::new("Import", Span::DUMMY)],
      style: AnnotationStyle::Normal,
      args: vec![AnnotationArg {
        name: Ident::new("UList", Span::DUMMY),
        value: Expr::FieldAccess(FieldAccessExpr {
          span: Span::DUMMY,
          obj: Box::new(Expr::Name(Ident::new("util", Span::DUMMY))),
          prop: Ident::new("List", Span::DUMMY),
        }),
      }],
    }
  }

  #[test]
  fn marker_keeps_name_and_start() {
    let annotation = import_annotation();
    let marker = annotation.to_marker(NodeId(9));

    assert_eq!(marker.id, NodeId(9));
    assert_eq!(marker.span.lo, 10);
    assert_eq!(marker.qualified_name(), "lombok.Import");
    assert!(marker.is_marker());
    assert!(marker.args.is_empty());
  }

  #[test]
  fn raw_expression_by_member_name() {
    let annotation = import_annotation();

    assert_eq!(annotation.simple_name(), "Import");
    assert_eq!(annotation.member_names().collect::<Vec<_>>(), vec!["UList"]);
    assert_eq!(annotation.raw_expression("UList").as_deref(), Some("util.List"));
    assert_eq!(annotation.raw_expression("Missing"), None);
  }
}
