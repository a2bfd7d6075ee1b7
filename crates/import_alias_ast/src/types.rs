use crate::Ident;
use crate::NodeId;
use crate::Span;

/// Structural shape of a [`TypeRef`].
///
/// The shape is fixed once the node is created. Only the qualified shapes own a segment vector
/// that can grow in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeRefShape {
  Single,
  Array,
  ParameterizedSingle,
  Qualified,
  ParameterizedQualified,
  Wildcard,
}

impl TypeRefShape {
  pub fn is_multi_segment(&self) -> bool {
    matches!(
      self,
      TypeRefShape::Qualified | TypeRefShape::ParameterizedQualified
    )
  }
}

/// `String`, `int`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleTypeRef {
  pub id: NodeId,
  pub span: Span,
  pub token: Ident,
}

/// `String[]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayTypeRef {
  pub id: NodeId,
  pub span: Span,
  pub token: Ident,
  pub dims: u32,
}

/// `List<String>`, `Map<K, V>[]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterizedSingleTypeRef {
  pub id: NodeId,
  pub span: Span,
  pub token: Ident,
  /// Empty for the diamond form `<>`
  pub type_args: Vec<TypeRef>,
  pub dims: u32,
}

/// `java.util.List`, `java.util.List[]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualifiedTypeRef {
  pub id: NodeId,
  pub span: Span,
  pub tokens: Vec<Ident>,
  pub dims: u32,
}

/// `java.util.Map<K, V>.Entry`
///
/// `type_args` always has the same length as `tokens`; entry `i` holds the arguments written
/// after segment `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterizedQualifiedTypeRef {
  pub id: NodeId,
  pub span: Span,
  pub tokens: Vec<Ident>,
  pub type_args: Vec<Option<Vec<TypeRef>>>,
  pub dims: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundKind {
  Extends,
  Super,
}

impl BoundKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      BoundKind::Extends => "extends",
      BoundKind::Super => "super",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WildcardBound {
  pub kind: BoundKind,
  pub ty: Box<TypeRef>,
}

/// `?`, `? extends Number`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WildcardTypeRef {
  pub id: NodeId,
  pub span: Span,
  pub bound: Option<WildcardBound>,
}

/// A type usage anywhere in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeRef {
  Single(SingleTypeRef),
  Array(ArrayTypeRef),
  ParameterizedSingle(ParameterizedSingleTypeRef),
  Qualified(QualifiedTypeRef),
  ParameterizedQualified(ParameterizedQualifiedTypeRef),
  Wildcard(WildcardTypeRef),
}

impl TypeRef {
  pub fn shape(&self) -> TypeRefShape {
    match self {
      TypeRef::Single(..) => TypeRefShape::Single,
      TypeRef::Array(..) => TypeRefShape::Array,
      TypeRef::ParameterizedSingle(..) => TypeRefShape::ParameterizedSingle,
      TypeRef::Qualified(..) => TypeRefShape::Qualified,
      TypeRef::ParameterizedQualified(..) => TypeRefShape::ParameterizedQualified,
      TypeRef::Wildcard(..) => TypeRefShape::Wildcard,
    }
  }

  pub fn id(&self) -> NodeId {
    match self {
      TypeRef::Single(t) => t.id,
      TypeRef::Array(t) => t.id,
      TypeRef::ParameterizedSingle(t) => t.id,
      TypeRef::Qualified(t) => t.id,
      TypeRef::ParameterizedQualified(t) => t.id,
      TypeRef::Wildcard(t) => t.id,
    }
  }

  pub fn span(&self) -> Span {
    match self {
      TypeRef::Single(t) => t.span,
      TypeRef::Array(t) => t.span,
      TypeRef::ParameterizedSingle(t) => t.span,
      TypeRef::Qualified(t) => t.span,
      TypeRef::ParameterizedQualified(t) => t.span,
      TypeRef::Wildcard(t) => t.span,
    }
  }

  /// The first identifier token, the only one ever matched against an alias table.
  ///
  /// Wildcards have none, and neither do qualified references with an empty segment vector.
  pub fn leading_segment(&self) -> Option<&Ident> {
    match self {
      TypeRef::Single(t) => Some(&t.token),
      TypeRef::Array(t) => Some(&t.token),
      TypeRef::ParameterizedSingle(t) => Some(&t.token),
      TypeRef::Qualified(t) => t.tokens.first(),
      TypeRef::ParameterizedQualified(t) => t.tokens.first(),
      TypeRef::Wildcard(..) => None,
    }
  }

  pub fn leading_segment_mut(&mut self) -> Option<&mut Ident> {
    match self {
      TypeRef::Single(t) => Some(&mut t.token),
      TypeRef::Array(t) => Some(&mut t.token),
      TypeRef::ParameterizedSingle(t) => Some(&mut t.token),
      TypeRef::Qualified(t) => t.tokens.first_mut(),
      TypeRef::ParameterizedQualified(t) => t.tokens.first_mut(),
      TypeRef::Wildcard(..) => None,
    }
  }

  pub fn segment_count(&self) -> usize {
    match self {
      TypeRef::Single(..) | TypeRef::Array(..) | TypeRef::ParameterizedSingle(..) => 1,
      TypeRef::Qualified(t) => t.tokens.len(),
      TypeRef::ParameterizedQualified(t) => t.tokens.len(),
      TypeRef::Wildcard(..) => 0,
    }
  }

  /// Segment text joined with `.`, ignoring type arguments and dimensions.
  pub fn dotted_name(&self) -> String {
    match self {
      TypeRef::Single(t) => t.token.sym.clone(),
      TypeRef::Array(t) => t.token.sym.clone(),
      TypeRef::ParameterizedSingle(t) => t.token.sym.clone(),
      TypeRef::Qualified(t) => join_segments(&t.tokens),
      TypeRef::ParameterizedQualified(t) => join_segments(&t.tokens),
      TypeRef::Wildcard(..) => String::from("?"),
    }
  }
}

fn join_segments(tokens: &[Ident]) -> String {
  tokens
    .iter()
    .map(|token| token.sym.as_str())
    .collect::<Vec<_>>()
    .join(".")
}

/// `T extends Comparable<T>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParam {
  pub id: NodeId,
  pub span: Span,
  pub name: Ident,
  pub bounds: Vec<TypeRef>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ident(sym: &str) -> Ident {
    Ident::new(sym, Span::DUMMY)
  }

  #[test]
  fn leading_segment_of_qualified_reference_is_first_token() {
    let ty = TypeRef::Qualified(QualifiedTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      tokens: vec![ident("swt"), ident("Button")],
      dims: 0,
    });

    assert_eq!(ty.leading_segment().map(|i| i.sym.as_str()), Some("swt"));
    assert_eq!(ty.segment_count(), 2);
    assert_eq!(ty.dotted_name(), "swt.Button");
    assert!(ty.shape().is_multi_segment());
  }

  #[test]
  fn wildcard_has_no_leading_segment() {
    let ty = TypeRef::Wildcard(WildcardTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      bound: None,
    });

    assert_eq!(ty.leading_segment(), None);
    assert_eq!(ty.segment_count(), 0);
  }
}
