use std::rc::Rc;

use crate::Annotation;
use crate::Block;
use crate::Expr;
use crate::NodeId;
use crate::Span;
use crate::TypeParam;
use crate::TypeRef;
use crate::UnitHandle;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
  pub sym: String,
  pub span: Span,
}

impl Ident {
  pub fn new(sym: impl Into<String>, span: Span) -> Self {
    Ident {
      sym: sym.into(),
      span,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
  Public,
  Protected,
  Private,
  Static,
  Final,
  Abstract,
  Synchronized,
  Native,
  Transient,
  Volatile,
  Default,
}

impl Modifier {
  pub fn from_keyword(keyword: &str) -> Option<Modifier> {
    let modifier = match keyword {
      "public" => Modifier::Public,
      "protected" => Modifier::Protected,
      "private" => Modifier::Private,
      "static" => Modifier::Static,
      "final" => Modifier::Final,
      "abstract" => Modifier::Abstract,
      "synchronized" => Modifier::Synchronized,
      "native" => Modifier::Native,
      "transient" => Modifier::Transient,
      "volatile" => Modifier::Volatile,
      "default" => Modifier::Default,
      _ => return None,
    };
    Some(modifier)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Modifier::Public => "public",
      Modifier::Protected => "protected",
      Modifier::Private => "private",
      Modifier::Static => "static",
      Modifier::Final => "final",
      Modifier::Abstract => "abstract",
      Modifier::Synchronized => "synchronized",
      Modifier::Native => "native",
      Modifier::Transient => "transient",
      Modifier::Volatile => "volatile",
      Modifier::Default => "default",
    }
  }
}

/// One parsed source file.
///
/// The unit owns its [`UnitHandle`]; once the unit is dropped, weak references to the handle
/// can no longer be upgraded.
#[derive(Debug)]
pub struct CompilationUnit {
  pub handle: Rc<UnitHandle>,
  pub package: Option<PackageDecl>,
  pub imports: Vec<ImportDecl>,
  pub types: Vec<TypeDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageDecl {
  pub span: Span,
  pub name: Vec<Ident>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDecl {
  pub span: Span,
  pub is_static: bool,
  pub name: Vec<Ident>,
  /// `import java.util.*;`
  pub on_demand: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
  Class,
  Interface,
}

impl TypeKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TypeKind::Class => "class",
      TypeKind::Interface => "interface",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
  pub id: NodeId,
  pub span: Span,
  pub annotations: Vec<Annotation>,
  pub modifiers: Vec<Modifier>,
  pub kind: TypeKind,
  pub name: Ident,
  pub type_params: Vec<TypeParam>,
  pub extends: Vec<TypeRef>,
  pub implements: Vec<TypeRef>,
  pub members: Vec<Member>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
  Field(FieldDecl),
  Method(MethodDecl),
  Type(TypeDecl),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
  pub id: NodeId,
  pub span: Span,
  pub annotations: Vec<Annotation>,
  pub modifiers: Vec<Modifier>,
  pub ty: TypeRef,
  pub name: Ident,
  pub init: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDecl {
  pub id: NodeId,
  pub span: Span,
  pub annotations: Vec<Annotation>,
  pub modifiers: Vec<Modifier>,
  pub type_params: Vec<TypeParam>,
  /// `None` for constructors
  pub return_type: Option<TypeRef>,
  pub name: Ident,
  pub params: Vec<Param>,
  pub throws: Vec<TypeRef>,
  /// `None` for abstract and interface methods
  pub body: Option<Block>,
}

impl MethodDecl {
  pub fn is_constructor(&self) -> bool {
    self.return_type.is_none()
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
  pub id: NodeId,
  pub span: Span,
  pub annotations: Vec<Annotation>,
  pub modifiers: Vec<Modifier>,
  pub ty: TypeRef,
  pub varargs: bool,
  pub name: Ident,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalVarDecl {
  pub id: NodeId,
  pub span: Span,
  pub annotations: Vec<Annotation>,
  pub modifiers: Vec<Modifier>,
  pub ty: TypeRef,
  pub name: Ident,
  pub init: Option<Expr>,
}

/// What kind of declaration an annotation is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
  Type,
  Method,
  Field,
  Parameter,
  LocalVariable,
}

/// Mutable access to any declaration that can carry annotations.
pub enum AnnotatedMut<'a> {
  Type(&'a mut TypeDecl),
  Method(&'a mut MethodDecl),
  Field(&'a mut FieldDecl),
  Parameter(&'a mut Param),
  LocalVariable(&'a mut LocalVarDecl),
}

impl AnnotatedMut<'_> {
  pub fn kind(&self) -> DeclKind {
    match self {
      AnnotatedMut::Type(..) => DeclKind::Type,
      AnnotatedMut::Method(..) => DeclKind::Method,
      AnnotatedMut::Field(..) => DeclKind::Field,
      AnnotatedMut::Parameter(..) => DeclKind::Parameter,
      AnnotatedMut::LocalVariable(..) => DeclKind::LocalVariable,
    }
  }

  pub fn annotations(&self) -> &[Annotation] {
    match self {
      AnnotatedMut::Type(decl) => &decl.annotations,
      AnnotatedMut::Method(decl) => &decl.annotations,
      AnnotatedMut::Field(decl) => &decl.annotations,
      AnnotatedMut::Parameter(decl) => &decl.annotations,
      AnnotatedMut::LocalVariable(decl) => &decl.annotations,
    }
  }

  pub fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
    match self {
      AnnotatedMut::Type(decl) => &mut decl.annotations,
      AnnotatedMut::Method(decl) => &mut decl.annotations,
      AnnotatedMut::Field(decl) => &mut decl.annotations,
      AnnotatedMut::Parameter(decl) => &mut decl.annotations,
      AnnotatedMut::LocalVariable(decl) => &mut decl.annotations,
    }
  }

  pub fn name(&self) -> &Ident {
    match self {
      AnnotatedMut::Type(decl) => &decl.name,
      AnnotatedMut::Method(decl) => &decl.name,
      AnnotatedMut::Field(decl) => &decl.name,
      AnnotatedMut::Parameter(decl) => &decl.name,
      AnnotatedMut::LocalVariable(decl) => &decl.name,
    }
  }
}
