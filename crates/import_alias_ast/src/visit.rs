//! Mutable traversal over the syntax tree.
//!
//! Modelled after `swc_ecma_visit`: a [`VisitMut`] implementor overrides the `visit_mut_*`
//! hooks it cares about and calls `node.visit_mut_children_with(self)` to keep descending.
//! Children are always visited in source order.

use crate::Annotation;
use crate::Block;
use crate::CompilationUnit;
use crate::Expr;
use crate::FieldDecl;
use crate::LocalVarDecl;
use crate::Member;
use crate::MethodDecl;
use crate::Param;
use crate::Stmt;
use crate::TypeDecl;
use crate::TypeParam;
use crate::TypeRef;

pub trait VisitMut {
  fn visit_mut_compilation_unit(&mut self, node: &mut CompilationUnit) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_type_decl(&mut self, node: &mut TypeDecl) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_member(&mut self, node: &mut Member) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_field_decl(&mut self, node: &mut FieldDecl) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_method_decl(&mut self, node: &mut MethodDecl) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_param(&mut self, node: &mut Param) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_type_param(&mut self, node: &mut TypeParam) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_annotations(&mut self, node: &mut Vec<Annotation>) {
    for annotation in node.iter_mut() {
      self.visit_mut_annotation(annotation);
    }
  }

  fn visit_mut_annotation(&mut self, node: &mut Annotation) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_block(&mut self, node: &mut Block) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_stmt(&mut self, node: &mut Stmt) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_local_var_decl(&mut self, node: &mut LocalVarDecl) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_expr(&mut self, node: &mut Expr) {
    node.visit_mut_children_with(self)
  }

  fn visit_mut_type_ref(&mut self, node: &mut TypeRef) {
    node.visit_mut_children_with(self)
  }
}

pub trait VisitMutWith<V: ?Sized + VisitMut> {
  /// Calls the visitor hook for this node.
  fn visit_mut_with(&mut self, visitor: &mut V);

  /// Visits the children of this node without calling the hook for the node itself.
  fn visit_mut_children_with(&mut self, visitor: &mut V);
}

macro_rules! visit_mut_hook {
  ($node:ty, $hook:ident) => {
    impl<V: ?Sized + VisitMut> VisitMutWith<V> for $node {
      fn visit_mut_with(&mut self, visitor: &mut V) {
        visitor.$hook(self)
      }

      fn visit_mut_children_with(&mut self, visitor: &mut V) {
        visit_mut_children(self, visitor)
      }
    }
  };
}

visit_mut_hook!(CompilationUnit, visit_mut_compilation_unit);
visit_mut_hook!(TypeDecl, visit_mut_type_decl);
visit_mut_hook!(Member, visit_mut_member);
visit_mut_hook!(FieldDecl, visit_mut_field_decl);
visit_mut_hook!(MethodDecl, visit_mut_method_decl);
visit_mut_hook!(Param, visit_mut_param);
visit_mut_hook!(TypeParam, visit_mut_type_param);
visit_mut_hook!(Annotation, visit_mut_annotation);
visit_mut_hook!(Block, visit_mut_block);
visit_mut_hook!(Stmt, visit_mut_stmt);
visit_mut_hook!(LocalVarDecl, visit_mut_local_var_decl);
visit_mut_hook!(Expr, visit_mut_expr);
visit_mut_hook!(TypeRef, visit_mut_type_ref);

impl<V: ?Sized + VisitMut, T: VisitMutWith<V>> VisitMutWith<V> for Vec<T> {
  fn visit_mut_with(&mut self, visitor: &mut V) {
    for item in self.iter_mut() {
      item.visit_mut_with(visitor);
    }
  }

  fn visit_mut_children_with(&mut self, visitor: &mut V) {
    for item in self.iter_mut() {
      item.visit_mut_children_with(visitor);
    }
  }
}

impl<V: ?Sized + VisitMut, T: VisitMutWith<V>> VisitMutWith<V> for Option<T> {
  fn visit_mut_with(&mut self, visitor: &mut V) {
    if let Some(node) = self {
      node.visit_mut_with(visitor);
    }
  }

  fn visit_mut_children_with(&mut self, visitor: &mut V) {
    if let Some(node) = self {
      node.visit_mut_children_with(visitor);
    }
  }
}

impl<V: ?Sized + VisitMut, T: VisitMutWith<V>> VisitMutWith<V> for Box<T> {
  fn visit_mut_with(&mut self, visitor: &mut V) {
    (**self).visit_mut_with(visitor)
  }

  fn visit_mut_children_with(&mut self, visitor: &mut V) {
    (**self).visit_mut_children_with(visitor)
  }
}

/// Per-node child traversal. Kept separate from [`VisitMutWith`] so the macro above stays a
/// one-liner per node type.
trait Children<V: ?Sized + VisitMut> {
  fn children(&mut self, visitor: &mut V);
}

fn visit_mut_children<V: ?Sized + VisitMut, N: Children<V>>(node: &mut N, visitor: &mut V) {
  node.children(visitor)
}

impl<V: ?Sized + VisitMut> Children<V> for CompilationUnit {
  fn children(&mut self, visitor: &mut V) {
    self.types.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for TypeDecl {
  fn children(&mut self, visitor: &mut V) {
    visitor.visit_mut_annotations(&mut self.annotations);
    self.type_params.visit_mut_with(visitor);
    self.extends.visit_mut_with(visitor);
    self.implements.visit_mut_with(visitor);
    self.members.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for Member {
  fn children(&mut self, visitor: &mut V) {
    match self {
      Member::Field(field) => field.visit_mut_with(visitor),
      Member::Method(method) => method.visit_mut_with(visitor),
      Member::Type(ty) => ty.visit_mut_with(visitor),
    }
  }
}

impl<V: ?Sized + VisitMut> Children<V> for FieldDecl {
  fn children(&mut self, visitor: &mut V) {
    visitor.visit_mut_annotations(&mut self.annotations);
    self.ty.visit_mut_with(visitor);
    self.init.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for MethodDecl {
  fn children(&mut self, visitor: &mut V) {
    visitor.visit_mut_annotations(&mut self.annotations);
    self.type_params.visit_mut_with(visitor);
    self.return_type.visit_mut_with(visitor);
    self.params.visit_mut_with(visitor);
    self.throws.visit_mut_with(visitor);
    self.body.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for Param {
  fn children(&mut self, visitor: &mut V) {
    visitor.visit_mut_annotations(&mut self.annotations);
    self.ty.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for TypeParam {
  fn children(&mut self, visitor: &mut V) {
    self.bounds.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for Annotation {
  fn children(&mut self, visitor: &mut V) {
    for arg in self.args.iter_mut() {
      arg.value.visit_mut_with(visitor);
    }
  }
}

impl<V: ?Sized + VisitMut> Children<V> for Block {
  fn children(&mut self, visitor: &mut V) {
    self.stmts.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for Stmt {
  fn children(&mut self, visitor: &mut V) {
    match self {
      Stmt::LocalVar(decl) => decl.visit_mut_with(visitor),
      Stmt::Expr(stmt) => stmt.expr.visit_mut_with(visitor),
      Stmt::Return(stmt) => stmt.arg.visit_mut_with(visitor),
      Stmt::If(stmt) => {
        stmt.test.visit_mut_with(visitor);
        stmt.cons.visit_mut_with(visitor);
        stmt.alt.visit_mut_with(visitor);
      }
      Stmt::Block(block) => block.visit_mut_with(visitor),
      Stmt::LocalType(ty) => ty.visit_mut_with(visitor),
    }
  }
}

impl<V: ?Sized + VisitMut> Children<V> for LocalVarDecl {
  fn children(&mut self, visitor: &mut V) {
    visitor.visit_mut_annotations(&mut self.annotations);
    self.ty.visit_mut_with(visitor);
    self.init.visit_mut_with(visitor);
  }
}

impl<V: ?Sized + VisitMut> Children<V> for Expr {
  fn children(&mut self, visitor: &mut V) {
    match self {
      Expr::Name(..) | Expr::Lit(..) | Expr::Null(..) | Expr::This(..) => {}
      Expr::Call(call) => {
        call.receiver.visit_mut_with(visitor);
        call.args.visit_mut_with(visitor);
      }
      Expr::FieldAccess(access) => access.obj.visit_mut_with(visitor),
      Expr::New(new) => {
        new.ty.visit_mut_with(visitor);
        new.args.visit_mut_with(visitor);
      }
      Expr::Cast(cast) => {
        cast.ty.visit_mut_with(visitor);
        cast.expr.visit_mut_with(visitor);
      }
      Expr::InstanceOf(instance_of) => {
        instance_of.expr.visit_mut_with(visitor);
        instance_of.ty.visit_mut_with(visitor);
      }
      Expr::Binary(bin) => {
        bin.left.visit_mut_with(visitor);
        bin.right.visit_mut_with(visitor);
      }
      Expr::Unary(unary) => unary.arg.visit_mut_with(visitor),
      Expr::Assign(assign) => {
        assign.target.visit_mut_with(visitor);
        assign.value.visit_mut_with(visitor);
      }
      Expr::Paren(paren) => paren.expr.visit_mut_with(visitor),
    }
  }
}

impl<V: ?Sized + VisitMut> Children<V> for TypeRef {
  fn children(&mut self, visitor: &mut V) {
    match self {
      TypeRef::Single(..) | TypeRef::Array(..) | TypeRef::Qualified(..) => {}
      TypeRef::ParameterizedSingle(ty) => ty.type_args.visit_mut_with(visitor),
      TypeRef::ParameterizedQualified(ty) => {
        for args in ty.type_args.iter_mut().flatten() {
          args.visit_mut_with(visitor);
        }
      }
      TypeRef::Wildcard(ty) => {
        if let Some(bound) = &mut ty.bound {
          bound.ty.visit_mut_with(visitor);
        }
      }
    }
  }
}
