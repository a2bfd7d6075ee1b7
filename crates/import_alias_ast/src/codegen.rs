//! Prints a syntax tree back to source.
//!
//! The output layout is canonical: four spaces per indentation level, one member or statement
//! per line, annotations on types, methods and fields on their own line and annotations on
//! parameters and local variables inline. Parsing canonical text and printing it again yields
//! the same text.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::*;

const INDENT: &str = "    ";

pub fn print_unit(unit: &CompilationUnit) -> String {
  let mut printer = Printer::default();
  printer.compilation_unit(unit);
  printer.out
}

pub fn print_type_decl(decl: &TypeDecl) -> String {
  let mut printer = Printer::default();
  printer.type_decl(decl);
  printer.out
}

#[derive(Default)]
struct Printer {
  out: String,
  indent: usize,
}

impl Printer {
  fn write(&mut self, text: &str) {
    self.out.push_str(text);
  }

  fn write_indent(&mut self) {
    for _ in 0..self.indent {
      self.out.push_str(INDENT);
    }
  }

  fn newline(&mut self) {
    self.out.push('\n');
  }

  fn compilation_unit(&mut self, unit: &CompilationUnit) {
    if let Some(package) = &unit.package {
      self.write("package ");
      self.dotted(&package.name);
      self.write(";");
      self.newline();
      if !unit.imports.is_empty() || !unit.types.is_empty() {
        self.newline();
      }
    }

    for import in &unit.imports {
      self.write("import ");
      if import.is_static {
        self.write("static ");
      }
      self.dotted(&import.name);
      if import.on_demand {
        self.write(".*");
      }
      self.write(";");
      self.newline();
    }
    if !unit.imports.is_empty() && !unit.types.is_empty() {
      self.newline();
    }

    for (index, decl) in unit.types.iter().enumerate() {
      if index > 0 {
        self.newline();
      }
      self.type_decl(decl);
    }
  }

  fn dotted(&mut self, segments: &[Ident]) {
    for (index, segment) in segments.iter().enumerate() {
      if index > 0 {
        self.write(".");
      }
      self.write(&segment.sym);
    }
  }

  fn modifiers(&mut self, modifiers: &[Modifier]) {
    for modifier in modifiers {
      self.write(modifier.as_str());
      self.write(" ");
    }
  }

  fn annotation_lines(&mut self, annotations: &[Annotation]) {
    for annotation in annotations {
      self.write_indent();
      self.annotation(annotation);
      self.newline();
    }
  }

  fn annotations_inline(&mut self, annotations: &[Annotation]) {
    for annotation in annotations {
      self.annotation(annotation);
      self.write(" ");
    }
  }

  fn annotation(&mut self, annotation: &Annotation) {
    self.write("@");
    self.dotted(&annotation.name);
    match annotation.style {
      AnnotationStyle::Marker => {}
      AnnotationStyle::Single => {
        self.write("(");
        if let Some(arg) = annotation.args.first() {
          self.expr(&arg.value);
        }
        self.write(")");
      }
      AnnotationStyle::Normal => {
        self.write("(");
        for (index, arg) in annotation.args.iter().enumerate() {
          if index > 0 {
            self.write(", ");
          }
          self.write(&arg.name.sym);
          self.write(" = ");
          self.expr(&arg.value);
        }
        self.write(")");
      }
    }
  }

  fn type_params(&mut self, params: &[TypeParam]) {
    if params.is_empty() {
      return;
    }
    self.write("<");
    for (index, param) in params.iter().enumerate() {
      if index > 0 {
        self.write(", ");
      }
      self.write(&param.name.sym);
      for (bound_index, bound) in param.bounds.iter().enumerate() {
        self.write(if bound_index == 0 { " extends " } else { " & " });
        self.type_ref(bound);
      }
    }
    self.write(">");
  }

  fn type_list(&mut self, types: &[TypeRef]) {
    for (index, ty) in types.iter().enumerate() {
      if index > 0 {
        self.write(", ");
      }
      self.type_ref(ty);
    }
  }

  fn type_decl(&mut self, decl: &TypeDecl) {
    self.annotation_lines(&decl.annotations);
    self.write_indent();
    self.modifiers(&decl.modifiers);
    self.write(decl.kind.as_str());
    self.write(" ");
    self.write(&decl.name.sym);
    self.type_params(&decl.type_params);
    if !decl.extends.is_empty() {
      self.write(" extends ");
      self.type_list(&decl.extends);
    }
    if !decl.implements.is_empty() {
      self.write(" implements ");
      self.type_list(&decl.implements);
    }
    self.write(" {");
    self.newline();

    self.indent += 1;
    for member in &decl.members {
      match member {
        Member::Field(field) => self.field_decl(field),
        Member::Method(method) => self.method_decl(method),
        Member::Type(ty) => self.type_decl(ty),
      }
    }
    self.indent -= 1;

    self.write_indent();
    self.write("}");
    self.newline();
  }

  fn field_decl(&mut self, field: &FieldDecl) {
    self.annotation_lines(&field.annotations);
    self.write_indent();
    self.modifiers(&field.modifiers);
    self.type_ref(&field.ty);
    self.write(" ");
    self.write(&field.name.sym);
    if let Some(init) = &field.init {
      self.write(" = ");
      self.expr(init);
    }
    self.write(";");
    self.newline();
  }

  fn method_decl(&mut self, method: &MethodDecl) {
    self.annotation_lines(&method.annotations);
    self.write_indent();
    self.modifiers(&method.modifiers);
    if !method.type_params.is_empty() {
      self.type_params(&method.type_params);
      self.write(" ");
    }
    if let Some(return_type) = &method.return_type {
      self.type_ref(return_type);
      self.write(" ");
    }
    self.write(&method.name.sym);
    self.write("(");
    for (index, param) in method.params.iter().enumerate() {
      if index > 0 {
        self.write(", ");
      }
      self.param(param);
    }
    self.write(")");
    if !method.throws.is_empty() {
      self.write(" throws ");
      self.type_list(&method.throws);
    }

    match &method.body {
      Some(body) => {
        self.write(" ");
        self.block(body);
      }
      None => self.write(";"),
    }
    self.newline();
  }

  fn param(&mut self, param: &Param) {
    self.annotations_inline(&param.annotations);
    self.modifiers(&param.modifiers);
    self.type_ref(&param.ty);
    if param.varargs {
      self.write("...");
    }
    self.write(" ");
    self.write(&param.name.sym);
  }

  /// Writes `{`, the statements and the closing `}` without a trailing newline.
  fn block(&mut self, block: &Block) {
    self.write("{");
    self.newline();
    self.indent += 1;
    for stmt in &block.stmts {
      self.stmt(stmt);
    }
    self.indent -= 1;
    self.write_indent();
    self.write("}");
  }

  fn stmt(&mut self, stmt: &Stmt) {
    if let Stmt::LocalType(decl) = stmt {
      self.type_decl(decl);
      return;
    }

    self.write_indent();
    self.stmt_inline(stmt);
    self.newline();
  }

  fn stmt_inline(&mut self, stmt: &Stmt) {
    match stmt {
      Stmt::LocalVar(decl) => {
        self.annotations_inline(&decl.annotations);
        self.modifiers(&decl.modifiers);
        self.type_ref(&decl.ty);
        self.write(" ");
        self.write(&decl.name.sym);
        if let Some(init) = &decl.init {
          self.write(" = ");
          self.expr(init);
        }
        self.write(";");
      }
      Stmt::Expr(stmt) => {
        self.expr(&stmt.expr);
        self.write(";");
      }
      Stmt::Return(stmt) => {
        self.write("return");
        if let Some(arg) = &stmt.arg {
          self.write(" ");
          self.expr(arg);
        }
        self.write(";");
      }
      Stmt::If(stmt) => {
        self.write("if (");
        self.expr(&stmt.test);
        self.write(") ");
        self.stmt_inline(&stmt.cons);
        if let Some(alt) = &stmt.alt {
          self.write(" else ");
          self.stmt_inline(alt);
        }
      }
      Stmt::Block(block) => self.block(block),
      Stmt::LocalType(decl) => {
        let mut nested = Printer {
          out: String::new(),
          indent: self.indent,
        };
        nested.type_decl(decl);
        self.write(nested.out.trim());
      }
    }
  }

  fn args(&mut self, args: &[Expr]) {
    self.write("(");
    for (index, arg) in args.iter().enumerate() {
      if index > 0 {
        self.write(", ");
      }
      self.expr(arg);
    }
    self.write(")");
  }

  fn expr(&mut self, expr: &Expr) {
    match expr {
      Expr::Name(ident) => self.write(&ident.sym),
      Expr::Lit(lit) => self.write(&lit.raw),
      Expr::Null(..) => self.write("null"),
      Expr::This(..) => self.write("this"),
      Expr::Call(call) => {
        if let Some(receiver) = &call.receiver {
          self.expr(receiver);
          self.write(".");
        }
        self.write(&call.name.sym);
        self.args(&call.args);
      }
      Expr::FieldAccess(access) => {
        self.expr(&access.obj);
        self.write(".");
        self.write(&access.prop.sym);
      }
      Expr::New(new) => {
        self.write("new ");
        self.type_ref(&new.ty);
        self.args(&new.args);
      }
      Expr::Cast(cast) => {
        self.write("(");
        self.type_ref(&cast.ty);
        self.write(") ");
        self.expr(&cast.expr);
      }
      Expr::InstanceOf(instance_of) => {
        self.expr(&instance_of.expr);
        self.write(" instanceof ");
        self.type_ref(&instance_of.ty);
      }
      Expr::Binary(bin) => {
        self.expr(&bin.left);
        self.write(" ");
        self.write(bin.op.as_str());
        self.write(" ");
        self.expr(&bin.right);
      }
      Expr::Unary(unary) => {
        self.write(unary.op.as_str());
        self.expr(&unary.arg);
      }
      Expr::Assign(assign) => {
        self.expr(&assign.target);
        self.write(" = ");
        self.expr(&assign.value);
      }
      Expr::Paren(paren) => {
        self.write("(");
        self.expr(&paren.expr);
        self.write(")");
      }
    }
  }

  fn type_args(&mut self, args: &[TypeRef]) {
    self.write("<");
    self.type_list(args);
    self.write(">");
  }

  fn dims(&mut self, dims: u32) {
    for _ in 0..dims {
      self.write("[]");
    }
  }

  fn type_ref(&mut self, ty: &TypeRef) {
    match ty {
      TypeRef::Single(ty) => self.write(&ty.token.sym),
      TypeRef::Array(ty) => {
        self.write(&ty.token.sym);
        self.dims(ty.dims);
      }
      TypeRef::ParameterizedSingle(ty) => {
        self.write(&ty.token.sym);
        self.type_args(&ty.type_args);
        self.dims(ty.dims);
      }
      TypeRef::Qualified(ty) => {
        self.dotted(&ty.tokens);
        self.dims(ty.dims);
      }
      TypeRef::ParameterizedQualified(ty) => {
        for (index, token) in ty.tokens.iter().enumerate() {
          if index > 0 {
            self.write(".");
          }
          self.write(&token.sym);
          if let Some(Some(args)) = ty.type_args.get(index) {
            self.type_args(args);
          }
        }
        self.dims(ty.dims);
      }
      TypeRef::Wildcard(ty) => {
        self.write("?");
        if let Some(bound) = &ty.bound {
          self.write(" ");
          self.write(bound.kind.as_str());
          self.write(" ");
          self.type_ref(&bound.ty);
        }
      }
    }
  }
}

impl Display for TypeRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut printer = Printer::default();
    printer.type_ref(self);
    f.write_str(&printer.out)
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut printer = Printer::default();
    printer.expr(self);
    f.write_str(&printer.out)
  }
}

impl Display for Annotation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut printer = Printer::default();
    printer.annotation(self);
    f.write_str(&printer.out)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn ident(sym: &str) -> Ident {
    Ident::new(sym, Span::DUMMY)
  }

  fn single(sym: &str) -> TypeRef {
    TypeRef::Single(SingleTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      token: ident(sym),
    })
  }

  #[test]
  fn prints_every_type_ref_shape() {
    let array = TypeRef::Array(ArrayTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      token: ident("String"),
      dims: 2,
    });
    let parameterized = TypeRef::ParameterizedSingle(ParameterizedSingleTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      token: ident("Map"),
      type_args: vec![single("K"), single("V")],
      dims: 0,
    });
    let qualified = TypeRef::Qualified(QualifiedTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      tokens: vec![ident("java"), ident("util"), ident("List")],
      dims: 1,
    });
    let parameterized_qualified = TypeRef::ParameterizedQualified(ParameterizedQualifiedTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      tokens: vec![ident("Outer"), ident("Inner")],
      type_args: vec![Some(vec![single("T")]), None],
      dims: 0,
    });
    let wildcard = TypeRef::Wildcard(WildcardTypeRef {
      id: NodeId(0),
      span: Span::DUMMY,
      bound: Some(WildcardBound {
        kind: BoundKind::Extends,
        ty: Box::new(single("Number")),
      }),
    });

    assert_eq!(array.to_string(), "String[][]");
    assert_eq!(parameterized.to_string(), "Map<K, V>");
    assert_eq!(qualified.to_string(), "java.util.List[]");
    assert_eq!(parameterized_qualified.to_string(), "Outer<T>.Inner");
    assert_eq!(wildcard.to_string(), "? extends Number");
  }

  #[test]
  fn prints_type_decl_with_members() {
    let decl = TypeDecl {
      id: NodeId(0),
      span: Span::DUMMY,
      annotations: vec![Annotation {
        id: NodeId(1),
        span: Span::DUMMY,
        name: vec![ident("Import")],
        style: AnnotationStyle::Marker,
        args: vec![],
      }],
      modifiers: vec![Modifier::Public],
      kind: TypeKind::Class,
      name: ident("Test"),
      type_params: vec![],
      extends: vec![],
      implements: vec![],
      members: vec![
        Member::Field(FieldDecl {
          id: NodeId(2),
          span: Span::DUMMY,
          annotations: vec![],
          modifiers: vec![Modifier::Private],
          ty: single("Button"),
          name: ident("button"),
          init: Some(Expr::Null(Span::DUMMY)),
        }),
        Member::Method(MethodDecl {
          id: NodeId(3),
          span: Span::DUMMY,
          annotations: vec![],
          modifiers: vec![],
          type_params: vec![],
          return_type: Some(single("void")),
          name: ident("run"),
          params: vec![],
          throws: vec![],
          body: Some(Block {
            span: Span::DUMMY,
            stmts: vec![Stmt::Return(ReturnStmt {
              span: Span::DUMMY,
              arg: None,
            })],
          }),
        }),
      ],
    };

    assert_eq!(
      print_type_decl(&decl),
      "@Import\npublic class Test {\n    private Button button = null;\n    void run() {\n        return;\n    }\n}\n"
    );
  }
}
