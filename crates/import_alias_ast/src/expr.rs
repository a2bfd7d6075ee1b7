use crate::Ident;
use crate::LocalVarDecl;
use crate::Span;
use crate::TypeDecl;
use crate::TypeRef;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
  pub span: Span,
  pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
  LocalVar(LocalVarDecl),
  Expr(ExprStmt),
  Return(ReturnStmt),
  If(IfStmt),
  Block(Block),
  /// A class declared inside a method body
  LocalType(Box<TypeDecl>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprStmt {
  pub span: Span,
  pub expr: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnStmt {
  pub span: Span,
  pub arg: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStmt {
  pub span: Span,
  pub test: Expr,
  pub cons: Box<Stmt>,
  pub alt: Option<Box<Stmt>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LitKind {
  Int,
  Str,
  Char,
  Bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lit {
  pub span: Span,
  pub kind: LitKind,
  /// Source text, quotes included
  pub raw: String,
}

impl Lit {
  /// The literal's value with surrounding quotes removed. Escapes are kept verbatim.
  pub fn unquoted(&self) -> &str {
    match self.kind {
      LitKind::Str | LitKind::Char if self.raw.len() >= 2 => &self.raw[1..self.raw.len() - 1],
      _ => &self.raw,
    }
  }
}

/// `a.b(c)`, `b(c)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallExpr {
  pub span: Span,
  pub receiver: Option<Box<Expr>>,
  pub name: Ident,
  pub args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAccessExpr {
  pub span: Span,
  pub obj: Box<Expr>,
  pub prop: Ident,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpr {
  pub span: Span,
  pub ty: TypeRef,
  pub args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastExpr {
  pub span: Span,
  pub ty: TypeRef,
  pub expr: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceOfExpr {
  pub span: Span,
  pub expr: Box<Expr>,
  pub ty: TypeRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
  Or,
  And,
  EqEq,
  NotEq,
  Lt,
  Gt,
  LtEq,
  GtEq,
  Add,
  Sub,
  Mul,
  Div,
  Mod,
}

impl BinaryOp {
  pub fn as_str(&self) -> &'static str {
    match self {
      BinaryOp::Or => "||",
      BinaryOp::And => "&&",
      BinaryOp::EqEq => "==",
      BinaryOp::NotEq => "!=",
      BinaryOp::Lt => "<",
      BinaryOp::Gt => ">",
      BinaryOp::LtEq => "<=",
      BinaryOp::GtEq => ">=",
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Mod => "%",
    }
  }

  /// Binding power, higher binds tighter.
  pub fn precedence(&self) -> u8 {
    match self {
      BinaryOp::Or => 1,
      BinaryOp::And => 2,
      BinaryOp::EqEq | BinaryOp::NotEq => 3,
      BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => 4,
      BinaryOp::Add | BinaryOp::Sub => 5,
      BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 6,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinExpr {
  pub span: Span,
  pub op: BinaryOp,
  pub left: Box<Expr>,
  pub right: Box<Expr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
  Not,
  Minus,
}

impl UnaryOp {
  pub fn as_str(&self) -> &'static str {
    match self {
      UnaryOp::Not => "!",
      UnaryOp::Minus => "-",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryExpr {
  pub span: Span,
  pub op: UnaryOp,
  pub arg: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignExpr {
  pub span: Span,
  pub target: Box<Expr>,
  pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParenExpr {
  pub span: Span,
  pub expr: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
  Name(Ident),
  Lit(Lit),
  Null(Span),
  This(Span),
  Call(CallExpr),
  FieldAccess(FieldAccessExpr),
  New(NewExpr),
  Cast(CastExpr),
  InstanceOf(InstanceOfExpr),
  Binary(BinExpr),
  Unary(UnaryExpr),
  Assign(AssignExpr),
  Paren(ParenExpr),
}

impl Expr {
  pub fn span(&self) -> Span {
    match self {
      Expr::Name(ident) => ident.span,
      Expr::Lit(lit) => lit.span,
      Expr::Null(span) | Expr::This(span) => *span,
      Expr::Call(e) => e.span,
      Expr::FieldAccess(e) => e.span,
      Expr::New(e) => e.span,
      Expr::Cast(e) => e.span,
      Expr::InstanceOf(e) => e.span,
      Expr::Binary(e) => e.span,
      Expr::Unary(e) => e.span,
      Expr::Assign(e) => e.span,
      Expr::Paren(e) => e.span,
    }
  }

  /// Segments of a plain dotted name such as `java.util.List`, or `None` for anything else.
  pub fn as_dotted_name(&self) -> Option<Vec<&Ident>> {
    match self {
      Expr::Name(ident) => Some(vec![ident]),
      Expr::FieldAccess(access) => {
        let mut segments = access.obj.as_dotted_name()?;
        segments.push(&access.prop);
        Some(segments)
      }
      _ => None,
    }
  }

  /// Raw text of this expression as it appears as an annotation value.
  ///
  /// Dotted names are joined with `.`, string literals lose their quotes and everything else
  /// is printed back to source.
  pub fn raw_text(&self) -> String {
    if let Some(segments) = self.as_dotted_name() {
      return segments
        .iter()
        .map(|ident| ident.sym.as_str())
        .collect::<Vec<_>>()
        .join(".");
    }

    match self {
      Expr::Lit(lit) if lit.kind == LitKind::Str => lit.unquoted().to_string(),
      _ => self.to_string(),
    }
  }
}
