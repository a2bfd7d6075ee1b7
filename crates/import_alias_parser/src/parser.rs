use std::rc::Rc;

use import_alias_ast::*;

use crate::lexer::tokenize;
use crate::lexer::Token;
use crate::lexer::TokenKind;
use crate::ParseError;

type PResult<T> = Result<T, ParseError>;

/// Parse a whole source file.
pub fn parse_compilation_unit(source: &str) -> PResult<CompilationUnit> {
  let mut parser = Parser::new(source, UnitHandle::new())?;
  let unit = parser.compilation_unit()?;
  tracing::trace!(unit = unit.handle.id().as_u32(), types = unit.types.len(), "Parsed unit");
  Ok(unit)
}

/// Parse a single type reference such as `Map<String, swt.Button>[]`.
///
/// Node ids are allocated from `handle`.
pub fn parse_type_ref(source: &str, handle: Rc<UnitHandle>) -> PResult<TypeRef> {
  let mut parser = Parser::new(source, handle)?;
  let ty = parser.type_ref()?;
  parser.expect_eof()?;
  Ok(ty)
}

pub(crate) struct Parser {
  tokens: Vec<Token>,
  pos: usize,
  handle: Rc<UnitHandle>,
}

/// Words that cannot start an operand after a parenthesised type.
const NON_OPERAND_KEYWORDS: &[&str] = &["instanceof", "else", "class", "interface"];

impl Parser {
  pub(crate) fn new(source: &str, handle: Rc<UnitHandle>) -> PResult<Self> {
    Ok(Parser {
      tokens: tokenize(source)?,
      pos: 0,
      handle,
    })
  }

  fn fresh_id(&self) -> NodeId {
    self.handle.fresh_node_id()
  }

  fn peek(&self) -> &Token {
    self.peek_nth(0)
  }

  fn peek_nth(&self, n: usize) -> &Token {
    let index = (self.pos + n).min(self.tokens.len() - 1);
    &self.tokens[index]
  }

  fn at(&self, text: &str) -> bool {
    self.peek().is(text)
  }

  fn at_kind(&self, kind: TokenKind) -> bool {
    self.peek().kind == kind
  }

  fn bump(&mut self) -> Token {
    let token = self.peek().clone();
    if token.kind != TokenKind::Eof {
      self.pos += 1;
    }
    token
  }

  fn eat(&mut self, text: &str) -> bool {
    if self.at(text) {
      self.bump();
      true
    } else {
      false
    }
  }

  fn lo(&self) -> u32 {
    self.peek().span.lo
  }

  /// Span from `lo` to the end of the last consumed token.
  fn span_from(&self, lo: u32) -> Span {
    let hi = if self.pos == 0 {
      lo
    } else {
      self.tokens[self.pos - 1].span.hi
    };
    Span::new(lo, hi.max(lo))
  }

  fn error<T>(&self, expected: impl Into<String>) -> PResult<T> {
    let token = self.peek();
    Err(ParseError::Unexpected {
      expected: expected.into(),
      found: if token.kind == TokenKind::Eof {
        String::from("end of input")
      } else {
        token.text.clone()
      },
      span: token.span,
    })
  }

  fn expect(&mut self, text: &str) -> PResult<Token> {
    if self.at(text) {
      Ok(self.bump())
    } else {
      self.error(format!("'{}'", text))
    }
  }

  fn expect_ident(&mut self) -> PResult<Ident> {
    if self.at_kind(TokenKind::Ident) {
      let token = self.bump();
      Ok(Ident::new(token.text, token.span))
    } else {
      self.error("identifier")
    }
  }

  fn expect_eof(&mut self) -> PResult<()> {
    if self.at_kind(TokenKind::Eof) {
      Ok(())
    } else {
      self.error("end of input")
    }
  }

  /// Runs `parse` and rewinds when it fails.
  fn speculate<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
    let start = self.pos;
    match parse(self) {
      Ok(value) => Some(value),
      Err(_) => {
        self.pos = start;
        None
      }
    }
  }

  fn dotted_name(&mut self) -> PResult<Vec<Ident>> {
    let mut segments = vec![self.expect_ident()?];
    while self.at(".") && self.peek_nth(1).kind == TokenKind::Ident {
      self.bump();
      segments.push(self.expect_ident()?);
    }
    Ok(segments)
  }

  fn compilation_unit(&mut self) -> PResult<CompilationUnit> {
    let package = if self.at("package") {
      let lo = self.lo();
      self.bump();
      let name = self.dotted_name()?;
      self.expect(";")?;
      Some(PackageDecl {
        span: self.span_from(lo),
        name,
      })
    } else {
      None
    };

    let mut imports = Vec::new();
    while self.at("import") {
      let lo = self.lo();
      self.bump();
      let is_static = self.eat("static");
      let name = self.dotted_name()?;
      let on_demand = if self.at(".") && self.peek_nth(1).is("*") {
        self.bump();
        self.bump();
        true
      } else {
        false
      };
      self.expect(";")?;
      imports.push(ImportDecl {
        span: self.span_from(lo),
        is_static,
        name,
        on_demand,
      });
    }

    let mut types = Vec::new();
    while !self.at_kind(TokenKind::Eof) {
      if self.eat(";") {
        continue;
      }
      let lo = self.lo();
      let annotations = self.annotations()?;
      let modifiers = self.modifiers();
      types.push(self.type_decl(lo, annotations, modifiers)?);
    }

    Ok(CompilationUnit {
      handle: self.handle.clone(),
      package,
      imports,
      types,
    })
  }

  fn annotations(&mut self) -> PResult<Vec<Annotation>> {
    let mut annotations = Vec::new();
    while self.at("@") && !self.peek_nth(1).is("interface") {
      annotations.push(self.annotation()?);
    }
    Ok(annotations)
  }

  fn annotation(&mut self) -> PResult<Annotation> {
    let lo = self.lo();
    let id = self.fresh_id();
    self.expect("@")?;
    let name = self.dotted_name()?;

    if !self.eat("(") {
      return Ok(Annotation {
        id,
        span: self.span_from(lo),
        name,
        style: AnnotationStyle::Marker,
        args: Vec::new(),
      });
    }

    let mut args = Vec::new();
    let style = if self.at(")") {
      AnnotationStyle::Normal
    } else if self.at_kind(TokenKind::Ident) && self.peek_nth(1).is("=") {
      loop {
        let name = self.expect_ident()?;
        self.expect("=")?;
        let value = self.expr()?;
        args.push(AnnotationArg { name, value });
        if !self.eat(",") {
          break;
        }
      }
      AnnotationStyle::Normal
    } else {
      let value = self.expr()?;
      args.push(AnnotationArg {
        name: Ident::new("value", value.span()),
        value,
      });
      AnnotationStyle::Single
    };
    self.expect(")")?;

    Ok(Annotation {
      id,
      span: self.span_from(lo),
      name,
      style,
      args,
    })
  }

  fn modifiers(&mut self) -> Vec<Modifier> {
    let mut modifiers = Vec::new();
    while self.at_kind(TokenKind::Ident) {
      let Some(modifier) = Modifier::from_keyword(&self.peek().text) else {
        break;
      };
      self.bump();
      modifiers.push(modifier);
    }
    modifiers
  }

  fn type_decl(
    &mut self,
    lo: u32,
    annotations: Vec<Annotation>,
    modifiers: Vec<Modifier>,
  ) -> PResult<TypeDecl> {
    let id = self.fresh_id();
    let kind = if self.eat("class") {
      TypeKind::Class
    } else if self.eat("interface") {
      TypeKind::Interface
    } else {
      return self.error("'class' or 'interface'");
    };
    let name = self.expect_ident()?;
    let type_params = self.type_params()?;

    let mut extends = Vec::new();
    let mut implements = Vec::new();
    if self.eat("extends") {
      extends = match kind {
        TypeKind::Class => vec![self.type_ref()?],
        TypeKind::Interface => self.type_list()?,
      };
    }
    if kind == TypeKind::Class && self.eat("implements") {
      implements = self.type_list()?;
    }

    self.expect("{")?;
    let mut members = Vec::new();
    while !self.at("}") {
      if self.at_kind(TokenKind::Eof) {
        return self.error("'}'");
      }
      if self.eat(";") {
        continue;
      }
      members.push(self.member(&name)?);
    }
    self.expect("}")?;

    Ok(TypeDecl {
      id,
      span: self.span_from(lo),
      annotations,
      modifiers,
      kind,
      name,
      type_params,
      extends,
      implements,
      members,
    })
  }

  fn type_list(&mut self) -> PResult<Vec<TypeRef>> {
    let mut types = vec![self.type_ref()?];
    while self.eat(",") {
      types.push(self.type_ref()?);
    }
    Ok(types)
  }

  fn type_params(&mut self) -> PResult<Vec<TypeParam>> {
    let mut params = Vec::new();
    if !self.eat("<") {
      return Ok(params);
    }
    loop {
      let lo = self.lo();
      let id = self.fresh_id();
      let name = self.expect_ident()?;
      let mut bounds = Vec::new();
      if self.eat("extends") {
        bounds.push(self.type_ref()?);
        while self.eat("&") {
          bounds.push(self.type_ref()?);
        }
      }
      params.push(TypeParam {
        id,
        span: self.span_from(lo),
        name,
        bounds,
      });
      if !self.eat(",") {
        break;
      }
    }
    self.expect(">")?;
    Ok(params)
  }

  fn member(&mut self, type_name: &Ident) -> PResult<Member> {
    let lo = self.lo();
    let annotations = self.annotations()?;
    let modifiers = self.modifiers();

    if self.at("class") || self.at("interface") {
      return Ok(Member::Type(self.type_decl(lo, annotations, modifiers)?));
    }

    let type_params = self.type_params()?;
    let is_constructor = self.peek().is(&type_name.sym) && self.peek_nth(1).is("(");
    let return_type = if is_constructor {
      None
    } else {
      Some(self.type_ref()?)
    };
    let name = self.expect_ident()?;

    if self.at("(") {
      return Ok(Member::Method(self.method_rest(
        lo,
        annotations,
        modifiers,
        type_params,
        return_type,
        name,
      )?));
    }

    let Some(ty) = return_type else {
      return self.error("'('");
    };
    if !type_params.is_empty() {
      return self.error("'('");
    }
    let init = if self.eat("=") {
      Some(self.expr()?)
    } else {
      None
    };
    self.expect(";")?;

    Ok(Member::Field(FieldDecl {
      id: self.fresh_id(),
      span: self.span_from(lo),
      annotations,
      modifiers,
      ty,
      name,
      init,
    }))
  }

  fn method_rest(
    &mut self,
    lo: u32,
    annotations: Vec<Annotation>,
    modifiers: Vec<Modifier>,
    type_params: Vec<TypeParam>,
    return_type: Option<TypeRef>,
    name: Ident,
  ) -> PResult<MethodDecl> {
    let id = self.fresh_id();
    self.expect("(")?;
    let mut params = Vec::new();
    if !self.at(")") {
      loop {
        params.push(self.param()?);
        if !self.eat(",") {
          break;
        }
      }
    }
    self.expect(")")?;

    let throws = if self.eat("throws") {
      self.type_list()?
    } else {
      Vec::new()
    };

    let body = if self.eat(";") {
      None
    } else {
      Some(self.block()?)
    };

    Ok(MethodDecl {
      id,
      span: self.span_from(lo),
      annotations,
      modifiers,
      type_params,
      return_type,
      name,
      params,
      throws,
      body,
    })
  }

  fn param(&mut self) -> PResult<Param> {
    let lo = self.lo();
    let annotations = self.annotations()?;
    let modifiers = self.modifiers();
    let ty = self.type_ref()?;
    let varargs = self.eat("...");
    let name = self.expect_ident()?;
    Ok(Param {
      id: self.fresh_id(),
      span: self.span_from(lo),
      annotations,
      modifiers,
      ty,
      varargs,
      name,
    })
  }

  fn block(&mut self) -> PResult<Block> {
    let lo = self.lo();
    self.expect("{")?;
    let mut stmts = Vec::new();
    while !self.at("}") {
      if self.at_kind(TokenKind::Eof) {
        return self.error("'}'");
      }
      if self.eat(";") {
        continue;
      }
      stmts.push(self.stmt()?);
    }
    self.expect("}")?;
    Ok(Block {
      span: self.span_from(lo),
      stmts,
    })
  }

  fn stmt(&mut self) -> PResult<Stmt> {
    let lo = self.lo();

    if self.at("{") {
      return Ok(Stmt::Block(self.block()?));
    }

    if self.eat("return") {
      let arg = if self.at(";") {
        None
      } else {
        Some(self.expr()?)
      };
      self.expect(";")?;
      return Ok(Stmt::Return(ReturnStmt {
        span: self.span_from(lo),
        arg,
      }));
    }

    if self.eat("if") {
      self.expect("(")?;
      let test = self.expr()?;
      self.expect(")")?;
      let cons = Box::new(self.stmt()?);
      let alt = if self.eat("else") {
        Some(Box::new(self.stmt()?))
      } else {
        None
      };
      return Ok(Stmt::If(IfStmt {
        span: self.span_from(lo),
        test,
        cons,
        alt,
      }));
    }

    let has_prefix = self.at("@")
      || self.at("class")
      || self.at("interface")
      || (self.at_kind(TokenKind::Ident) && Modifier::from_keyword(&self.peek().text).is_some());
    if has_prefix {
      let annotations = self.annotations()?;
      let modifiers = self.modifiers();
      if self.at("class") || self.at("interface") {
        let decl = self.type_decl(lo, annotations, modifiers)?;
        return Ok(Stmt::LocalType(Box::new(decl)));
      }
      return Ok(Stmt::LocalVar(self.local_var_rest(lo, annotations, modifiers)?));
    }

    let local = self.speculate(|parser| {
      let ty = parser.type_ref()?;
      if parser.at_kind(TokenKind::Ident) && (parser.peek_nth(1).is("=") || parser.peek_nth(1).is(";"))
      {
        Ok(ty)
      } else {
        parser.error("local variable declaration")
      }
    });
    if let Some(ty) = local {
      return Ok(Stmt::LocalVar(self.local_var_after_type(
        lo,
        Vec::new(),
        Vec::new(),
        ty,
      )?));
    }

    let expr = self.expr()?;
    self.expect(";")?;
    Ok(Stmt::Expr(ExprStmt {
      span: self.span_from(lo),
      expr,
    }))
  }

  fn local_var_rest(
    &mut self,
    lo: u32,
    annotations: Vec<Annotation>,
    modifiers: Vec<Modifier>,
  ) -> PResult<LocalVarDecl> {
    let ty = self.type_ref()?;
    self.local_var_after_type(lo, annotations, modifiers, ty)
  }

  fn local_var_after_type(
    &mut self,
    lo: u32,
    annotations: Vec<Annotation>,
    modifiers: Vec<Modifier>,
    ty: TypeRef,
  ) -> PResult<LocalVarDecl> {
    let name = self.expect_ident()?;
    let init = if self.eat("=") {
      Some(self.expr()?)
    } else {
      None
    };
    self.expect(";")?;
    Ok(LocalVarDecl {
      id: self.fresh_id(),
      span: self.span_from(lo),
      annotations,
      modifiers,
      ty,
      name,
      init,
    })
  }

  pub(crate) fn expr(&mut self) -> PResult<Expr> {
    let lo = self.lo();
    let target = self.binary(1)?;
    if self.eat("=") {
      let value = self.expr()?;
      return Ok(Expr::Assign(AssignExpr {
        span: self.span_from(lo),
        target: Box::new(target),
        value: Box::new(value),
      }));
    }
    Ok(target)
  }

  fn binary_op(&self) -> Option<BinaryOp> {
    let token = self.peek();
    if token.kind != TokenKind::Punct {
      return None;
    }
    let op = match token.text.as_str() {
      "||" => BinaryOp::Or,
      "&&" => BinaryOp::And,
      "==" => BinaryOp::EqEq,
      "!=" => BinaryOp::NotEq,
      "<" => BinaryOp::Lt,
      ">" => BinaryOp::Gt,
      "<=" => BinaryOp::LtEq,
      ">=" => BinaryOp::GtEq,
      "+" => BinaryOp::Add,
      "-" => BinaryOp::Sub,
      "*" => BinaryOp::Mul,
      "/" => BinaryOp::Div,
      "%" => BinaryOp::Mod,
      _ => return None,
    };
    Some(op)
  }

  fn binary(&mut self, min_precedence: u8) -> PResult<Expr> {
    let lo = self.lo();
    let mut left = self.unary()?;

    loop {
      if self.at("instanceof") && BinaryOp::Lt.precedence() >= min_precedence {
        self.bump();
        let ty = self.type_ref()?;
        left = Expr::InstanceOf(InstanceOfExpr {
          span: self.span_from(lo),
          expr: Box::new(left),
          ty,
        });
        continue;
      }

      let Some(op) = self.binary_op() else {
        break;
      };
      if op.precedence() < min_precedence {
        break;
      }
      self.bump();
      let right = self.binary(op.precedence() + 1)?;
      left = Expr::Binary(BinExpr {
        span: self.span_from(lo),
        op,
        left: Box::new(left),
        right: Box::new(right),
      });
    }

    Ok(left)
  }

  fn unary(&mut self) -> PResult<Expr> {
    let lo = self.lo();
    let op = if self.at("!") {
      Some(UnaryOp::Not)
    } else if self.at("-") {
      Some(UnaryOp::Minus)
    } else {
      None
    };

    if let Some(op) = op {
      self.bump();
      let arg = self.unary()?;
      return Ok(Expr::Unary(UnaryExpr {
        span: self.span_from(lo),
        op,
        arg: Box::new(arg),
      }));
    }

    self.postfix()
  }

  fn postfix(&mut self) -> PResult<Expr> {
    let lo = self.lo();
    let mut expr = self.primary()?;

    while self.at(".") {
      self.bump();
      let name = self.expect_ident()?;
      if self.at("(") {
        let args = self.args()?;
        expr = Expr::Call(CallExpr {
          span: self.span_from(lo),
          receiver: Some(Box::new(expr)),
          name,
          args,
        });
      } else {
        expr = Expr::FieldAccess(FieldAccessExpr {
          span: self.span_from(lo),
          obj: Box::new(expr),
          prop: name,
        });
      }
    }

    Ok(expr)
  }

  fn args(&mut self) -> PResult<Vec<Expr>> {
    self.expect("(")?;
    let mut args = Vec::new();
    if !self.at(")") {
      loop {
        args.push(self.expr()?);
        if !self.eat(",") {
          break;
        }
      }
    }
    self.expect(")")?;
    Ok(args)
  }

  /// Whether the current token can start the operand of a cast.
  fn at_cast_operand(&self) -> bool {
    let token = self.peek();
    match token.kind {
      TokenKind::Ident => !NON_OPERAND_KEYWORDS.contains(&token.text.as_str()),
      TokenKind::Int | TokenKind::Str | TokenKind::Char => true,
      TokenKind::Punct => token.is("(") || token.is("!"),
      TokenKind::Eof => false,
    }
  }

  fn primary(&mut self) -> PResult<Expr> {
    let lo = self.lo();
    let token = self.peek().clone();

    match token.kind {
      TokenKind::Int | TokenKind::Str | TokenKind::Char => {
        self.bump();
        let kind = match token.kind {
          TokenKind::Int => LitKind::Int,
          TokenKind::Str => LitKind::Str,
          _ => LitKind::Char,
        };
        return Ok(Expr::Lit(Lit {
          span: token.span,
          kind,
          raw: token.text,
        }));
      }
      TokenKind::Eof => return self.error("expression"),
      TokenKind::Ident | TokenKind::Punct => {}
    }

    if token.is("true") || token.is("false") {
      self.bump();
      return Ok(Expr::Lit(Lit {
        span: token.span,
        kind: LitKind::Bool,
        raw: token.text,
      }));
    }

    if self.eat("null") {
      return Ok(Expr::Null(token.span));
    }

    if self.eat("this") {
      return Ok(Expr::This(token.span));
    }

    if self.eat("new") {
      let ty = self.type_ref()?;
      let args = self.args()?;
      return Ok(Expr::New(NewExpr {
        span: self.span_from(lo),
        ty,
        args,
      }));
    }

    if self.at("(") {
      let cast_type = self.speculate(|parser| {
        parser.expect("(")?;
        let ty = parser.type_ref()?;
        parser.expect(")")?;
        if parser.at_cast_operand() {
          Ok(ty)
        } else {
          parser.error("cast operand")
        }
      });

      if let Some(ty) = cast_type {
        let expr = self.unary()?;
        return Ok(Expr::Cast(CastExpr {
          span: self.span_from(lo),
          ty,
          expr: Box::new(expr),
        }));
      }

      self.expect("(")?;
      let expr = self.expr()?;
      self.expect(")")?;
      return Ok(Expr::Paren(ParenExpr {
        span: self.span_from(lo),
        expr: Box::new(expr),
      }));
    }

    let name = self.expect_ident()?;
    if self.at("(") {
      let args = self.args()?;
      return Ok(Expr::Call(CallExpr {
        span: self.span_from(lo),
        receiver: None,
        name,
        args,
      }));
    }

    Ok(Expr::Name(name))
  }

  pub(crate) fn type_ref(&mut self) -> PResult<TypeRef> {
    let lo = self.lo();
    let id = self.fresh_id();

    if self.eat("?") {
      let kind = if self.eat("extends") {
        Some(BoundKind::Extends)
      } else if self.eat("super") {
        Some(BoundKind::Super)
      } else {
        None
      };
      let bound = match kind {
        Some(kind) => Some(WildcardBound {
          kind,
          ty: Box::new(self.type_ref()?),
        }),
        None => None,
      };
      return Ok(TypeRef::Wildcard(WildcardTypeRef {
        id,
        span: self.span_from(lo),
        bound,
      }));
    }

    let mut tokens = vec![self.expect_ident()?];
    let mut type_args = vec![self.type_args()?];
    while self.at(".") && self.peek_nth(1).kind == TokenKind::Ident {
      self.bump();
      tokens.push(self.expect_ident()?);
      type_args.push(self.type_args()?);
    }

    let mut dims = 0;
    while self.at("[") && self.peek_nth(1).is("]") {
      self.bump();
      self.bump();
      dims += 1;
    }

    let span = self.span_from(lo);
    let parameterized = type_args.iter().any(Option::is_some);

    let ty = if tokens.len() == 1 {
      let token = tokens.remove(0);
      match type_args.remove(0) {
        Some(type_args) => TypeRef::ParameterizedSingle(ParameterizedSingleTypeRef {
          id,
          span,
          token,
          type_args,
          dims,
        }),
        None if dims > 0 => TypeRef::Array(ArrayTypeRef {
          id,
          span,
          token,
          dims,
        }),
        None => TypeRef::Single(SingleTypeRef { id, span, token }),
      }
    } else if parameterized {
      TypeRef::ParameterizedQualified(ParameterizedQualifiedTypeRef {
        id,
        span,
        tokens,
        type_args,
        dims,
      })
    } else {
      TypeRef::Qualified(QualifiedTypeRef {
        id,
        span,
        tokens,
        dims,
      })
    };

    Ok(ty)
  }

  fn type_args(&mut self) -> PResult<Option<Vec<TypeRef>>> {
    if !self.eat("<") {
      return Ok(None);
    }
    let mut args = Vec::new();
    if !self.at(">") {
      loop {
        args.push(self.type_ref()?);
        if !self.eat(",") {
          break;
        }
      }
    }
    self.expect(">")?;
    Ok(Some(args))
  }
}

#[cfg(test)]
mod tests {
  use import_alias_ast::codegen::print_unit;
  use indoc::indoc;
  use pretty_assertions::assert_eq;

  use super::*;

  fn type_ref(source: &str) -> TypeRef {
    parse_type_ref(source, UnitHandle::new()).unwrap()
  }

  #[test]
  fn classifies_type_ref_shapes() {
    assert_eq!(type_ref("String").shape(), TypeRefShape::Single);
    assert_eq!(type_ref("String[]").shape(), TypeRefShape::Array);
    assert_eq!(type_ref("List<T>").shape(), TypeRefShape::ParameterizedSingle);
    assert_eq!(type_ref("List<T>[]").shape(), TypeRefShape::ParameterizedSingle);
    assert_eq!(type_ref("java.util.List").shape(), TypeRefShape::Qualified);
    assert_eq!(type_ref("java.util.List[]").shape(), TypeRefShape::Qualified);
    assert_eq!(
      type_ref("java.util.List<T>").shape(),
      TypeRefShape::ParameterizedQualified
    );
    assert_eq!(type_ref("?").shape(), TypeRefShape::Wildcard);
  }

  #[test]
  fn keeps_type_args_aligned_with_segments() {
    let TypeRef::ParameterizedQualified(ty) = type_ref("Outer<A>.Inner.Leaf<B, C>") else {
      panic!("expected a parameterized qualified reference");
    };
    assert_eq!(ty.tokens.len(), 3);
    assert_eq!(ty.type_args.len(), 3);
    assert!(ty.type_args[0].is_some());
    assert!(ty.type_args[1].is_none());
    assert_eq!(ty.type_args[2].as_ref().map(Vec::len), Some(2));
  }

  #[test]
  fn parses_nested_wildcards() {
    assert_eq!(
      type_ref("Map<? extends K, List<? super swt.Button>>").to_string(),
      "Map<? extends K, List<? super swt.Button>>"
    );
  }

  #[test]
  fn rejects_trailing_tokens_in_type_ref() {
    assert!(parse_type_ref("List<T> x", UnitHandle::new()).is_err());
  }

  #[test]
  fn round_trips_canonical_source() {
    let code = indoc! {r#"
      package test.pkg;

      import java.util.ArrayList;
      import static java.util.Collections.*;

      @Import(AList = java.awt.List, UList = java.util.List, swt = org.eclipse.swt.widgets)
      public class Test<T extends Comparable<T>> extends Base implements Runnable, Cloneable {
          private UList<swt.Button> swtButtons = new ArrayList<swt.Button>();
          @Deprecated
          public swt.Button getFirst() {
              AList listWidget = (AList) getWidget();
              if (listWidget != null) return toButton(listWidget);
              return swtButtons.get(0);
          }
          public Test(final String name, @Nullable Object... rest) {
              this.name = name;
          }
          abstract <E extends Exception> void fail(E error) throws E, java.io.IOException;
          static class Inner {
              int[] values;
          }
          void locals() {
              class Local {
              }
              java.util.Map<String, ?>[] maps = null;
              boolean same = maps instanceof Object[] && !(count == 1 + 2 * 3);
              {
                  x = -1;
              }
              if (same) {
                  return;
              } else return;
          }
      }

      interface Shape extends A, B {
          String name();
      }
    "#};

    let unit = parse_compilation_unit(code).unwrap();
    assert_eq!(print_unit(&unit), code);
  }

  #[test]
  fn parses_string_valued_annotation_members() {
    let unit = parse_compilation_unit(indoc! {r#"
      @Import(UList = "java.util.List", A = "")
      class Test {
      }
    "#})
    .unwrap();

    let annotation = &unit.types[0].annotations[0];
    assert_eq!(annotation.raw_expression("UList").as_deref(), Some("java.util.List"));
    assert_eq!(annotation.raw_expression("A").as_deref(), Some(""));
  }

  #[test]
  fn parses_single_value_annotation() {
    let unit = parse_compilation_unit("@SuppressWarnings(\"all\")\nclass Test {\n}\n").unwrap();
    let annotation = &unit.types[0].annotations[0];
    assert_eq!(annotation.style, AnnotationStyle::Single);
    assert_eq!(annotation.member_names().collect::<Vec<_>>(), vec!["value"]);
  }

  #[test]
  fn assigns_distinct_node_ids() {
    let unit = parse_compilation_unit("@A\n@B\nclass Test {\n}\n").unwrap();
    let annotations = &unit.types[0].annotations;
    assert_ne!(annotations[0].id, annotations[1].id);
  }

  #[test]
  fn reports_unexpected_tokens() {
    let error = parse_compilation_unit("class Test { int }").unwrap_err();
    assert_eq!(
      error,
      ParseError::Unexpected {
        expected: String::from("identifier"),
        found: String::from("}"),
        span: Span::new(17, 18),
      }
    );
  }
}
