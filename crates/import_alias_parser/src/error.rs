use import_alias_ast::Span;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
  #[error("Unexpected character {found:?} at offset {}", span.lo)]
  UnexpectedChar { found: char, span: Span },
  #[error("Expected {expected}, found {found:?} at offset {}", span.lo)]
  Unexpected {
    expected: String,
    found: String,
    span: Span,
  },
}

impl ParseError {
  pub fn span(&self) -> Span {
    match self {
      ParseError::UnexpectedChar { span, .. } => *span,
      ParseError::Unexpected { span, .. } => *span,
    }
  }
}
