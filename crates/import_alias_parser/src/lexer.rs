//! Tokenizer.
//!
//! Whitespace and comments are skipped. Every `>` is lexed on its own so that nested type
//! arguments like `Map<K, List<V>>` close one level at a time; the parser never needs shift
//! operators.

use import_alias_ast::Span;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::bytes::complete::take_until;
use nom::bytes::complete::take_while;
use nom::character::complete::anychar;
use nom::character::complete::char;
use nom::character::complete::digit1;
use nom::character::complete::multispace1;
use nom::character::complete::none_of;
use nom::character::complete::not_line_ending;
use nom::character::complete::one_of;
use nom::character::complete::satisfy;
use nom::combinator::map;
use nom::combinator::opt;
use nom::combinator::recognize;
use nom::multi::many0;
use nom::sequence::delimited;
use nom::sequence::pair;
use nom::sequence::preceded;
use nom::IResult;

use crate::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
  /// Identifiers and keywords
  Ident,
  Int,
  Str,
  Char,
  Punct,
  Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
  pub span: Span,
}

impl Token {
  pub fn is(&self, text: &str) -> bool {
    self.kind != TokenKind::Str && self.kind != TokenKind::Char && self.text == text
  }
}

fn is_ident_start(c: char) -> bool {
  c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '$'
}

fn line_comment(input: &str) -> IResult<&str, &str> {
  recognize(pair(tag("//"), not_line_ending))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
  recognize(delimited(tag("/*"), take_until("*/"), tag("*/")))(input)
}

fn trivia(input: &str) -> IResult<&str, Vec<&str>> {
  many0(alt((multispace1, line_comment, block_comment)))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
  recognize(pair(satisfy(is_ident_start), take_while(is_ident_continue)))(input)
}

fn int_literal(input: &str) -> IResult<&str, &str> {
  recognize(pair(digit1, opt(one_of("lLfFdD"))))(input)
}

fn string_literal(input: &str) -> IResult<&str, &str> {
  recognize(delimited(
    char('"'),
    many0(alt((preceded(char('\\'), anychar), none_of("\"\\\n")))),
    char('"'),
  ))(input)
}

fn char_literal(input: &str) -> IResult<&str, &str> {
  recognize(delimited(
    char('\''),
    many0(alt((preceded(char('\\'), anychar), none_of("'\\\n")))),
    char('\''),
  ))(input)
}

fn punctuation(input: &str) -> IResult<&str, &str> {
  alt((
    tag("..."),
    tag("=="),
    tag("!="),
    tag("<="),
    tag(">="),
    tag("&&"),
    tag("||"),
    recognize(one_of("{}()[];,.@=<>?!+-*/%&|:")),
  ))(input)
}

fn token(input: &str) -> IResult<&str, (TokenKind, &str)> {
  alt((
    map(identifier, |text| (TokenKind::Ident, text)),
    map(int_literal, |text| (TokenKind::Int, text)),
    map(string_literal, |text| (TokenKind::Str, text)),
    map(char_literal, |text| (TokenKind::Char, text)),
    map(punctuation, |text| (TokenKind::Punct, text)),
  ))(input)
}

/// Splits `source` into tokens, always terminated by a [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
  let offset = |rest: &str| (source.len() - rest.len()) as u32;
  let mut tokens = Vec::new();
  let mut rest = source;

  loop {
    if let Ok((after_trivia, _)) = trivia(rest) {
      rest = after_trivia;
    }

    let lo = offset(rest);
    if rest.is_empty() {
      tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        span: Span::new(lo, lo),
      });
      return Ok(tokens);
    }

    let Ok((next, (kind, text))) = token(rest) else {
      let found = rest.chars().next().unwrap_or_default();
      return Err(ParseError::UnexpectedChar {
        found,
        span: Span::new(lo, lo + found.len_utf8() as u32),
      });
    };

    rest = next;
    tokens.push(Token {
      kind,
      text: text.to_string(),
      span: Span::new(lo, offset(rest)),
    });
  }
}
