//! Parser for the class-based source language the import alias transform runs on.
//!
//! Covers the subset that matters to type references: packages, imports, annotated classes
//! and interfaces, fields, methods, constructors, nested and local classes, local variables
//! and the expressions that embed types (`new`, casts, `instanceof`).

mod error;
mod lexer;
mod parser;

pub use self::error::ParseError;
pub use self::lexer::tokenize;
pub use self::lexer::Token;
pub use self::lexer::TokenKind;
pub use self::parser::parse_compilation_unit;
pub use self::parser::parse_type_ref;
