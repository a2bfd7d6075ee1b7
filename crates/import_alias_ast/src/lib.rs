//! Syntax tree consumed and mutated by the import alias transform.
//!
//! The tree is owned and plain-data like `swc_ecma_ast`. Node identity comes from [`NodeId`]s
//! handed out by the unit's [`UnitHandle`], not from addresses.

mod annotation;
pub mod codegen;
mod decl;
mod expr;
mod node;
mod types;
pub mod visit;

pub use self::annotation::*;
pub use self::decl::*;
pub use self::expr::*;
pub use self::node::*;
pub use self::types::*;
