use std::rc::Rc;

use import_alias_ast::codegen::print_unit;
use import_alias_ast::visit::VisitMut;
use import_alias_ast::visit::VisitMutWith;
use import_alias_ast::CompilationUnit;
use import_alias_ast::UnitHandle;
use import_alias_parser::parse_compilation_unit;
use import_alias_parser::ParseError;

pub struct RunContext {
  /// Handle of the unit being visited
  pub unit: Rc<UnitHandle>,
}

pub struct RunVisitResult<V> {
  pub output_code: String,
  pub visitor: V,
  /// The visited tree, still holding its unit handle
  pub unit: CompilationUnit,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error("Failed to parse unit: {0}")]
  Parse(#[from] ParseError),
}

/// Runner of unit transformations
///
/// * Parse `code`
/// * Run a visitor over it
/// * Print the result
///
pub fn run_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunError> {
  let mut unit = parse_compilation_unit(code)?;
  let context = RunContext {
    unit: unit.handle.clone(),
  };

  let mut visitor = make_visit(context);
  unit.visit_mut_with(&mut visitor);
  let output_code = print_unit(&unit);

  Ok(RunVisitResult {
    output_code,
    visitor,
    unit,
  })
}

#[cfg(test)]
mod tests {
  use import_alias_ast::TypeRef;
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_example() {
    struct Visitor;
    impl VisitMut for Visitor {
      fn visit_mut_type_ref(&mut self, node: &mut TypeRef) {
        if let Some(leading) = node.leading_segment_mut() {
          leading.sym = String::from("Replacement");
        }
      }
    }

    let code = "class Test { Original field; }";
    let RunVisitResult { output_code, .. } = run_visit(code, |_: RunContext| Visitor).unwrap();
    assert_eq!(
      output_code,
      "class Test {\n    Replacement field;\n}\n"
    );
  }

  #[test]
  fn context_refers_to_the_parsed_unit() {
    struct Holder(Rc<UnitHandle>);
    impl VisitMut for Holder {}

    let result = run_visit("class Test {}", |context: RunContext| Holder(context.unit)).unwrap();
    assert!(Rc::ptr_eq(&result.visitor.0, &result.unit.handle));
  }

  #[test]
  fn reports_parse_errors() {
    struct Noop;
    impl VisitMut for Noop {}

    let error = run_visit("class {", |_| Noop).err().unwrap();
    assert!(matches!(error, RunError::Parse(..)));
  }
}
