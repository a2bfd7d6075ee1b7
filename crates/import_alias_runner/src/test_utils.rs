use regex::Regex;

use import_alias_ast::visit::VisitMut;

use crate::runner::run_visit;
pub use crate::runner::RunContext;
pub use crate::runner::RunVisitResult;

/// In the future this might be a different type to `RunContext`
pub type RunTestContext = RunContext;

/// Helper to test unit visitors.
///
/// * Parse `code`
/// * Run a visitor over it
/// * Return the result
///
pub fn run_test_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunTestContext) -> V,
) -> RunVisitResult<V> {
  run_visit(code, make_visit).unwrap()
}

/// Remove whitespace from line starts and ends
pub fn remove_code_whitespace(code: &str) -> String {
  let re = Regex::new(r"\s*\n\s*").unwrap();
  re.replace_all(code, "\n").trim().to_string()
}
