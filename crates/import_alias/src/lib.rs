//! Type import aliases declared through an annotation.
//!
//! ```text
//! @Import(UList = java.util.List, swt = org.eclipse.swt.widgets)
//! class Test {
//!     private java.util.List<swt.Button> buttons;
//! }
//! ```
//!
//! Every type reference inside the annotated class or method whose first segment names an
//! alias has that segment replaced by the alias path, so `swt.Button` above becomes
//! `org.eclipse.swt.widgets.Button`. The annotation itself is reduced to a bare `@Import`
//! marker.

mod alias_cache;
mod alias_table;
pub mod config;
mod diagnostic;
mod handler;
mod rewriter;
mod transformer;

pub use self::alias_cache::*;
pub use self::alias_table::*;
pub use self::diagnostic::*;
pub use self::handler::*;
pub use self::rewriter::*;
pub use self::transformer::*;

use import_alias_runner::run_visit;
use import_alias_runner::RunContext;
use import_alias_runner::RunError;

use crate::config::ImportAliasConfig;

#[derive(Debug)]
pub struct TransformResult {
  pub code: String,
  pub diagnostics: Vec<Diagnostic>,
  pub stats: RewriteStats,
}

/// Parses `code`, applies every alias annotation in it and prints the result.
pub fn transform(code: &str, config: ImportAliasConfig) -> Result<TransformResult, RunError> {
  let result = run_visit(code, |_: RunContext| ImportAliasTransformer::new(config))?;
  let mut transformer = result.visitor;

  tracing::debug!(
    annotations = transformer.handled(),
    changed = transformer.stats().changed(),
    "Transformed unit"
  );

  Ok(TransformResult {
    code: result.output_code,
    diagnostics: transformer.take_diagnostics(),
    stats: transformer.stats(),
  })
}

#[cfg(test)]
mod tests {
  use import_alias_runner::test_utils::run_test_visit;
  use import_alias_runner::test_utils::RunVisitResult;
  use indoc::indoc;
  use pretty_assertions::assert_eq;
  use tracing_test::traced_test;

  use super::*;
  use crate::config::UnsupportedUpgradeMode;

  fn run(code: &str) -> RunVisitResult<ImportAliasTransformer> {
    run_test_visit(code, |_| ImportAliasTransformer::new(ImportAliasConfig::default()))
  }

  #[test]
  fn test_rewrites_references_in_annotated_class() {
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run(indoc! {r#"
      package test;

      @Import(AList = java.awt.List, UList = java.util.List, swt = org.eclipse.swt.widgets)
      class Test {
          private java.util.List<swt.Button> buttons;

          Test(swt.Shell shell) {
              swt.Button button = new swt.Button(shell);
          }
      }
    "#});

    assert_eq!(
      output_code,
      indoc! {r#"
        package test;

        @Import
        class Test {
            private java.util.List<org.eclipse.swt.widgets.Button> buttons;
            Test(org.eclipse.swt.widgets.Shell shell) {
                org.eclipse.swt.widgets.Button button = new org.eclipse.swt.widgets.Button(shell);
            }
        }
      "#}
    );
    assert_eq!(visitor.stats().expanded, 4);
    assert!(visitor.diagnostics().is_empty());
  }

  #[test]
  fn test_string_values_and_qualified_annotation_name() {
    let RunVisitResult { output_code, .. } = run(indoc! {r#"
      @lombok.Import(swt = "org.eclipse.swt.widgets")
      class Test {
          swt.Button button;
      }
    "#});

    assert_eq!(
      output_code,
      indoc! {r#"
        @lombok.Import
        class Test {
            org.eclipse.swt.widgets.Button button;
        }
      "#}
    );
  }

  #[test]
  fn test_method_scope_does_not_leak_to_siblings() {
    let RunVisitResult { output_code, .. } = run(indoc! {r#"
      class Test {
          @Import(Str = String)
          Str first(Str value) {
              return value;
          }
          Str second() {
              return null;
          }
      }
    "#});

    assert_eq!(
      output_code,
      indoc! {r#"
        class Test {
            @Import
            String first(String value) {
                return value;
            }
            Str second() {
                return null;
            }
        }
      "#}
    );
  }

  #[test]
  fn test_nested_class_is_rewritten_by_outer_aliases() {
    let RunVisitResult { output_code, .. } = run(indoc! {r#"
      @Import(swt = org.eclipse.swt.widgets)
      class Outer {
          class Inner {
              swt.Label label;
          }
      }
    "#});

    assert_eq!(
      output_code,
      indoc! {r#"
        @Import
        class Outer {
            class Inner {
                org.eclipse.swt.widgets.Label label;
            }
        }
      "#}
    );
  }

  #[test]
  fn test_innermost_annotation_governs_its_scope() {
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run(indoc! {r#"
      @Import(Str = String, A = x.A)
      class Test {
          Str name;
          A.B outer;
          @Import(Str = Integer, A = y.A)
          Str run(A.B b) {
              A.C local = null;
              return null;
          }
          @Import(Str = Long)
          class Inner {
              Str value;
              A.B other;
          }
      }
    "#});

    assert_eq!(
      output_code,
      indoc! {r#"
        @Import
        class Test {
            String name;
            x.A.B outer;
            @Import
            Integer run(y.A.B b) {
                y.A.C local = null;
                return null;
            }
            @Import
            class Inner {
                Long value;
                A.B other;
            }
        }
      "#}
    );
    assert_eq!(visitor.handled(), 3);
  }

  #[test]
  fn test_misplaced_annotations_are_reported() {
    let code = indoc! {r#"
      class Test {
          @Import(Str = String)
          Str field;
          void run(@Import(Str = String) Str value) {
              @Import(Str = String) Str local = value;
          }
      }
    "#};
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run(code);

    assert_eq!(output_code, code);
    let messages = visitor
      .diagnostics()
      .iter()
      .map(|diagnostic| diagnostic.message.as_str())
      .collect::<Vec<_>>();
    assert_eq!(
      messages,
      vec!["'@Import' is only legal on types and methods."; 3]
    );
    assert!(visitor.diagnostics().iter().all(Diagnostic::is_error));
  }

  #[test]
  fn test_other_annotations_are_ignored() {
    let code = indoc! {r#"
      @Deprecated
      @other.Import(Str = String)
      class Test {
          Str field;
      }
    "#};
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run(code);

    assert_eq!(output_code, code);
    assert_eq!(visitor.handled(), 0);
  }

  #[test]
  fn test_transform_twice_with_one_transformer_is_stable() {
    let mut unit = import_alias_parser::parse_compilation_unit(indoc! {r#"
      @Import(A = x.A, x = y)
      class Test {
          A.B field;
      }
    "#})
    .unwrap();
    let mut transformer = ImportAliasTransformer::new(ImportAliasConfig::default());

    import_alias_ast::visit::VisitMutWith::visit_mut_with(&mut unit, &mut transformer);
    let first = import_alias_ast::codegen::print_unit(&unit);
    import_alias_ast::visit::VisitMutWith::visit_mut_with(&mut unit, &mut transformer);
    let second = import_alias_ast::codegen::print_unit(&unit);

    assert_eq!(first, second);
    assert_eq!(
      second,
      indoc! {r#"
        @Import
        class Test {
            x.A.B field;
        }
      "#}
    );
    assert_eq!(transformer.handled(), 2);
  }

  #[test]
  fn test_transform_output_is_a_fixed_point() {
    let code = indoc! {r#"
      @Import(UList = java.util.List, swt = org.eclipse.swt.widgets)
      class Test {
          UList<swt.Button> buttons;
      }
    "#};

    let first = transform(code, ImportAliasConfig::default()).unwrap();
    let second = transform(&first.code, ImportAliasConfig::default()).unwrap();

    assert_eq!(first.code, second.code);
    assert_eq!(second.stats.changed(), 0);
  }

  #[test]
  fn test_transform_collects_warnings() {
    let result = transform(
      indoc! {r#"
        @Import(UList = java.util.List)
        class Test {
            UList items;
        }
      "#},
      ImportAliasConfig {
        unsupported_upgrade: UnsupportedUpgradeMode::Warn,
        ..Default::default()
      },
    )
    .unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert!(!result.diagnostics[0].is_error());
    assert_eq!(result.stats.unsupported, 1);
  }

  #[test]
  fn test_transform_propagates_parse_errors() {
    let error = transform("class Test {", ImportAliasConfig::default()).unwrap_err();
    assert!(matches!(error, RunError::Parse(..)));
  }

  #[traced_test]
  #[test]
  fn test_logs_each_handled_scope() {
    run(indoc! {r#"
      @Import(Str = String)
      class Test {
          Str field;
      }
    "#});

    assert!(logs_contain("Built alias table"));
    assert!(logs_contain("Applied import aliases"));
  }
}
