//! Structural lookup of `def`/`class` blocks in indentation-based source
//!
//! - `token`: token kinds and positions
//! - `tokenizer`: lazy tokenizer reporting indentation structure
//! - `dotted_path`: validated `Class.method` style paths
//! - `scan`: the lookup state machine, driven one token at a time
//! - `span`: the resulting line range and line slicing
//!
//! The lookup never builds a syntax tree. It follows `def`/`class` headers and
//! indentation depth, so the first header matching each path segment wins.

pub mod dotted_path;
pub mod scan;
pub mod span;
pub mod token;
pub mod tokenizer;

use crate::artifacts::locator::dotted_path::DottedPath;
use crate::artifacts::locator::scan::ScanState;
use crate::artifacts::locator::span::BlockSpan;
use crate::artifacts::locator::tokenizer::Tokenizer;

pub const BLOCK_KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "def",
    "class",
};

pub const STRING_PREFIXES: phf::Set<&'static str> = phf::phf_set! {
    "r", "u", "b", "f", "t",
    "br", "rb", "fr", "rf", "tr", "rt",
};

/// Finds the line range of the construct named by `path` in `source`.
///
/// A tokenization error stops the scan with a warning. A block that was
/// already closed is still returned; anything else comes back unresolved.
pub fn locate(source: &str, path: &DottedPath) -> BlockSpan {
    let mut state = ScanState::new(path);

    for token in Tokenizer::new(source) {
        match token {
            Ok(token) => {
                if state.feed(&token).is_break() {
                    break;
                }
            }
            Err(error) => {
                log::warn!("Token error at line {}: {}", error.line(), error);
                state.abort();
                break;
            }
        }
    }

    let span = state.span();
    log::debug!("located {path}: {span}");

    span
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    fn path(name: &str) -> DottedPath {
        DottedPath::try_parse(name).unwrap()
    }

    fn lines(source: &str) -> Vec<&str> {
        source.lines().collect()
    }

    #[fixture]
    fn module_source() -> &'static str {
        r#"import os


class Handler(object):
    """Handles things."""

    def setup(self):
        self.ready = True

    def run(self, arg):
        if arg:
            return self.process(
                arg,
            )
        return None

    class Inner:
        def run(self):
            pass


def run():
    return Handler().run(1)
"#
    }

    #[test]
    fn function_running_to_end_of_file() {
        let source = "def f():\n    a\n    b\n";

        let span = locate(source, &path("f"));

        assert_eq!(span, BlockSpan::new(Some(1), None));
        assert_eq!(
            span.slice(&lines(source)).unwrap(),
            ["def f():", "    a", "    b"]
        );
    }

    #[test]
    fn method_closed_by_dedent_of_enclosing_class() {
        let source = "class C:\n    def f():\n        a\nclass D:\n    pass\n";

        let span = locate(source, &path("C.f"));

        assert_eq!(span, BlockSpan::new(Some(2), Some(4)));
        assert_eq!(
            span.slice(&lines(source)).unwrap(),
            ["    def f():", "        a"]
        );
    }

    #[rstest]
    #[case("Handler", BlockSpan::new(Some(4), Some(22)))]
    #[case("Handler.setup", BlockSpan::new(Some(7), Some(10)))]
    #[case("Handler.run", BlockSpan::new(Some(10), Some(17)))]
    #[case("Handler.Inner", BlockSpan::new(Some(17), Some(22)))]
    #[case("Handler.Inner.run", BlockSpan::new(Some(18), Some(22)))]
    #[case("run", BlockSpan::new(Some(10), Some(17)))]
    fn locate_in_module(
        module_source: &str,
        #[case] name: &str,
        #[case] expected: BlockSpan,
    ) {
        assert_eq!(locate(module_source, &path(name)), expected);
    }

    #[rstest]
    #[case("Missing")]
    #[case("Handler.missing")]
    #[case("Handler.setup.run")]
    fn unresolved_paths(module_source: &str, #[case] name: &str) {
        assert_eq!(locate(module_source, &path(name)), BlockSpan::unresolved());
    }

    #[test]
    fn first_occurrence_wins_over_shallower_sibling() {
        let source = "class A:\n    def f():\n        x\ndef f():\n    y\n";

        assert_eq!(locate(source, &path("f")), BlockSpan::new(Some(2), Some(4)));
    }

    #[test]
    fn first_intermediate_match_wins() {
        let source = "class C:\n    x = 1\nclass C:\n    def f():\n        pass\n";

        assert_eq!(locate(source, &path("C.f")), BlockSpan::unresolved());
    }

    #[test]
    fn single_line_body_spans_one_line() {
        let source = "class C:\n    def f(self): return 1\n    x = 2\ny = 3\n";

        let span = locate(source, &path("C.f"));

        assert_eq!(span, BlockSpan::new(Some(2), Some(3)));
        assert_eq!(span.start.unwrap(), span.end.unwrap() - 1);
    }

    #[test]
    fn single_line_class_scope_holds_no_methods() {
        let source = "class C: x = 1\ndef f():\n    pass\n";

        assert_eq!(locate(source, &path("C.f")), BlockSpan::unresolved());
    }

    #[test]
    fn multi_line_header_is_followed_to_its_body() {
        let source = "def f(\n    a,\n    b,\n):\n    return a\nx = 1\n";

        assert_eq!(locate(source, &path("f")), BlockSpan::new(Some(1), Some(6)));
    }

    #[test]
    fn async_functions_and_decorators() {
        let source = "@decorator\nasync def f():\n    await g()\n\nh = 1\n";

        assert_eq!(locate(source, &path("f")), BlockSpan::new(Some(2), Some(5)));
    }

    #[test]
    fn names_inside_strings_are_ignored() {
        let source = "x = '''\ndef f():\n'''\ndef f():\n    pass\n";

        assert_eq!(locate(source, &path("f")), BlockSpan::new(Some(4), None));
    }

    #[test]
    fn tokenize_error_before_match_is_unresolved() {
        let source = "def g():\n        a\n    b\ndef f():\n    pass\n";

        assert_eq!(locate(source, &path("f")), BlockSpan::unresolved());
    }

    #[test]
    fn tokenize_error_inside_body_leaves_block_unresolved() {
        let source = "def f():\n    s = '''\n";

        assert_eq!(locate(source, &path("f")), BlockSpan::unresolved());
    }

    #[test]
    fn tokenize_error_after_block_keeps_it() {
        let source = "def f():\n    a\ns = '''\n";

        assert_eq!(locate(source, &path("f")), BlockSpan::new(Some(1), Some(3)));
    }

    fn identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,6}".prop_filter("keywords are not names", |s| {
            !BLOCK_KEYWORDS.contains(s.as_str()) && !STRING_PREFIXES.contains(s.as_str())
        })
    }

    fn function(name: String, depth: usize, body: Vec<String>) -> String {
        let indent = "    ".repeat(depth);
        let mut text = format!("{indent}def {name}():\n");
        for line in body {
            text.push_str(&format!("{indent}    {line} = 1\n"));
        }
        text
    }

    proptest! {
        #[test]
        fn locate_is_idempotent(
            names in prop::collection::vec(identifier(), 1..6),
            target in 0usize..6,
        ) {
            let source = names
                .iter()
                .map(|name| function(name.clone(), 0, vec![name.clone()]))
                .collect::<String>();
            let target = path(&names[target % names.len()]);

            prop_assert_eq!(locate(&source, &target), locate(&source, &target));
        }

        #[test]
        fn located_slice_relocates_to_itself(
            class_name in identifier(),
            method in identifier(),
            body in prop::collection::vec(identifier(), 1..5),
            trailing in prop::collection::vec(identifier(), 0..3),
        ) {
            let mut source = format!("class {class_name}:\n");
            source.push_str(&function(method.clone(), 1, body));
            source.push_str(&function(format!("{method}_next"), 1, trailing));
            source.push_str("done = True\n");

            let all_lines = lines(&source);
            let span = locate(&source, &path(&format!("{class_name}.{method}")));
            let slice = span.slice(&all_lines).unwrap().join("\n");

            let relocated = locate(&slice, &path(&method));
            let slice_lines = lines(&slice);

            prop_assert_eq!(relocated.start, Some(1));
            prop_assert_eq!(
                relocated.slice(&slice_lines).map(<[_]>::len),
                Some(slice_lines.len())
            );
        }
    }
}
