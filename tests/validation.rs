//! Construction-time validation: every unsound grammar is rejected before it can parse

use dynparse::{BuildError, GrammarErrorKind, Parser, Pattern, Rule, SyntaxTable};
use rstest::rstest;

#[rstest]
#[case::empty_literal("root := \"a\" \"\"", GrammarErrorKind::EmptyLiteral, "root")]
#[case::duplicate("root := a\na := \"x\"\na := \"y\"", GrammarErrorKind::DuplicateRule, "a")]
#[case::orphan("root := a ghost\na := \"x\"", GrammarErrorKind::OrphanNonterminal, "ghost")]
#[case::root_in_other_rule("root := a\na := \"x\" root", GrammarErrorKind::UsedRootSymbol, "root")]
#[case::root_in_itself("root := \"x\" root*", GrammarErrorKind::UsedRootSymbol, "root")]
#[case::unused("root := a\na := \"x\"\nb := \"y\"", GrammarErrorKind::UnusedSymbol, "b")]
#[case::self_use_only("root := \"x\"\ndead := \"y\" dead?", GrammarErrorKind::UnusedSymbol, "dead")]
#[case::unreachable_cycle("root := \"x\"\na := b\nb := a?", GrammarErrorKind::UnusedSymbol, "a")]
fn test_invalid_grammar_is_rejected(
    #[case] grammar: &str,
    #[case] kind: GrammarErrorKind,
    #[case] rule_name: &str,
) {
    match Parser::new(grammar) {
        Err(BuildError::Grammar(err)) => {
            assert_eq!(err.kind, kind);
            assert_eq!(err.rule_name, rule_name);
            assert_eq!(err.reason, kind.reason());
        }
        other => panic!("expected {} error, got {:?}", kind, other),
    }
}

#[test]
fn test_orphan_error_names_referencing_rule() {
    let err = Parser::new("root := a\na := missing").unwrap_err();
    let BuildError::Grammar(err) = err else {
        panic!("expected a grammar error");
    };
    assert_eq!(err.referenced_in.as_deref(), Some("a"));
    assert_eq!(
        err.to_string(),
        "OrphanNonterminal 'missing': the referenced rule is never declared"
    );
}

#[test]
fn test_first_violation_in_check_order_wins() {
    // Both a duplicate and an unused rule; duplicates are checked first
    let err = Parser::new("root := a\na := \"x\"\na := \"y\"\nb := \"z\"").unwrap_err();
    assert_eq!(err.grammar_kind(), Some(GrammarErrorKind::DuplicateRule));
}

#[test]
fn test_validator_runs_on_programmatic_tables() {
    let table = SyntaxTable::from_rules(vec![
        Rule::new("root", Pattern::rule_ref("item")),
        Rule::new("item", Pattern::literal("")),
    ]);
    assert_eq!(table.validate().unwrap_err().kind, GrammarErrorKind::EmptyLiteral);
    assert_eq!(
        Parser::from_table(table).unwrap_err().grammar_kind(),
        Some(GrammarErrorKind::EmptyLiteral)
    );
}

#[test]
fn test_recursion_below_root_is_valid() {
    let parser = Parser::new(
        "doc := list\nlist := \"[\" (value (\",\" value)*)? \"]\"\nvalue := \"1\" | list",
    )
    .unwrap();
    let ast = parser.parse("[1,[1,[]]]").unwrap();
    assert_eq!(ast.root().text(), "[1,[1,[]]]");
}

#[test]
fn test_syntax_errors_surface_as_build_errors() {
    let err = Parser::new("root := \"open").unwrap_err();
    assert!(matches!(err, BuildError::Syntax(_)));
    assert_eq!(err.grammar_kind(), None);
}
