//! Grammar compiler: grammar text to an unvalidated [`SyntaxTable`]
//!
//! Compilation only builds patterns and keeps rules in declaration order. It does not look at
//! how rules refer to each other; those checks belong to the validator, so a compiled table can
//! hold duplicates, orphans or empty literals until [`SyntaxTable::validate`] runs.

use std::sync::Arc;

use chumsky::prelude::*;
use tracing::debug;

use crate::dynparse::error::{GrammarSyntaxError, SyntaxErrorKind};
use crate::dynparse::grammar::combinators::{
    choice_or_single, decode_literal, grammar, Line, ParserError,
};
use crate::dynparse::grammar::pattern::{Pattern, Rule};
use crate::dynparse::lexer::lexer_impl::error_at;
use crate::dynparse::lexer::{tokenize_with_spans, Token, TokenSpan};
use crate::dynparse::syntax::SyntaxTable;

/// Compile grammar text into a syntax table
///
/// The first declared rule becomes the root. Fails on malformed text; never validates.
pub fn compile(source: &str) -> Result<SyntaxTable, GrammarSyntaxError> {
    let tokens = tokenize_with_spans(source)?;
    check_literals(source, &tokens)?;

    let lines = grammar(Arc::new(source.to_string()))
        .parse(tokens.clone())
        .map_err(|errors| convert_errors(source, &tokens, errors))?;

    let rules = assemble(source, lines)?;
    if rules.is_empty() {
        return Err(error_at(
            source,
            SyntaxErrorKind::NoRules,
            source.len()..source.len(),
        ));
    }

    debug!(rules = rules.len(), "compiled grammar");
    Ok(SyntaxTable::from_rules(rules))
}

/// Fold continuation lines into the rule above them
fn assemble(source: &str, lines: Vec<Line>) -> Result<Vec<Rule>, GrammarSyntaxError> {
    let mut pending: Vec<(String, Vec<Pattern>)> = Vec::new();

    for line in lines {
        match line {
            Line::Rule(name, alternatives) => pending.push((name, alternatives)),
            Line::Continuation(span, alternatives) => match pending.last_mut() {
                Some((_, existing)) => existing.extend(alternatives),
                None => {
                    return Err(error_at(
                        source,
                        SyntaxErrorKind::UnexpectedToken {
                            found: Token::Pipe.to_string(),
                            expected: "rule declaration".to_string(),
                        },
                        span,
                    ))
                }
            },
        }
    }

    Ok(pending
        .into_iter()
        .map(|(name, alternatives)| Rule::new(name, choice_or_single(alternatives)))
        .collect())
}

/// Reject bad escapes up front, pointing at the offending backslash
fn check_literals(source: &str, tokens: &[TokenSpan]) -> Result<(), GrammarSyntaxError> {
    for (token, span) in tokens {
        if *token != Token::Literal {
            continue;
        }
        if let Err((offset, escaped)) = decode_literal(&source[span.clone()]) {
            let start = span.start + offset;
            return Err(error_at(
                source,
                SyntaxErrorKind::InvalidEscape(escaped),
                start..start + 1 + escaped.len_utf8(),
            ));
        }
    }
    Ok(())
}

fn convert_errors(
    source: &str,
    tokens: &[TokenSpan],
    errors: Vec<ParserError>,
) -> GrammarSyntaxError {
    // Chumsky reports the furthest failure first
    let Some(error) = errors.into_iter().next() else {
        return error_at(
            source,
            SyntaxErrorKind::UnexpectedEnd {
                expected: "rule declaration".to_string(),
            },
            source.len()..source.len(),
        );
    };

    let expected = error
        .label()
        .map(str::to_string)
        .unwrap_or_else(|| "end of line".to_string());

    match error.found() {
        Some((token, span)) => error_at(
            source,
            SyntaxErrorKind::UnexpectedToken {
                found: describe_token(source, *token, span),
                expected,
            },
            span.clone(),
        ),
        None => {
            let span = tokens
                .get(error.span().start)
                .map(|(_, span)| span.clone())
                .unwrap_or(source.len()..source.len());
            error_at(source, SyntaxErrorKind::UnexpectedEnd { expected }, span)
        }
    }
}

fn describe_token(source: &str, token: Token, span: &std::ops::Range<usize>) -> String {
    match token {
        Token::Ident => format!("rule name '{}'", &source[span.clone()]),
        Token::Literal => format!("literal {}", &source[span.clone()]),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynparse::ast::Position;

    fn rules(source: &str) -> Vec<Rule> {
        compile(source).unwrap().rules().to_vec()
    }

    #[test]
    fn test_first_rule_is_root() {
        let table = compile("root := \"(\" inner \")\"\ninner := \"x\"").unwrap();
        assert_eq!(table.root().map(|r| r.name.as_str()), Some("root"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_choice_of_literals() {
        assert_eq!(
            rules(r#"greeting := "hi" | "hello""#),
            vec![Rule::new(
                "greeting",
                Pattern::choice(vec![Pattern::literal("hi"), Pattern::literal("hello")])
            )]
        );
    }

    #[test]
    fn test_continuation_lines_extend_the_previous_rule() {
        let source = "value := \"a\"\n       | \"b\"\n       | \"c\"\n";
        assert_eq!(
            rules(source),
            vec![Rule::new(
                "value",
                Pattern::choice(vec![
                    Pattern::literal("a"),
                    Pattern::literal("b"),
                    Pattern::literal("c"),
                ])
            )]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_ignored() {
        let source = "# header\n\nroot := item*   # trailing\n\n  \nitem := \"i\"\n";
        let names: Vec<String> = rules(source).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["root", "item"]);
    }

    #[test]
    fn test_duplicates_survive_compilation() {
        let table = compile("a := b\nb := \"x\"\nb := \"y\"").unwrap();
        assert_eq!(table.rules().len(), 3);
    }

    #[test]
    fn test_empty_literal_compiles() {
        assert_eq!(
            rules(r#"a := """#),
            vec![Rule::new("a", Pattern::literal(""))]
        );
    }

    #[test]
    fn test_missing_define_is_a_syntax_error() {
        let err = compile("root \"x\"").unwrap_err();
        assert!(matches!(err.kind, SyntaxErrorKind::UnexpectedToken { .. }));
        assert_eq!(err.position, Position::new(0, 5));
    }

    #[test]
    fn test_rule_without_terms_is_a_syntax_error() {
        let err = compile("root :=\n").unwrap_err();
        assert!(matches!(
            err.kind,
            SyntaxErrorKind::UnexpectedToken { .. } | SyntaxErrorKind::UnexpectedEnd { .. }
        ));
    }

    #[test]
    fn test_unclosed_group_is_a_syntax_error() {
        assert!(compile("root := (\"a\" \"b\"\n").is_err());
    }

    #[test]
    fn test_unknown_combinator() {
        let err = compile("root := \"a\"+").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnknownSymbol('+'));
    }

    #[test]
    fn test_invalid_escape_points_at_backslash() {
        let err = compile(r#"root := "a\qb""#).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::InvalidEscape('q'));
        assert_eq!(err.span, 10..12);
    }

    #[test]
    fn test_leading_continuation_is_rejected() {
        let err = compile("| \"a\"\nroot := \"b\"").unwrap_err();
        assert!(matches!(err.kind, SyntaxErrorKind::UnexpectedToken { .. }));
        assert_eq!(err.position, Position::new(0, 0));
    }

    #[test]
    fn test_no_rules() {
        let err = compile("# nothing here\n\n").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::NoRules);
    }
}
