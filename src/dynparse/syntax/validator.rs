//! Static validation of a compiled syntax table
//!
//! Checks run in a fixed order and stop at the first violation, so the same table always
//! reports the same error:
//!
//! 1. EmptyLiteral
//! 2. DuplicateRule
//! 3. OrphanNonterminal
//! 4. UsedRootSymbol
//! 5. UnusedSymbol
//!
//! Within a check, rules are visited in declaration order and patterns pre-order.

use std::collections::HashSet;

use tracing::debug;

use crate::dynparse::error::{GrammarError, GrammarErrorKind};

use super::table::SyntaxTable;

pub fn validate(table: &SyntaxTable) -> Result<(), GrammarError> {
    let result = check_empty_literals(table)
        .and_then(|_| check_duplicate_rules(table))
        .and_then(|_| check_orphan_nonterminals(table))
        .and_then(|_| check_used_root_symbol(table))
        .and_then(|_| check_unused_symbols(table));

    if let Err(err) = &result {
        debug!(kind = %err.kind, rule = %err.rule_name, "grammar validation failed");
    }
    result
}

fn check_empty_literals(table: &SyntaxTable) -> Result<(), GrammarError> {
    for rule in table.rules() {
        if rule.pattern.literals().iter().any(|value| value.is_empty()) {
            return Err(GrammarError::new(GrammarErrorKind::EmptyLiteral, &rule.name));
        }
    }
    Ok(())
}

fn check_duplicate_rules(table: &SyntaxTable) -> Result<(), GrammarError> {
    let mut seen = HashSet::new();
    for rule in table.rules() {
        if !seen.insert(rule.name.as_str()) {
            return Err(GrammarError::new(GrammarErrorKind::DuplicateRule, &rule.name));
        }
    }
    Ok(())
}

fn check_orphan_nonterminals(table: &SyntaxTable) -> Result<(), GrammarError> {
    for rule in table.rules() {
        if let Some(missing) = rule
            .pattern
            .references()
            .into_iter()
            .find(|name| !table.contains(name))
        {
            return Err(
                GrammarError::new(GrammarErrorKind::OrphanNonterminal, missing)
                    .referenced_in(&rule.name),
            );
        }
    }
    Ok(())
}

fn check_used_root_symbol(table: &SyntaxTable) -> Result<(), GrammarError> {
    let Some(root) = table.root() else {
        return Ok(());
    };
    for rule in table.rules() {
        if rule.pattern.references().contains(&root.name.as_str()) {
            return Err(
                GrammarError::new(GrammarErrorKind::UsedRootSymbol, &root.name)
                    .referenced_in(&rule.name),
            );
        }
    }
    Ok(())
}

/// Every non-root rule must be reachable from the root
///
/// A rule referenced only by itself, or only from rules the root never reaches, is as dead
/// as one nobody references.
fn check_unused_symbols(table: &SyntaxTable) -> Result<(), GrammarError> {
    let Some(root) = table.root() else {
        return Ok(());
    };

    let mut reachable = HashSet::new();
    let mut pending = vec![root.name.as_str()];
    while let Some(name) = pending.pop() {
        if !reachable.insert(name) {
            continue;
        }
        if let Some(rule) = table.get(name) {
            pending.extend(rule.pattern.references());
        }
    }

    for rule in table.rules().iter().skip(1) {
        if !reachable.contains(rule.name.as_str()) {
            return Err(GrammarError::new(GrammarErrorKind::UnusedSymbol, &rule.name));
        }
    }
    Ok(())
}
