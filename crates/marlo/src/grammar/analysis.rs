//! Build-time grammar analysis.
//!
//! Everything the recognizer asks of a grammar beyond plain rule lookup is
//! computed here, once, when the grammar is built:
//!
//! - **Nulling symbols** — symbols that derive the empty string and nothing
//!   else. Nullable-but-not-nulling symbols are deliberately excluded; they
//!   are handled by ordinary completion of their empty alternatives.
//! - **Right-recursion flags** — per rule, whether its rightmost
//!   right-hand-side symbol derives a string ending in the rule's own
//!   left-hand side. These gate Leo item creation.
//!
//! All three computations are changed-flag fixpoints over the rule list.

use crate::grammar::Symbol;
use crate::grammar::builder::Rule;
use hashbrown::{HashMap, HashSet};

type SymbolSet<S> = HashSet<S, ahash::RandomState>;

pub(crate) struct GrammarFacts<S> {
    pub(crate) nulling: SymbolSet<S>,
    pub(crate) right_recursive: Vec<bool>,
}

pub(crate) fn analyze<S: Symbol>(rules: &[Rule<S>]) -> GrammarFacts<S> {
    let nullable = nullable_symbols(rules);
    let nonempty = nonempty_deriving_symbols(rules, &nullable);

    let nulling = nullable
        .iter()
        .filter(|symbol| !nonempty.contains(*symbol))
        .cloned()
        .collect();

    GrammarFacts {
        nulling,
        right_recursive: right_recursive_rules(rules, &nullable),
    }
}

/// Symbols with at least one all-nullable alternative (an empty
/// right-hand side counts). Terminals are never nullable.
fn nullable_symbols<S: Symbol>(rules: &[Rule<S>]) -> SymbolSet<S> {
    let mut nullable = SymbolSet::default();
    let mut changed = true;
    while changed {
        changed = false;
        for rule in rules {
            if nullable.contains(&rule.lhs) {
                continue;
            }
            if rule.rhs.iter().all(|symbol| nullable.contains(symbol)) {
                nullable.insert(rule.lhs.clone());
                changed = true;
            }
        }
    }
    nullable
}

/// Symbols that can derive at least one nonempty terminal string.
///
/// A terminal derives itself. A nonterminal qualifies through an alternative
/// whose symbols all derive *something* and where at least one derives a
/// nonempty string. Unproductive symbols qualify for neither set.
fn nonempty_deriving_symbols<S: Symbol>(
    rules: &[Rule<S>],
    nullable: &SymbolSet<S>,
) -> SymbolSet<S> {
    let defined: SymbolSet<S> = rules.iter().map(|rule| rule.lhs.clone()).collect();
    let mut nonempty = SymbolSet::default();

    let mut changed = true;
    while changed {
        changed = false;
        for rule in rules {
            if nonempty.contains(&rule.lhs) {
                continue;
            }
            let derives_nonempty =
                |symbol: &S| !defined.contains(symbol) || nonempty.contains(symbol);
            let viable = rule
                .rhs
                .iter()
                .all(|symbol| nullable.contains(symbol) || derives_nonempty(symbol));
            if viable && rule.rhs.iter().any(derives_nonempty) {
                nonempty.insert(rule.lhs.clone());
                changed = true;
            }
        }
    }
    nonempty
}

/// Per-rule right-recursion flags.
///
/// `rightmost[x]` collects the symbols that can end a string derived from
/// `x` (including `x` itself, by the zero-step derivation). Each rule feeds
/// its left-hand side from its right-hand-side symbols, walking leftward
/// from the end while the walked symbols are nullable.
fn right_recursive_rules<S: Symbol>(rules: &[Rule<S>], nullable: &SymbolSet<S>) -> Vec<bool> {
    let mut rightmost: HashMap<S, SymbolSet<S>, ahash::RandomState> = HashMap::default();
    for rule in rules {
        rightmost
            .entry(rule.lhs.clone())
            .or_default()
            .insert(rule.lhs.clone());
        for symbol in &rule.rhs {
            rightmost
                .entry(symbol.clone())
                .or_default()
                .insert(symbol.clone());
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for rule in rules {
            // buffer the merge; source and destination may be the same entry
            let mut absorbed: Vec<S> = Vec::new();
            for symbol in rule.rhs.iter().rev() {
                if let Some(ends) = rightmost.get(symbol) {
                    absorbed.extend(ends.iter().cloned());
                }
                if !nullable.contains(symbol) {
                    break;
                }
            }
            if let Some(ends) = rightmost.get_mut(&rule.lhs) {
                for symbol in absorbed {
                    if ends.insert(symbol) {
                        changed = true;
                    }
                }
            }
        }
    }

    rules
        .iter()
        .map(|rule| {
            rule.rhs.last().is_some_and(|last| {
                rightmost
                    .get(last)
                    .is_some_and(|ends| ends.contains(&rule.lhs))
            })
        })
        .collect()
}
