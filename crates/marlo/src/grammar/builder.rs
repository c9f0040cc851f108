use crate::grammar::{DottedRule, GrammarView, Symbol, analysis};
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

/// Most rules a grammar may hold, imposed by the packed [`Dotted`] encoding
const MAX_RULES: usize = u32::MAX as usize;

/// Longest right-hand side a rule may have, imposed by the packed [`Dotted`] encoding
const MAX_RHS: usize = u16::MAX as usize;

/// A dotted-rule cursor: a rule handle plus a dot position on its
/// right-hand side.
///
/// Carrying the right-hand-side length makes completion checks and dot
/// advancement self-contained; everything else about the rule is resolved
/// through the owning [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dotted {
    rule: u32,
    dot: u16,
    len: u16,
}

impl Dotted {
    pub(crate) const fn new(rule: u32, len: u16) -> Self {
        Self { rule, dot: 0, len }
    }

    /// Index of this cursor's rule in the owning grammar
    #[must_use]
    pub const fn rule_index(self) -> usize {
        self.rule as usize
    }

    /// Current dot position
    #[must_use]
    pub const fn dot(self) -> usize {
        self.dot as usize
    }
}

impl DottedRule for Dotted {
    fn advanced(self) -> Self {
        debug_assert!(self.dot < self.len, "cannot advance a completed rule cursor");
        Self {
            dot: self.dot + 1,
            ..self
        }
    }

    fn is_complete(self) -> bool {
        self.dot == self.len
    }
}

/// Production rule: one left-hand side and one alternative's right-hand side
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rule<S> {
    pub(crate) lhs: S,
    pub(crate) rhs: SmallVec<[S; 4]>,
}

/// Grammar definition.
///
/// Immutable once built; safe to share between concurrently running
/// recognizers.
#[derive(Debug, Clone)]
pub struct Grammar<S: Symbol> {
    rules: Vec<Rule<S>>,
    /// Dot-0 cursors per left-hand-side symbol
    predictions: HashMap<S, SmallVec<[Dotted; 2]>, ahash::RandomState>,
    nulling: HashSet<S, ahash::RandomState>,
    /// Per-rule right-recursion flags, indexed like `rules`
    right_recursive: Vec<bool>,
}

impl<S: Symbol> Grammar<S> {
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn rule_of(&self, r: Dotted) -> &Rule<S> {
        &self.rules[r.rule_index()]
    }
}

impl<S: Symbol> GrammarView for Grammar<S> {
    type Sym = S;
    type Dotted = Dotted;

    fn alternatives(&self, symbol: &S) -> &[Dotted] {
        match self.predictions.get(symbol) {
            Some(alternatives) => alternatives.as_slice(),
            None => &[],
        }
    }

    fn postdot(&self, r: Dotted) -> Option<S> {
        self.rule_of(r).rhs.get(r.dot()).cloned()
    }

    fn lhs(&self, r: Dotted) -> S {
        self.rule_of(r).lhs.clone()
    }

    fn penult(&self, r: Dotted) -> Option<S> {
        let rhs = &self.rule_of(r).rhs;
        if rhs.len() >= 2 && r.dot() + 1 == rhs.len() {
            rhs.last().cloned()
        } else {
            None
        }
    }

    fn is_right_recursive(&self, r: Dotted) -> bool {
        self.right_recursive[r.rule_index()]
    }

    fn is_nulling(&self, symbol: &S) -> bool {
        self.nulling.contains(symbol)
    }

    fn display_dotted(&self, r: Dotted) -> String {
        let rule = self.rule_of(r);
        let mut out = String::from(rule.lhs.name());
        out.push_str(" ->");
        for (i, symbol) in rule.rhs.iter().enumerate() {
            if i == r.dot() {
                out.push_str(" .");
            }
            out.push(' ');
            out.push_str(symbol.name());
        }
        if r.is_complete() {
            out.push_str(" .");
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule #{index} has {len} right-hand-side symbols; at most {MAX_RHS} are supported")]
    RhsTooLong { index: usize, len: usize },

    #[error("grammar has {0} rules; at most {MAX_RULES} are supported")]
    TooManyRules(usize),
}

/// Builder for constructing grammars
pub struct GrammarBuilder<S> {
    rules: Vec<Rule<S>>,
}

impl<S: Symbol> Default for GrammarBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> GrammarBuilder<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add one alternative for `lhs`. Repeated calls with the same `lhs`
    /// accumulate alternatives in insertion order.
    #[must_use]
    pub fn rule<I>(mut self, lhs: S, rhs: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.rules.push(Rule {
            lhs,
            rhs: rhs.into_iter().collect(),
        });
        self
    }

    /// Build the grammar, running the static analysis the recognizer relies
    /// on (nulling symbols, right-recursion flags, prediction lists).
    ///
    /// # Errors
    ///
    /// Returns an error if a rule exceeds the packed cursor encoding limits.
    /// Grammars that derive nothing are valid; they recognize no input.
    pub fn build(self) -> Result<Grammar<S>, GrammarError> {
        if self.rules.len() > MAX_RULES {
            return Err(GrammarError::TooManyRules(self.rules.len()));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.rhs.len() > MAX_RHS {
                return Err(GrammarError::RhsTooLong {
                    index,
                    len: rule.rhs.len(),
                });
            }
        }

        let facts = analysis::analyze(&self.rules);

        let mut predictions: HashMap<S, SmallVec<[Dotted; 2]>, ahash::RandomState> =
            HashMap::default();
        for (index, rule) in self.rules.iter().enumerate() {
            // lengths were validated above, so the narrowing casts are exact
            let cursor = Dotted::new(index as u32, rule.rhs.len() as u16);
            predictions.entry(rule.lhs.clone()).or_default().push(cursor);
        }

        Ok(Grammar {
            rules: self.rules,
            predictions,
            nulling: facts.nulling,
            right_recursive: facts.right_recursive,
        })
    }
}
