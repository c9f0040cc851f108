//! # Grammar Module
//!
//! Grammar definition and the collaborator contract consumed by the
//! recognizer.
//!
//! ## Overview
//!
//! The recognizer itself never inspects rules directly. Everything it needs
//! is expressed by [`GrammarView`]: per-symbol rule alternatives handed out
//! as dotted-rule cursors, the symbol after the dot, the left-hand side of a
//! cursor's rule, and the precomputed facts that drive Leo's right-recursion
//! optimization (penultimate transitions, right-recursion flags, nulling
//! symbols).
//!
//! [`Grammar`] is the concrete implementation of that contract: rules are
//! collected through [`GrammarBuilder`], and `build()` runs the static
//! analysis once so that every `GrammarView` query is a cheap lookup.
//!
//! ## Usage
//!
//! ```rust
//! use marlo::GrammarBuilder;
//!
//! // S -> a S | a
//! let grammar = GrammarBuilder::new()
//!     .rule("S", ["a", "S"])
//!     .rule("S", ["a"])
//!     .build()?;
//! # Ok::<(), marlo::GrammarError>(())
//! ```
//!
//! Symbols are user-supplied value types implementing [`Symbol`]. A single
//! type covers terminals and nonterminals; a symbol with no rules is a
//! terminal. The "no symbol" sentinel of the recognizer algorithm is an
//! explicit `Option`, never an in-band marker value.

mod analysis;
mod builder;

pub use builder::{Dotted, Grammar, GrammarBuilder, GrammarError};

use std::hash::Hash;

/// Trait for grammar symbol types.
///
/// One symbol type identifies both terminals and nonterminals; whether a
/// symbol is a nonterminal is decided by the grammar (it has alternatives).
pub trait Symbol: Clone + std::fmt::Debug + Eq + Hash + Send + Sync + 'static {
    /// Get the name of this symbol, used in chart dumps
    fn name(&self) -> &str;
}

/// String literals make convenient symbols for tests and small grammars.
impl Symbol for &'static str {
    fn name(&self) -> &str {
        self
    }
}

/// Trait for dotted-rule cursors.
///
/// A dotted rule is an opaque handle identifying a rule together with a dot
/// position on its right-hand side. Handles are plain values: cheap to copy,
/// compared and hashed by value.
pub trait DottedRule: Copy + Eq + Hash + std::fmt::Debug + Send + Sync + 'static {
    /// The same rule with the dot moved one position right
    #[must_use]
    fn advanced(self) -> Self;

    /// True iff the dot is past the last right-hand-side symbol
    fn is_complete(self) -> bool;
}

/// The grammar contract the recognizer consumes.
///
/// All operations are pure and may be called any number of times. Static
/// analysis (nullability, right recursion) is the implementor's job; the
/// recognizer only ever asks for the results.
pub trait GrammarView: Send + Sync {
    /// The grammar's symbol type
    type Sym: Symbol;

    /// The grammar's dotted-rule handle type
    type Dotted: DottedRule;

    /// Dot-0 cursors for each right-hand-side alternative of `symbol`.
    ///
    /// Empty for terminals and for symbols the grammar does not know.
    fn alternatives(&self, symbol: &Self::Sym) -> &[Self::Dotted];

    /// The symbol immediately after the dot, or `None` when `r` is complete
    fn postdot(&self, r: Self::Dotted) -> Option<Self::Sym>;

    /// The left-hand-side symbol of `r`'s rule
    fn lhs(&self, r: Self::Dotted) -> Self::Sym;

    /// The penultimate transition of `r`: the postdot symbol when the dot
    /// sits immediately before the final right-hand-side position of a rule
    /// with at least two right-hand-side symbols, `None` otherwise.
    fn penult(&self, r: Self::Dotted) -> Option<Self::Sym>;

    /// True iff `r`'s rule is right-recursive: its rightmost right-hand-side
    /// symbol derives, directly or transitively, a string ending in the
    /// rule's own left-hand side.
    fn is_right_recursive(&self, r: Self::Dotted) -> bool;

    /// True iff `symbol` derives the empty string and nothing else
    fn is_nulling(&self, symbol: &Self::Sym) -> bool;

    /// Render `r` for chart dumps
    fn display_dotted(&self, r: Self::Dotted) -> String;
}
