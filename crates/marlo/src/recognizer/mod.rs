//! # Recognizer Module
//!
//! The Earley/Leo recognizer over a [`GrammarView`].
//!
//! A [`Recognizer`] borrows an immutable grammar for its lifetime and owns
//! the chart for one recognition at a time. Chart state is rebuilt from
//! scratch on every [`Recognizer::recognize`] call (allocations are
//! retained), so one value can serve any number of inputs.
//!
//! ```rust
//! use marlo::{GrammarBuilder, Recognizer};
//!
//! let grammar = GrammarBuilder::new()
//!     .rule("S", ["a", "S"])
//!     .rule("S", ["a"])
//!     .build()?;
//!
//! let mut recognizer = Recognizer::new(&grammar);
//! assert!(recognizer.recognize(&["a", "a"], "S"));
//! assert!(!recognizer.recognize(&[], "S"));
//! # Ok::<(), marlo::GrammarError>(())
//! ```

mod chart;
mod driver;

pub use chart::{Chart, LeoItem, PartialParse};

use crate::grammar::{GrammarView, Symbol};
use std::fmt::Write as _;

/// Chart-based recognizer deciding whether an input sequence derives from a
/// start symbol.
pub struct Recognizer<'g, G: GrammarView> {
    grammar: &'g G,
    chart: Chart<G::Sym, G::Dotted>,
}

impl<'g, G: GrammarView> Recognizer<'g, G> {
    #[must_use]
    pub fn new(grammar: &'g G) -> Self {
        Self {
            grammar,
            chart: Chart::new(),
        }
    }

    /// True iff the entire `source` is a derivation of `start`.
    ///
    /// Rejection is an ordinary outcome, not an error; inputs the grammar
    /// cannot derive (including inputs mentioning unknown symbols) simply
    /// return false.
    pub fn recognize(&mut self, source: &[G::Sym], start: G::Sym) -> bool {
        driver::recognize(self.grammar, &mut self.chart, source, &start)
    }

    /// The chart left behind by the most recent [`recognize`](Self::recognize) call
    #[must_use]
    pub fn chart(&self) -> &Chart<G::Sym, G::Dotted> {
        &self.chart
    }

    /// Textual description of the current chart for debugging: per earleme,
    /// Leo items first, then Earley items, each in insertion order.
    #[must_use]
    pub fn dump_chart(&self) -> String {
        let mut out = String::new();
        for earleme in 0..self.chart.earleme_count() {
            let _ = writeln!(out, "earleme {earleme}:");
            for leo in self.chart.leo_items(earleme) {
                let _ = writeln!(
                    out,
                    "  Leo {}: {} ({})",
                    leo.transition.name(),
                    self.grammar.display_dotted(leo.parse.expected),
                    leo.parse.start
                );
            }
            for parse in self.chart.earley_items(earleme) {
                let _ = writeln!(
                    out,
                    "  {} ({})",
                    self.grammar.display_dotted(parse.expected),
                    parse.start
                );
            }
        }
        out
    }
}
