//! # Marlo
//!
//! A general context-free recognizer in the MARPA family: Earley recognition
//! augmented with Leo's right-recursion optimization.
//!
//! ## Overview
//!
//! Given a context-free grammar and a finite sequence of input symbols,
//! [`Recognizer::recognize`] decides whether the sequence is derivable from
//! a designated start symbol. Any context-free grammar is handled —
//! ambiguous, left-recursive, nulling — within Earley's classic bounds, and
//! right-recursive grammars run in linear time: completions that would chain
//! through a whole right spine are collapsed into single memo lookups (Leo
//! items).
//!
//! This crate is a recognizer, not a parser: the outcome is accept/reject
//! plus an inspectable chart. Parse-tree extraction, tokenization, and error
//! recovery are out of scope.
//!
//! ## Quick Start
//!
//! ```rust
//! use marlo::{GrammarBuilder, Recognizer};
//!
//! // S -> a S | a, i.e. one or more `a`s
//! let grammar = GrammarBuilder::new()
//!     .rule("S", ["a", "S"])
//!     .rule("S", ["a"])
//!     .build()?;
//!
//! let mut recognizer = Recognizer::new(&grammar);
//! assert!(recognizer.recognize(&["a", "a", "a"], "S"));
//! assert!(!recognizer.recognize(&["a", "b"], "S"));
//!
//! // the chart remains available for inspection: the second token of the
//! // rejected input never opened a third earleme
//! assert_eq!(recognizer.chart().earleme_count(), 2);
//! # Ok::<(), marlo::GrammarError>(())
//! ```
//!
//! Symbols can be any type implementing [`Symbol`]; `&'static str` works out
//! of the box. Whatever has rules is a nonterminal, everything else is a
//! terminal.
//!
//! ## Modules
//!
//! - [`grammar`] - Grammar definition, builder, and the collaborator
//!   contract ([`GrammarView`]) the recognizer consumes
//! - [`recognizer`] - The chart-based Earley/Leo recognizer

pub mod grammar;
pub mod recognizer;

pub use grammar::{Dotted, DottedRule, Grammar, GrammarBuilder, GrammarError, GrammarView, Symbol};
pub use recognizer::{Chart, LeoItem, PartialParse, Recognizer};
