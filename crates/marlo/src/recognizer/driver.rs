//! The recognizer main loop: prediction, reduction, Leo scheduling, and
//! scanning, advancing earleme by earleme.

use crate::grammar::{DottedRule, GrammarView};
use crate::recognizer::chart::{Chart, LeoItem, PartialParse};

/// Run one full recognition over `source`, leaving the chart populated for
/// inspection. Returns true iff the whole input derives from `start`.
pub(crate) fn recognize<G: GrammarView>(
    grammar: &G,
    chart: &mut Chart<G::Sym, G::Dotted>,
    source: &[G::Sym],
    start: &G::Sym,
) -> bool {
    chart.reset(source.len());
    chart.open_earleme();
    for &alternative in grammar.alternatives(start) {
        chart.insert_earley(PartialParse::new(alternative, 0));
    }

    let mut scanned = 0;
    let mut earleme = 0;
    while earleme < chart.earleme_count() {
        let mut index = chart.earley_lo(earleme);
        // prediction and reduction append to the earleme being walked, so
        // the upper bound is re-read on every step
        while index < chart.earley_len() {
            let parse = chart.earley_at(index);
            match grammar.postdot(parse.expected) {
                Some(symbol) => predict(grammar, chart, parse, &symbol),
                None => reduce(grammar, chart, parse),
            }
            add_any_leo_item(grammar, chart, parse);
            index += 1;
        }
        if scanned < source.len() {
            scan(grammar, chart, &source[scanned]);
            scanned += 1;
        }
        earleme += 1;
    }

    is_accepted(grammar, chart, source.len(), start)
}

/// Accepted iff every token opened a new earleme and the final earleme holds
/// a completed start rule spanning the whole input.
fn is_accepted<G: GrammarView>(
    grammar: &G,
    chart: &Chart<G::Sym, G::Dotted>,
    input_len: usize,
    start: &G::Sym,
) -> bool {
    if chart.earleme_count() != input_len + 1 {
        return false;
    }
    chart
        .earley_items(chart.current_earleme())
        .iter()
        .any(|parse| {
            parse.start == 0
                && parse.expected.is_complete()
                && grammar.lhs(parse.expected) == *start
        })
}

/// Seed the current earleme with every alternative of the expected symbol.
/// A nulling symbol is vacuously recognized: the predicting item also steps
/// over it in place.
fn predict<G: GrammarView>(
    grammar: &G,
    chart: &mut Chart<G::Sym, G::Dotted>,
    parse: PartialParse<G::Dotted>,
    symbol: &G::Sym,
) {
    let here = chart.current_earleme();
    for &alternative in grammar.alternatives(symbol) {
        chart.insert_earley(PartialParse::new(alternative, here));
    }
    if grammar.is_nulling(symbol) {
        chart.insert_earley(parse.advanced());
    }
}

/// Complete `parse` back into its origin earleme: through the Leo memo when
/// one was recorded there, otherwise by the ordinary Earley reduction.
fn reduce<G: GrammarView>(
    grammar: &G,
    chart: &mut Chart<G::Sym, G::Dotted>,
    parse: PartialParse<G::Dotted>,
) {
    let lhs = grammar.lhs(parse.expected);
    match chart.leo_parse(parse.start, &lhs) {
        Some(memo) => chart.insert_earley(memo),
        None => earley_reduce(grammar, chart, parse.start, &lhs),
    }
}

/// Advance every item at `origin` that was waiting for `lhs`.
fn earley_reduce<G: GrammarView>(
    grammar: &G,
    chart: &mut Chart<G::Sym, G::Dotted>,
    origin: usize,
    lhs: &G::Sym,
) {
    let mut index = chart.earley_lo(origin);
    // when `origin` is the current earleme, insertions move the bound
    while index < chart.earley_hi(origin) {
        let waiting = chart.earley_at(index);
        if grammar.postdot(waiting.expected).as_ref() == Some(lhs) {
            chart.insert_earley(waiting.advanced());
        }
        index += 1;
    }
}

/// Advance every current-earleme item expecting `token` into a new earleme.
/// The new earleme is opened on the first match only; with no match the
/// chart is left as-is and the main loop runs out.
fn scan<G: GrammarView>(grammar: &G, chart: &mut Chart<G::Sym, G::Dotted>, token: &G::Sym) {
    let lo = chart.earley_lo(chart.current_earleme());
    let hi = chart.earley_len();
    let mut opened = false;
    for index in lo..hi {
        let parse = chart.earley_at(index);
        if grammar.postdot(parse.expected).as_ref() == Some(token) {
            if !opened {
                chart.open_earleme();
                opened = true;
            }
            chart.insert_earley(parse.advanced());
        }
    }
}

/// Record a Leo memo for `parse` when it sits, uniquely, at the penultimate
/// transition of a right-recursive rule. Chaining through the predecessor
/// memo at the item's origin is what keeps right-recursive completion chains
/// at amortized constant cost.
fn add_any_leo_item<G: GrammarView>(
    grammar: &G,
    chart: &mut Chart<G::Sym, G::Dotted>,
    parse: PartialParse<G::Dotted>,
) {
    let Some(transition) = grammar.penult(parse.expected) else {
        return;
    };
    if !grammar.is_right_recursive(parse.expected) {
        return;
    }
    if !is_unique_penult(grammar, chart, &transition) {
        return;
    }

    let lhs = grammar.lhs(parse.expected);
    let memo = match chart.leo_parse(parse.start, &lhs) {
        Some(predecessor) => predecessor,
        None => parse.advanced(),
    };
    chart.insert_leo(LeoItem {
        transition,
        parse: memo,
    });
}

/// Snapshot test: exactly one item in the current earleme sits at this
/// penultimate transition right now.
fn is_unique_penult<G: GrammarView>(
    grammar: &G,
    chart: &Chart<G::Sym, G::Dotted>,
    transition: &G::Sym,
) -> bool {
    let mut seen = 0;
    for parse in chart.earley_items(chart.current_earleme()) {
        if grammar.penult(parse.expected).as_ref() == Some(transition) {
            seen += 1;
            if seen > 1 {
                return false;
            }
        }
    }
    seen == 1
}
