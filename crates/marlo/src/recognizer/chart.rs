//! Chart storage for the recognizer.
//!
//! Two parallel append-only arenas (Earley items and Leo items) plus a mark
//! vector recording where each earleme begins in both. Items are grouped by
//! the earleme they were added in; nothing is ever removed or mutated once
//! appended, and duplicate checks are linear scans over the current-earleme
//! slice, which stays small for the grammars this recognizer targets.

use crate::grammar::{DottedRule, Symbol};

/// An Earley item: a dotted rule paired with the earleme at which
/// recognition of that rule began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialParse<D> {
    /// What remains to be recognized
    pub expected: D,
    /// Earleme where recognition of this rule began
    pub start: usize,
}

impl<D: DottedRule> PartialParse<D> {
    #[must_use]
    pub fn new(expected: D, start: usize) -> Self {
        Self { expected, start }
    }

    /// The same item with the dot moved one position right
    #[must_use]
    pub fn advanced(self) -> Self {
        Self {
            expected: self.expected.advanced(),
            start: self.start,
        }
    }
}

/// A Leo memo: the single item to plant when a completion over `transition`
/// arrives at the earleme holding this memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeoItem<S, D> {
    pub transition: S,
    pub parse: PartialParse<D>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EarlemeMark {
    earley: usize,
    leo: usize,
}

/// The recognizer's working storage for a single parse
#[derive(Debug, Clone)]
pub struct Chart<S, D> {
    partial_parses: Vec<PartialParse<D>>,
    leo_items: Vec<LeoItem<S, D>>,
    earleme_start: Vec<EarlemeMark>,
}

impl<S: Symbol, D: DottedRule> Chart<S, D> {
    pub(crate) const fn new() -> Self {
        Self {
            partial_parses: Vec::new(),
            leo_items: Vec::new(),
            earleme_start: Vec::new(),
        }
    }

    /// Discard the previous parse, keeping allocations, and reserve room
    /// proportional to the coming input.
    pub(crate) fn reset(&mut self, input_len: usize) {
        self.partial_parses.clear();
        self.leo_items.clear();
        self.earleme_start.clear();
        self.earleme_start.reserve(input_len + 1);
        self.partial_parses.reserve(input_len + 1);
    }

    /// Record the boundary of a new earleme at the current arena ends
    pub(crate) fn open_earleme(&mut self) {
        self.earleme_start.push(EarlemeMark {
            earley: self.partial_parses.len(),
            leo: self.leo_items.len(),
        });
    }

    /// Number of earlemes opened so far
    #[must_use]
    pub fn earleme_count(&self) -> usize {
        self.earleme_start.len()
    }

    pub(crate) fn current_earleme(&self) -> usize {
        self.earleme_start.len() - 1
    }

    pub(crate) fn earley_lo(&self, earleme: usize) -> usize {
        self.earleme_start[earleme].earley
    }

    /// One past the last Earley index of `earleme`; moves while the earleme
    /// is still the current one, so callers that may insert must re-read it.
    pub(crate) fn earley_hi(&self, earleme: usize) -> usize {
        self.earleme_start
            .get(earleme + 1)
            .map_or(self.partial_parses.len(), |mark| mark.earley)
    }

    pub(crate) fn earley_len(&self) -> usize {
        self.partial_parses.len()
    }

    pub(crate) fn earley_at(&self, index: usize) -> PartialParse<D> {
        self.partial_parses[index]
    }

    /// Earley items recorded in `earleme`, in insertion order
    #[must_use]
    pub fn earley_items(&self, earleme: usize) -> &[PartialParse<D>] {
        &self.partial_parses[self.earley_lo(earleme)..self.earley_hi(earleme)]
    }

    /// Leo items recorded in `earleme`, in insertion order
    #[must_use]
    pub fn leo_items(&self, earleme: usize) -> &[LeoItem<S, D>] {
        let lo = self.earleme_start[earleme].leo;
        let hi = self
            .earleme_start
            .get(earleme + 1)
            .map_or(self.leo_items.len(), |mark| mark.leo);
        &self.leo_items[lo..hi]
    }

    /// Total number of Earley items across all earlemes
    #[must_use]
    pub fn earley_item_count(&self) -> usize {
        self.partial_parses.len()
    }

    /// Total number of Leo items across all earlemes
    #[must_use]
    pub fn leo_item_count(&self) -> usize {
        self.leo_items.len()
    }

    /// Append `parse` to the current earleme unless it is already there
    pub(crate) fn insert_earley(&mut self, parse: PartialParse<D>) {
        let lo = self.earleme_start.last().map_or(0, |mark| mark.earley);
        if !self.partial_parses[lo..].contains(&parse) {
            self.partial_parses.push(parse);
        }
    }

    /// Append a Leo memo to the current earleme unless its transition is
    /// already taken. A duplicate must agree on the memoized parse; a
    /// disagreement indicates a bug in the grammar collaborator.
    pub(crate) fn insert_leo(&mut self, item: LeoItem<S, D>) {
        let lo = self.earleme_start.last().map_or(0, |mark| mark.leo);
        if let Some(existing) = self.leo_items[lo..]
            .iter()
            .find(|leo| leo.transition == item.transition)
        {
            debug_assert_eq!(
                existing.parse, item.parse,
                "Leo memos for one transition symbol must agree"
            );
            return;
        }
        self.leo_items.push(item);
    }

    /// The memoized parse of the Leo item at `earleme` for `transition`,
    /// if one was recorded
    pub(crate) fn leo_parse(&self, earleme: usize, transition: &S) -> Option<PartialParse<D>> {
        self.leo_items(earleme)
            .iter()
            .find(|leo| leo.transition == *transition)
            .map(|leo| leo.parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Dotted;

    fn chart() -> Chart<&'static str, Dotted> {
        let mut chart = Chart::new();
        chart.reset(4);
        chart.open_earleme();
        chart
    }

    #[test]
    fn earley_insertion_dedups_within_an_earleme() {
        let mut chart = chart();
        let parse = PartialParse::new(Dotted::new(0, 2), 0);

        chart.insert_earley(parse);
        chart.insert_earley(parse);
        assert_eq!(chart.earley_items(0), &[parse]);

        // the same value is a fresh item in a fresh earleme
        chart.open_earleme();
        chart.insert_earley(parse);
        assert_eq!(chart.earley_item_count(), 2);
        assert_eq!(chart.earley_items(1), &[parse]);
    }

    #[test]
    fn leo_insertion_is_unique_per_transition() {
        let mut chart = chart();
        let parse = PartialParse::new(Dotted::new(0, 2), 0);

        chart.insert_leo(LeoItem {
            transition: "S",
            parse,
        });
        chart.insert_leo(LeoItem {
            transition: "S",
            parse,
        });
        chart.insert_leo(LeoItem {
            transition: "T",
            parse,
        });

        assert_eq!(chart.leo_items(0).len(), 2);
        assert_eq!(chart.leo_parse(0, &"S"), Some(parse));
        assert_eq!(chart.leo_parse(0, &"U"), None);
    }

    #[test]
    fn leo_lookups_are_scoped_to_their_earleme() {
        let mut chart = chart();
        let first = PartialParse::new(Dotted::new(0, 2), 0);
        let second = PartialParse::new(Dotted::new(1, 1), 1);

        chart.insert_leo(LeoItem {
            transition: "S",
            parse: first,
        });
        chart.open_earleme();
        chart.insert_leo(LeoItem {
            transition: "S",
            parse: second,
        });

        assert_eq!(chart.leo_parse(0, &"S"), Some(first));
        assert_eq!(chart.leo_parse(1, &"S"), Some(second));
    }

    #[test]
    fn reset_clears_all_state() {
        let mut chart = chart();
        chart.insert_earley(PartialParse::new(Dotted::new(0, 2), 0));
        chart.reset(0);

        assert_eq!(chart.earleme_count(), 0);
        assert_eq!(chart.earley_item_count(), 0);
        assert_eq!(chart.leo_item_count(), 0);
    }
}
