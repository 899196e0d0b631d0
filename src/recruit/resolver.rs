// src/recruit/resolver.rs
use std::collections::BTreeSet;

use super::index::TagIndex;
use super::operator::Operator;
use super::score::PriorityWeights;
use crate::config::consts::{LABEL_DELIM, TOP_RARITY};

/// A tag combination together with the operators that satisfy all of it.
/// `entities` is never empty and runs from highest to lowest rarity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMatch {
    pub tags: Vec<String>,
    pub entities: Vec<Operator>,
    pub score: i32,
    pub label: String,
}

impl ResolvedMatch {
    /// Rarity of the weakest operator in the match.
    pub fn min_rarity(&self) -> u8 {
        self.entities.last().map(|o| o.rarity).unwrap_or(0)
    }
}

pub struct Resolver<'a> {
    index: &'a TagIndex,
    exempt_tag: &'a str,
    weights: &'a PriorityWeights,
}

impl<'a> Resolver<'a> {
    /// `exempt_tag` is the canonical tag whose presence lets top-rarity
    /// operators into a match.
    pub fn new(index: &'a TagIndex, exempt_tag: &'a str, weights: &'a PriorityWeights) -> Self {
        Self { index, exempt_tag, weights }
    }

    fn candidates(&self, tag: &str, include_top: bool) -> BTreeSet<usize> {
        let Some(set) = self.index.positions(tag) else { return BTreeSet::new() };
        set.iter()
            .copied()
            .filter(|&p| {
                include_top || self.index.operator(p).is_some_and(|o| o.rarity != TOP_RARITY)
            })
            .collect()
    }

    /// `None` when no operator carries every tag in `combo`.
    pub fn resolve(&self, combo: &[String], label_of: &dyn Fn(&str) -> String) -> Option<ResolvedMatch> {
        let (first, rest) = combo.split_first()?;
        let include_top = combo.iter().any(|t| t == self.exempt_tag);

        let mut hits = self.candidates(first, include_top);
        for tag in rest {
            if hits.is_empty() {
                break;
            }
            let next = self.candidates(tag, include_top);
            hits.retain(|p| next.contains(p));
        }
        if hits.is_empty() {
            return None;
        }

        let mut entities: Vec<Operator> = hits
            .into_iter()
            .filter_map(|p| self.index.operator(p).cloned())
            .collect();
        entities.sort_by(|a, b| b.rarity.cmp(&a.rarity).then_with(|| a.name.cmp(&b.name)));

        let label = combo.iter().map(|t| label_of(t.as_str())).collect::<Vec<_>>().join(LABEL_DELIM);
        let score = self.weights.score(&entities);

        Some(ResolvedMatch { tags: combo.to_vec(), entities, score, label })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TagIndex {
        TagIndex::build(
            vec![
                Operator::new("Alice", 4, &["healer", "ranged"]),
                Operator::new("Bob", 2, &["healer"]),
                Operator::new("Eve", 6, &["sniper", "top-operator", "ranged"]),
            ],
            &["healer", "ranged", "sniper", "top-operator"],
        )
    }

    fn plain(t: &str) -> String {
        s!(t)
    }

    #[test]
    fn intersection_sorted_by_rarity() {
        let idx = index();
        let w = PriorityWeights::default();
        let r = Resolver::new(&idx, "top-operator", &w);

        let m = r.resolve(&strings!["healer"], &plain).unwrap();
        let names: Vec<_> = m.entities.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(m.min_rarity(), 2);

        let m = r.resolve(&strings!["healer", "ranged"], &plain).unwrap();
        assert_eq!(m.entities.len(), 1);
        assert_eq!(m.label, "healer + ranged");
    }

    #[test]
    fn top_rarity_needs_the_exempt_tag() {
        let idx = index();
        let w = PriorityWeights::default();
        let r = Resolver::new(&idx, "top-operator", &w);

        assert!(r.resolve(&strings!["sniper"], &plain).is_none());
        let m = r.resolve(&strings!["sniper", "top-operator"], &plain).unwrap();
        assert_eq!(m.entities[0].name, "Eve");

        // exemption applies to every tag of the combo, not just the exempt one
        let m = r.resolve(&strings!["ranged", "top-operator"], &plain).unwrap();
        assert_eq!(m.entities.len(), 1);
        let m = r.resolve(&strings!["ranged"], &plain).unwrap();
        assert_eq!(m.entities[0].name, "Alice");
    }

    #[test]
    fn unknown_tag_resolves_to_nothing() {
        let idx = index();
        let w = PriorityWeights::default();
        let r = Resolver::new(&idx, "top-operator", &w);
        assert!(r.resolve(&strings!["healer", "ghost"], &plain).is_none());
        assert!(r.resolve(&[], &plain).is_none());
    }
}
