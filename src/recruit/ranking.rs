// src/recruit/ranking.rs
use super::resolver::ResolvedMatch;

/// Resolved matches, worst first and best last. Equal scores keep the
/// order the combinations were generated in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankingSet {
    matches: Vec<ResolvedMatch>,
}

impl RankingSet {
    pub fn new(mut matches: Vec<ResolvedMatch>) -> Self {
        // stable
        matches.sort_by_key(|m| m.score);
        Self { matches }
    }

    /// Matches whose weakest operator is above `threshold`.
    pub fn beneficial(&self, threshold: u8) -> RankingSet {
        let matches = self
            .matches
            .iter()
            .filter(|m| m.min_rarity() > threshold)
            .cloned()
            .collect();
        Self { matches }
    }

    pub fn matches(&self) -> &[ResolvedMatch] {
        &self.matches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedMatch> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<'a> IntoIterator for &'a RankingSet {
    type Item = &'a ResolvedMatch;
    type IntoIter = std::slice::Iter<'a, ResolvedMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recruit::Operator;

    fn m(label: &str, score: i32, rarities: &[u8]) -> ResolvedMatch {
        let mut entities: Vec<Operator> = rarities
            .iter()
            .enumerate()
            .map(|(i, r)| Operator::new(format!("{label}{i}"), *r, &[]))
            .collect();
        entities.sort_by(|a, b| b.rarity.cmp(&a.rarity));
        ResolvedMatch { tags: strings![label], entities, score, label: s!(label) }
    }

    #[test]
    fn sort_is_ascending_and_stable() {
        let set = RankingSet::new(vec![m("a", -2, &[4]), m("b", -7, &[4, 2]), m("c", -2, &[4])]);
        let labels: Vec<_> = set.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }

    #[test]
    fn beneficial_keeps_only_high_floor_matches() {
        let set = RankingSet::new(vec![m("low", 0, &[2, 5]), m("high", 0, &[4, 5])]);
        let good = set.beneficial(3);
        assert_eq!(good.len(), 1);
        assert_eq!(good.matches()[0].label, "high");
        assert!(set.beneficial(5).is_empty());
    }
}
