// tests/resolver_properties.rs
//
// Properties of the tag resolver over generated catalogs.
//
use proptest::prelude::*;

use ark_scrape::recruit::{self, Operator, PriorityWeights, RankingSet, TagIndex};

const POOL: [&str; 6] = ["top", "sniper", "healing", "dps", "slow", "robot"];
const EXEMPT: &str = "top";

fn operator() -> impl Strategy<Value = Operator> {
    ("[A-Z][a-z]{2,6}", 1u8..=6, proptest::sample::subsequence(POOL.to_vec(), 0..=3))
        .prop_map(|(name, rarity, tags)| Operator::new(name, rarity, &tags))
}

fn input_tags() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(POOL.to_vec(), 1..=5)
        .prop_shuffle()
        .prop_map(|v| v.into_iter().map(String::from).collect())
}

fn ranked(catalog: Vec<Operator>, input: &[String]) -> RankingSet {
    let index = TagIndex::build(catalog, &POOL);
    recruit::rank(&index, input, EXEMPT, &PriorityWeights::default(), &|t: &str| t.to_uppercase())
}

proptest! {
    #[test]
    fn ranking_is_deterministic(catalog in prop::collection::vec(operator(), 0..20), input in input_tags()) {
        prop_assert_eq!(ranked(catalog.clone(), &input), ranked(catalog, &input));
    }

    #[test]
    fn matches_are_sound(catalog in prop::collection::vec(operator(), 0..20), input in input_tags()) {
        let weights = PriorityWeights::default();
        let set = ranked(catalog, &input);

        for m in &set {
            prop_assert!(!m.entities.is_empty());
            prop_assert!((1..=3).contains(&m.tags.len()));
            prop_assert!(m.entities.iter().all(|o| m.tags.iter().all(|t| o.has_tag(t))));

            let exempt = m.tags.iter().any(|t| t == EXEMPT);
            prop_assert!(exempt || m.entities.iter().all(|o| o.rarity != 6));

            let label: Vec<String> = m.tags.iter().map(|t| t.to_uppercase()).collect();
            prop_assert_eq!(&m.label, &label.join(" + "));

            let expected = weights.score(&m.entities);
            prop_assert_eq!(m.score, expected);

            prop_assert!(m.entities.windows(2).all(|w| w[0].rarity >= w[1].rarity));
        }
        prop_assert!(set.matches().windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn exempt_tag_admits_top_rarity(input in input_tags()) {
        prop_assume!(input.iter().any(|t| t == EXEMPT));
        let catalog = vec![Operator::new("Crown", 6, &POOL)];
        let set = ranked(catalog, &input);

        let exempt_combos = set.iter().filter(|m| m.tags.iter().any(|t| t == EXEMPT)).count();
        prop_assert!(exempt_combos > 0);
        prop_assert_eq!(exempt_combos, set.len());
    }

    #[test]
    fn beneficial_filter_narrows_as_threshold_rises(
        catalog in prop::collection::vec(operator(), 0..20),
        input in input_tags(),
        threshold in 1u8..6,
    ) {
        let set = ranked(catalog, &input);
        let lower = set.beneficial(threshold);
        let higher = set.beneficial(threshold + 1);

        prop_assert!(higher.len() <= lower.len());
        prop_assert!(lower.iter().all(|m| m.min_rarity() > threshold));
        prop_assert!(lower.iter().all(|m| set.matches().contains(m)));
    }
}
