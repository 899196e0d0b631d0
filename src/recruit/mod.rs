// src/recruit/mod.rs
//! Recruitment tag combinations.
//!
//! Given the tags the recruitment screen offered, find every 1..=3 tag
//! subset that some operator satisfies, score each by the rarities it can
//! yield, and rank them worst first.
//!
//! ```text
//! feed → Operator catalog → TagIndex
//!                              ↘
//! user tags → normalize → combinations → Resolver → RankingSet
//! ```
//!
//! Rarity-6 operators only appear in a match whose combination contains the
//! exempt tag (Top Operator by default). Nothing here prints; `format`
//! renders a `RankingSet`.

pub mod combos;
pub mod error;
pub mod index;
pub mod operator;
pub mod ranking;
pub mod resolver;
pub mod score;
pub mod vocab;

pub use error::RecruitError;
pub use index::TagIndex;
pub use operator::Operator;
pub use ranking::RankingSet;
pub use resolver::{ResolvedMatch, Resolver};
pub use score::PriorityWeights;
pub use vocab::TagVocabulary;

use crate::config::Context;
use crate::config::consts::MAX_COMBO_LEN;
use crate::core::net::Fetch;
use crate::progress::Progress;
use crate::specs::recruitment;

/// Canonical ids for the user's tags, duplicates collapsed to their first
/// appearance. The first tag that fails to normalize aborts the lot.
pub fn normalize_tags(vocab: &TagVocabulary, raw: &[String]) -> Result<Vec<String>, RecruitError> {
    let tags = raw
        .iter()
        .map(|t| vocab.normalize(t).ok_or_else(|| RecruitError::UnknownTag(t.to_lowercase())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(combos::dedup_in_order(tags))
}

/// Resolve and rank every combination of `tags` against a built index.
pub fn rank(
    index: &TagIndex,
    tags: &[String],
    exempt_tag: &str,
    weights: &PriorityWeights,
    label_of: &dyn Fn(&str) -> String,
) -> RankingSet {
    for tag in tags.iter().filter(|t| !index.contains_tag(t)) {
        log::debug!("tag {tag} is not indexed; combinations with it match nothing");
    }
    let resolver = Resolver::new(index, exempt_tag, weights);
    let combos = combos::combinations(tags, MAX_COMBO_LEN);
    let matches: Vec<ResolvedMatch> = combos.iter().filter_map(|c| resolver.resolve(c, label_of)).collect();
    log::debug!(
        "{} of {} combinations matched over {} operators",
        matches.len(),
        combos.len(),
        index.catalog().len()
    );
    RankingSet::new(matches)
}

/// Full pipeline behind `ark recruit`: normalize, fetch the feed, index,
/// rank. Tags are checked before anything is fetched.
pub fn resolve(
    ctx: &Context,
    fetcher: &dyn Fetch,
    raw_tags: &[String],
    progress: &mut dyn Progress,
) -> Result<RankingSet, RecruitError> {
    let tags = normalize_tags(&ctx.vocab, raw_tags)?;
    let weights = ctx.config.recruit.weights()?;
    let exempt_tag = ctx.config.recruit.exempt_tag(&ctx.vocab)?;

    progress.begin("Fetching...");
    let catalog = match recruitment::fetch_catalog(fetcher, &ctx.config) {
        Ok(c) => c,
        Err(e) => {
            progress.fail("Failed.");
            return Err(e.into());
        }
    };

    progress.begin("Calculating...");
    let index = TagIndex::build(catalog, &ctx.vocab.recognized_tags());
    let label_of = |t: &str| ctx.vocab.to_display_label(t);
    let ranked = rank(&index, &tags, &exempt_tag, &weights, &label_of);
    progress.succeed("Success!");
    Ok(ranked)
}
