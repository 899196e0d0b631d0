// src/recruit/score.rs
use std::collections::BTreeMap;

use super::operator::Operator;
use crate::config::consts::{DEFAULT_WEIGHTS, SIZE_PENALTY};

/// Rarity → weight. A rarity missing from the table weighs 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriorityWeights {
    table: BTreeMap<u8, i32>,
}

impl PriorityWeights {
    pub fn new(pairs: impl IntoIterator<Item = (u8, i32)>) -> Self {
        Self { table: pairs.into_iter().collect() }
    }

    pub fn weight(&self, rarity: u8) -> i32 {
        self.table.get(&rarity).copied().unwrap_or(0)
    }

    /// Sum of rarity weights minus a flat penalty per operator, so wide
    /// matches sink below tight ones.
    pub fn score(&self, ops: &[Operator]) -> i32 {
        let total: i32 = ops.iter().map(|o| self.weight(o.rarity)).sum();
        total - SIZE_PENALTY * ops.len() as i32
    }
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHTS)
    }
}
