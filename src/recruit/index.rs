// src/recruit/index.rs
use std::collections::{BTreeSet, HashMap, HashSet};

use super::operator::Operator;

/// Inverted index: recognized tag → operators carrying it.
///
/// Operators are held once in `catalog`; sets store their positions so
/// intersections are cheap and iterate in catalog order.
#[derive(Debug, Default)]
pub struct TagIndex {
    catalog: Vec<Operator>,
    by_tag: HashMap<String, BTreeSet<usize>>,
}

impl TagIndex {
    /// Every recognized tag gets an entry, empty when nobody carries it.
    /// Tags outside `recognized` are ignored. A repeated name keeps the
    /// first operator seen.
    pub fn build<S: AsRef<str>>(catalog: Vec<Operator>, recognized: &[S]) -> Self {
        let mut by_tag: HashMap<String, BTreeSet<usize>> = recognized
            .iter()
            .map(|t| (s!(t.as_ref()), BTreeSet::new()))
            .collect();

        let mut seen = HashSet::new();
        let catalog: Vec<Operator> = catalog.into_iter().filter(|op| seen.insert(op.name.clone())).collect();

        for (pos, op) in catalog.iter().enumerate() {
            for tag in &op.tags {
                if let Some(set) = by_tag.get_mut(tag) {
                    set.insert(pos);
                }
            }
        }

        log::debug!("indexed {} operators under {} tags", catalog.len(), by_tag.len());
        Self { catalog, by_tag }
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Positions of the operators carrying `tag`; `None` for a tag the index
    /// was not built with.
    pub fn positions(&self, tag: &str) -> Option<&BTreeSet<usize>> {
        self.by_tag.get(tag)
    }

    pub fn operator(&self, pos: usize) -> Option<&Operator> {
        self.catalog.get(pos)
    }

    pub fn catalog(&self) -> &[Operator] {
        &self.catalog
    }
}
