// src/recruit/operator.rs
use std::hash::{Hash, Hasher};

/// A recruitable operator as the tag feed describes it.
///
/// Identity is the name alone: two values with the same name compare equal
/// and hash the same regardless of rarity or tags. Catalog builders must
/// keep names unique.
#[derive(Clone, Debug)]
pub struct Operator {
    pub name: String,
    pub rarity: u8,
    pub tags: Vec<String>,
}

impl Operator {
    pub fn new(name: impl Into<String>, rarity: u8, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            rarity,
            tags: tags.iter().map(|t| s!(*t)).collect(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Operator {}

impl Hash for Operator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
