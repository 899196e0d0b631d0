// src/config/options.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::consts::*;
use crate::operator::Section;
use crate::recruit::{PriorityWeights, TagVocabulary};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid weight table entry '{0}': keys must be rarities 1-6")]
    InvalidWeight(String),

    #[error("exempt_alias '{0}' does not name a recruitment tag")]
    InvalidExemptAlias(String),
}

/// Everything a single invocation needs to know, read once up front.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sources: Sources,
    pub recruit: RecruitConfig,
    pub operator: OperatorConfig,
    pub store: StoreConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Sources {
    pub recruitment: String,
    pub character_table: String,
    pub skill_table: String,
    pub building_data: String,
    pub gamepress: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            recruitment: s!(RECRUITMENT_URL),
            character_table: s!(CHARACTER_TABLE_URL),
            skill_table: s!(SKILL_TABLE_URL),
            building_data: s!(BUILDING_DATA_URL),
            gamepress: s!(GAMEPRESS_URL),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecruitConfig {
    /// Rarity → weight, keyed by the rarity as a string ("1".."6") since
    /// TOML table keys are strings.
    pub weights: BTreeMap<String, i32>,
    pub exempt_alias: String,
    pub beneficial_threshold: u8,
    /// Feed name → display name.
    pub name_replacements: BTreeMap<String, String>,
}

impl Default for RecruitConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.iter().map(|(r, w)| (r.to_string(), *w)).collect(),
            exempt_alias: s!(EXEMPT_ALIAS),
            beneficial_threshold: BENEFICIAL_THRESHOLD,
            name_replacements: BTreeMap::new(),
        }
    }
}

impl RecruitConfig {
    pub fn weights(&self) -> Result<PriorityWeights, ConfigError> {
        let mut pairs = Vec::with_capacity(self.weights.len());
        for (key, weight) in &self.weights {
            let rarity: u8 = key
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidWeight(key.clone()))?;
            if !(1..=TOP_RARITY).contains(&rarity) {
                return Err(ConfigError::InvalidWeight(key.clone()));
            }
            pairs.push((rarity, *weight));
        }
        Ok(PriorityWeights::new(pairs))
    }

    /// Canonical id of the tag that lets top-rarity operators into a match.
    pub fn exempt_tag(&self, vocab: &TagVocabulary) -> Result<String, ConfigError> {
        vocab
            .normalize(&self.exempt_alias)
            .ok_or_else(|| ConfigError::InvalidExemptAlias(self.exempt_alias.clone()))
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OperatorConfig {
    /// Title-cased user input → name as spelled in the character table.
    pub name_replacements: BTreeMap<String, String>,
    /// User slug → Gamepress URL slug.
    pub slug_replacements: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { dir: s!(STORE_DIR) }
    }
}

impl StoreConfig {
    pub fn shortcuts_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(SHORTCUTS_FILE)
    }
}

impl Config {
    /// Explicit path must exist; otherwise `ark.toml` is used when present,
    /// falling back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(text)?;
        cfg.recruit.weights()?;
        // shortcuts aren't loaded yet; built-in aliases only
        cfg.recruit.exempt_tag(&TagVocabulary::builtin())?;
        Ok(cfg)
    }
}

/* ---------- per-command options ---------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecruitOptions {
    pub tags: Vec<String>,
    pub beneficial: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorOptions {
    pub names: Vec<String>,
    pub sections: Vec<Section>,
    pub force_gamepress: bool,
}
