// src/config/state.rs
use super::options::Config;
use crate::recruit::vocab::TagVocabulary;
use crate::store::{ShortcutStore, StoreError};

/// Per-invocation state: the loaded config and the tag vocabulary with the
/// user's shortcuts folded in. Built once by the CLI and passed down.
#[derive(Clone, Debug, Default)]
pub struct Context {
    pub config: Config,
    pub vocab: TagVocabulary,
}

impl Context {
    pub fn new(config: Config, vocab: TagVocabulary) -> Self {
        Self { config, vocab }
    }

    /// Reads shortcuts from the configured store directory.
    pub fn load(config: Config) -> Result<Self, StoreError> {
        let shortcuts = ShortcutStore::new(config.store.shortcuts_path()).load()?;
        Ok(Self::new(config, TagVocabulary::with_shortcuts(shortcuts)))
    }

    pub fn shortcut_store(&self) -> ShortcutStore {
        ShortcutStore::new(self.config.store.shortcuts_path())
    }
}
