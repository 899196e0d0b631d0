// src/store.rs
// User tag shortcuts, persisted as `shortcut,canonical-tag` rows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::consts::STORE_SEP;
use crate::csv::{parse_rows, write_row};
use crate::recruit::vocab::{TagVocabulary, alias_key};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("'{0}' is not a usable shortcut")]
    InvalidShortcut(String),

    #[error("the tag '{0}' does not exist")]
    UnknownTag(String),

    #[error("'{0}' is a built-in tag alias and cannot be redefined")]
    ProtectedShortcut(String),

    #[error("there is no shortcut named '{0}'")]
    UnknownShortcut(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Replaced,
}

pub type Shortcut = (String, String);

pub struct ShortcutStore {
    path: PathBuf,
}

impl ShortcutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    /// A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<Shortcut>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        let mut out = Vec::new();
        for row in parse_rows(&text, STORE_SEP) {
            match row.as_slice() {
                [short, tag, ..] if !short.is_empty() && !tag.is_empty() => {
                    out.push((short.clone(), tag.clone()))
                }
                _ => log::warn!("ignoring malformed shortcut row {row:?} in {}", self.path.display()),
            }
        }
        Ok(out)
    }

    fn save(&self, entries: &[Shortcut]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let mut buf = Vec::new();
        for (short, tag) in entries {
            write_row(&mut buf, &[short.clone(), tag.clone()], STORE_SEP).map_err(|e| self.io_err(e))?;
        }
        fs::write(&self.path, buf).map_err(|e| self.io_err(e))
    }

    /// Point `shortcut` at the tag a built-in alias names. An existing
    /// shortcut is replaced in place.
    pub fn add(&self, vocab: &TagVocabulary, shortcut: &str, tag: &str) -> Result<AddOutcome, StoreError> {
        let key = alias_key(shortcut);
        if key.is_empty() || key.contains(STORE_SEP) {
            return Err(StoreError::InvalidShortcut(s!(shortcut)));
        }
        if vocab.is_builtin_alias(&key) {
            return Err(StoreError::ProtectedShortcut(key));
        }
        let def = vocab
            .lookup_builtin(tag)
            .ok_or_else(|| StoreError::UnknownTag(s!(tag)))?;

        let mut entries = self.load()?;
        let outcome = match entries.iter_mut().find(|(short, _)| *short == key) {
            Some(entry) => {
                entry.1 = s!(def.id);
                AddOutcome::Replaced
            }
            None => {
                entries.push((key.clone(), s!(def.id)));
                AddOutcome::Added
            }
        };
        self.save(&entries)?;
        log::info!("shortcut {key} -> {} ({outcome:?})", def.label);
        Ok(outcome)
    }

    /// Removes the named shortcuts. Any unknown name aborts before
    /// anything is written.
    pub fn delete(&self, names: &[String]) -> Result<Vec<Shortcut>, StoreError> {
        let entries = self.load()?;
        let keys: Vec<String> = names.iter().map(|n| alias_key(n)).collect();
        if let Some(missing) = keys.iter().find(|k| !entries.iter().any(|(short, _)| short == *k)) {
            return Err(StoreError::UnknownShortcut(missing.clone()));
        }

        let (removed, kept): (Vec<Shortcut>, Vec<Shortcut>) =
            entries.into_iter().partition(|(short, _)| keys.contains(short));
        self.save(&kept)?;
        log::info!("deleted {} shortcut(s)", removed.len());
        Ok(removed)
    }

    pub fn clear(&self) -> Result<usize, StoreError> {
        let count = self.load()?.len();
        self.save(&[])?;
        log::info!("deleted all {count} shortcut(s)");
        Ok(count)
    }
}

/// The named shortcuts, in store order; all of them when `names` is empty.
pub fn select(entries: &[Shortcut], names: &[String]) -> Result<Vec<Shortcut>, StoreError> {
    if names.is_empty() {
        return Ok(entries.to_vec());
    }
    let keys: Vec<String> = names.iter().map(|n| alias_key(n)).collect();
    if let Some(missing) = keys.iter().find(|k| !entries.iter().any(|(short, _)| short == *k)) {
        return Err(StoreError::UnknownShortcut(missing.clone()));
    }
    Ok(entries.iter().filter(|(short, _)| keys.contains(short)).cloned().collect())
}
