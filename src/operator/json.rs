// src/operator/json.rs
use super::error::DetailError;
use super::model::{BaseSkill, OperatorProfile, Skill, Stats, Talent};
use super::{DetailProvider, SourceKind};
use crate::config::Config;
use crate::config::options::Sources;
use crate::core::net::{Fetch, FetchError};
use crate::core::sanitize::title_case;
use crate::specs::character_table::{self as table, CharacterRecord};

/// Details from the game-data tables. The character table is read up
/// front; skill and building tables only when those sections are asked for.
pub struct JsonProvider<'a> {
    fetcher: &'a dyn Fetch,
    sources: &'a Sources,
    key: String,
    record: CharacterRecord,
}

impl<'a> JsonProvider<'a> {
    /// `Ok(None)` when the table loads but has no such operator.
    pub fn find(fetcher: &'a dyn Fetch, config: &'a Config, name: &str) -> Result<Option<Self>, FetchError> {
        let wanted = title_case(name);
        let proper = config.operator.name_replacements.get(&wanted).cloned().unwrap_or(wanted);

        let mut characters = table::fetch_characters(fetcher, &config.sources.character_table)?;
        let Some(key) = table::find_character(&characters, &proper).map(|(k, _)| s!(k)) else {
            log::info!("{proper} not in character table");
            return Ok(None);
        };
        let Some(record) = characters.remove(&key) else { return Ok(None) };

        log::debug!("{proper} -> {key}");
        Ok(Some(Self { fetcher, sources: &config.sources, key, record }))
    }
}

impl DetailProvider for JsonProvider<'_> {
    fn source(&self) -> SourceKind {
        SourceKind::Json
    }

    fn profile(&self) -> OperatorProfile {
        table::profile(&self.record)
    }

    fn stats(&self) -> Option<Stats> {
        table::stats(&self.record)
    }

    fn talents(&self) -> Vec<Talent> {
        table::talents(&self.record)
    }

    fn skills(&self, tiers: &[u8]) -> Result<Vec<Skill>, DetailError> {
        let skill_table = table::fetch_skills(self.fetcher, &self.sources.skill_table)?;
        Ok(table::skills(&self.record, &skill_table, tiers))
    }

    fn base_skills(&self) -> Result<Vec<BaseSkill>, DetailError> {
        let building = table::fetch_building(self.fetcher, &self.sources.building_data)?;
        Ok(table::base_skills(&building, &self.key).unwrap_or_default())
    }
}
