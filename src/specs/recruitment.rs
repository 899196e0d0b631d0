// src/specs/recruitment.rs
//! Spec for the recruitment tag feed.
//!
//! The feed is a JSON array, one record per operator:
//! `{ "name_en": "Texas", "level": 5, "tags": ["支援", "费用回复"], "type": "先锋 ", "hidden": false }`.
//! `type` is the class and counts as a tag; it sometimes carries trailing
//! whitespace. Records flagged `hidden` or `globalHidden` are not obtainable
//! through recruitment on the global server and are skipped.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::config::Config;
use crate::config::consts::TOP_RARITY;
use crate::core::net::{self, Fetch, FetchError};
use crate::recruit::Operator;

#[derive(Debug, Deserialize)]
pub struct RecruitRecord {
    pub name_en: String,
    pub level: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type", default)]
    pub class: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(rename = "globalHidden", default)]
    pub global_hidden: bool,
}

pub fn fetch_catalog(fetcher: &dyn Fetch, config: &Config) -> Result<Vec<Operator>, FetchError> {
    let records: Vec<RecruitRecord> = net::get_json(fetcher, &config.sources.recruitment)?;
    Ok(parse_catalog(records, &config.recruit.name_replacements))
}

pub fn parse_catalog(records: Vec<RecruitRecord>, name_replacements: &BTreeMap<String, String>) -> Vec<Operator> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(records.len());

    for rec in records {
        if rec.hidden || rec.global_hidden {
            continue;
        }
        let rarity = match u8::try_from(rec.level) {
            Ok(r) if (1..=TOP_RARITY).contains(&r) => r,
            _ => {
                log::warn!("skipping {}: rarity {} out of range", rec.name_en, rec.level);
                continue;
            }
        };
        let name = name_replacements.get(&rec.name_en).cloned().unwrap_or(rec.name_en);
        if !seen.insert(name.clone()) {
            log::debug!("duplicate feed entry for {name}; keeping the first");
            continue;
        }

        let mut tags = rec.tags;
        let class = rec.class.trim_end();
        if !class.is_empty() {
            tags.push(s!(class));
        }
        out.push(Operator { name, rarity, tags });
    }

    log::info!("recruitment feed: {} operators", out.len());
    out
}
