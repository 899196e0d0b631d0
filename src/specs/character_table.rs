// src/specs/character_table.rs
//! Spec for the game-data JSON tables: `character_table`, `skill_table` and
//! `building_data`.
//!
//! Only the fields we print are modelled; serde skips the rest. Two shapes
//! of the data are in circulation: older dumps give rarity as a 0-based
//! number and phases as numbers, newer ones use `"TIER_6"` / `"PHASE_2"`.
//! Both are accepted.
//!
//! Descriptions carry the game's rich-text markers and `{key}` /
//! `{key:0%}` placeholders that are filled from the skill's blackboard.

use std::collections::HashMap;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::core::net::{self, Fetch, FetchError};
use crate::core::sanitize::{strip_rich_text, title_case};
use crate::operator::model::{BaseSkill, OperatorProfile, PhaseStats, Skill, SkillTier, Stats, Talent};

/* ---------- serde shapes ---------- */

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrCode {
    Num(i64),
    Code(String),
}

fn code_suffix(code: &str) -> Option<i64> {
    code.rsplit('_').next()?.parse().ok()
}

fn de_rarity<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let n = match NumOrCode::deserialize(d)? {
        NumOrCode::Num(n) => n + 1,
        NumOrCode::Code(c) => code_suffix(&c).ok_or_else(|| de::Error::custom(format!("bad rarity {c}")))?,
    };
    u8::try_from(n).map_err(de::Error::custom)
}

fn de_phase<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let n = match NumOrCode::deserialize(d)? {
        NumOrCode::Num(n) => n,
        NumOrCode::Code(c) => code_suffix(&c).ok_or_else(|| de::Error::custom(format!("bad phase {c}")))?,
    };
    u8::try_from(n).map_err(de::Error::custom)
}

pub type CharacterTable = HashMap<String, CharacterRecord>;
pub type SkillTable = HashMap<String, SkillRecord>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "de_rarity")]
    pub rarity: u8,
    #[serde(default)]
    pub profession: String,
    pub item_usage: Option<String>,
    pub item_desc: Option<String>,
    pub tag_list: Option<Vec<String>>,
    #[serde(default)]
    pub phases: Vec<PhaseRecord>,
    pub talents: Option<Vec<TalentRecord>>,
    #[serde(default)]
    pub skills: Vec<SkillRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    #[serde(default)]
    pub attributes_key_frames: Vec<KeyFrame>,
}

#[derive(Debug, Deserialize)]
pub struct KeyFrame {
    pub level: i64,
    pub data: Attributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attributes {
    pub max_hp: i64,
    pub atk: i64,
    pub def: i64,
    pub magic_resistance: f64,
    pub cost: i64,
    pub block_cnt: i64,
    pub respawn_time: i64,
    pub base_attack_time: f64,
}

#[derive(Debug, Deserialize)]
pub struct TalentRecord {
    pub candidates: Option<Vec<TalentCandidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentCandidate {
    pub unlock_condition: UnlockCondition,
    #[serde(default)]
    pub required_potential_rank: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnlockCondition {
    #[serde(deserialize_with = "de_phase")]
    pub phase: u8,
    pub level: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRef {
    pub skill_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillRecord {
    pub levels: Vec<SkillLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevel {
    pub name: String,
    pub description: Option<String>,
    pub sp_data: SpData,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub blackboard: Vec<BlackboardEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpData {
    pub sp_cost: i64,
    pub init_sp: i64,
}

#[derive(Debug, Deserialize)]
pub struct BlackboardEntry {
    pub key: String,
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BuildingData {
    pub chars: HashMap<String, BuildingChar>,
    pub buffs: HashMap<String, BuffRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingChar {
    #[serde(default)]
    pub buff_char: Vec<BuffSlot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffSlot {
    #[serde(default)]
    pub buff_data: Vec<BuffUnlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffUnlock {
    pub buff_id: String,
    pub cond: UnlockCondition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffRecord {
    pub buff_name: String,
    pub room_type: String,
    #[serde(default)]
    pub description: String,
}

/* ---------- fetching ---------- */

pub fn fetch_characters(fetcher: &dyn Fetch, url: &str) -> Result<CharacterTable, FetchError> {
    net::get_json(fetcher, url)
}

pub fn fetch_skills(fetcher: &dyn Fetch, url: &str) -> Result<SkillTable, FetchError> {
    net::get_json(fetcher, url)
}

pub fn fetch_building(fetcher: &dyn Fetch, url: &str) -> Result<BuildingData, FetchError> {
    net::get_json(fetcher, url)
}

/* ---------- extraction ---------- */

/// Entry whose name matches `name` once both are title-cased. When several
/// do (alternate forms share a name), `char_` keys win, then the smallest key.
pub fn find_character<'a>(table: &'a CharacterTable, name: &str) -> Option<(&'a str, &'a CharacterRecord)> {
    let wanted = title_case(name);
    table
        .iter()
        .filter(|(_, rec)| title_case(&rec.name) == wanted)
        .min_by_key(|&(key, _)| (!key.starts_with("char_"), key.as_str()))
        .map(|(key, rec)| (key.as_str(), rec))
}

pub fn profession_label(code: &str) -> String {
    match code {
        "PIONEER" => s!("Vanguard"),
        "WARRIOR" => s!("Guard"),
        "SNIPER" => s!("Sniper"),
        "TANK" => s!("Defender"),
        "MEDIC" => s!("Medic"),
        "SUPPORT" => s!("Supporter"),
        "CASTER" => s!("Caster"),
        "SPECIAL" => s!("Specialist"),
        other => title_case(other),
    }
}

pub fn room_label(code: &str) -> String {
    match code {
        "CONTROL" => s!("Control Center"),
        "POWER" => s!("Power Plant"),
        "MANUFACTURE" => s!("Factory"),
        "TRADING" => s!("Trading Post"),
        "DORMITORY" => s!("Dormitory"),
        "MEETING" => s!("Reception Room"),
        "HIRE" => s!("Office"),
        "TRAINING" => s!("Training Room"),
        "WORKSHOP" => s!("Workshop"),
        other => title_case(other),
    }
}

pub fn profile(rec: &CharacterRecord) -> OperatorProfile {
    let description = [&rec.description, &rec.item_usage, &rec.item_desc]
        .into_iter()
        .flatten()
        .map(|d| strip_rich_text(d))
        .filter(|d| !d.is_empty())
        .collect();

    OperatorProfile {
        name: rec.name.clone(),
        rarity: rec.rarity,
        profession: profession_label(&rec.profession),
        tags: rec.tag_list.clone().unwrap_or_default(),
        description,
    }
}

/// `None` when the record has no key frames to read.
pub fn stats(rec: &CharacterRecord) -> Option<Stats> {
    let first = rec.phases.first()?.attributes_key_frames.first()?;

    let phases = rec
        .phases
        .iter()
        .enumerate()
        .filter_map(|(i, phase)| {
            let max = &phase.attributes_key_frames.last()?.data;
            Some(PhaseStats {
                phase: u8::try_from(i).ok()?,
                atk: max.atk,
                def: max.def,
                hp: max.max_hp,
                res: max.magic_resistance,
                block: max.block_cnt,
                cost: max.cost,
            })
        })
        .collect();

    Some(Stats {
        phases,
        attack_interval: Some(first.data.base_attack_time),
        redeploy_time: Some(first.data.respawn_time),
    })
}

pub fn talents(rec: &CharacterRecord) -> Vec<Talent> {
    rec.talents
        .iter()
        .flatten()
        .flat_map(|t| t.candidates.iter().flatten())
        .filter_map(|c| {
            let name = c.name.as_deref()?;
            Some(Talent {
                name: s!(name),
                unlock: format!(
                    "Lvl {} E{} Pot{}",
                    c.unlock_condition.level,
                    c.unlock_condition.phase,
                    c.required_potential_rank + 1
                ),
                description: strip_rich_text(c.description.as_deref().unwrap_or_default()),
            })
        })
        .collect()
}

fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 { format!("{}", v as i64) } else { format!("{v}") }
}

/// Replace `{key}`, `{-key}` and `{key:0%}` placeholders with blackboard
/// values. Unknown keys are left as written.
pub fn fill_blackboard(text: &str, board: &[BlackboardEntry]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };

        let inner = &tail[1..close];
        let (key, fmt) = inner.split_once(':').unwrap_or((inner, ""));
        let key = key.trim().trim_start_matches('-');
        let value = board
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(key))
            .and_then(|e| e.value);

        match value {
            Some(v) if fmt.ends_with('%') => out.push_str(&format!("{}%", (v * 100.0).abs().round() as i64)),
            Some(v) => out.push_str(&fmt_number(v.abs())),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Skills at the requested tiers (1-based levels). Skills missing from the
/// skill table, and tiers beyond what a skill has, are skipped.
pub fn skills(rec: &CharacterRecord, table: &SkillTable, tiers: &[u8]) -> Vec<Skill> {
    let mut out = Vec::new();
    for (n, id) in rec.skills.iter().filter_map(|s| s.skill_id.as_deref()).enumerate() {
        let Some(skill) = table.get(id) else {
            log::warn!("{}: skill {id} missing from skill table", rec.name);
            continue;
        };
        let Some(first) = skill.levels.first() else { continue };

        let tiers = tiers
            .iter()
            .filter_map(|&lvl| {
                let at = skill.levels.get(usize::from(lvl).checked_sub(1)?)?;
                let desc = strip_rich_text(at.description.as_deref().unwrap_or_default());
                Some(SkillTier {
                    level: lvl,
                    sp_cost: at.sp_data.sp_cost.to_string(),
                    initial_sp: at.sp_data.init_sp.to_string(),
                    duration: if at.duration < 0.0 { s!("-") } else { fmt_number(at.duration) },
                    description: fill_blackboard(&desc, &at.blackboard),
                })
            })
            .collect();

        out.push(Skill { name: format!("Skill {}: {}", n + 1, first.name), tiers });
    }
    out
}

/// `None` when the operator has no entry in the building data.
pub fn base_skills(data: &BuildingData, key: &str) -> Option<Vec<BaseSkill>> {
    let ch = data.chars.get(key)?;
    let out = ch
        .buff_char
        .iter()
        .flat_map(|slot| &slot.buff_data)
        .filter_map(|unlock| {
            let buff = data.buffs.get(&unlock.buff_id)?;
            Some(BaseSkill {
                name: buff.buff_name.clone(),
                unlock: format!("Lvl {} E{}", unlock.cond.level, unlock.cond.phase),
                room: Some(room_label(&buff.room_type)),
                description: strip_rich_text(&buff.description),
            })
        })
        .collect();
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHARS: &str = r#"{
        "char_103_angel": {
            "name": "Exusiai", "rarity": 5, "profession": "SNIPER",
            "description": "Attacks aerial units <@ba.kw>first</>",
            "itemUsage": "Penguin Logistics", "itemDesc": "Apple pie!",
            "tagList": ["DPS"],
            "phases": [
                {"attributesKeyFrames": [
                    {"level": 1, "data": {"maxHp": 673, "atk": 200, "def": 70, "magicResistance": 0.0,
                     "cost": 12, "blockCnt": 1, "respawnTime": 70, "baseAttackTime": 1.0}},
                    {"level": 50, "data": {"maxHp": 1000, "atk": 400, "def": 100, "magicResistance": 0.0,
                     "cost": 12, "blockCnt": 1, "respawnTime": 70, "baseAttackTime": 1.0}}
                ]}
            ],
            "talents": [{"candidates": [
                {"unlockCondition": {"phase": "PHASE_1", "level": 1}, "requiredPotentialRank": 0,
                 "name": "Quick Reload", "description": "ATK <@ba.vup>+8%</>"}
            ]}],
            "skills": [{"skillId": "skchr_angel_3"}, {"skillId": "missing"}]
        },
        "token_10001_angel": {"name": "Exusiai", "rarity": "TIER_1", "profession": "TOKEN"}
    }"#;

    const SKILLS: &str = r#"{
        "skchr_angel_3": {"levels": [
            {"name": "Overloading Mode", "description": "ATK {atk:0%}, interval {-base_attack_time}",
             "spData": {"spCost": 40, "initSp": 10}, "duration": -1.0,
             "blackboard": [{"key": "atk", "value": 0.1}, {"key": "base_attack_time", "value": -0.5}]},
            {"name": "Overloading Mode", "description": "ATK +{ATK:0%} for {duration}s",
             "spData": {"spCost": 35, "initSp": 15}, "duration": 15.0,
             "blackboard": [{"key": "atk", "value": 0.45}]}
        ]}
    }"#;

    #[test]
    fn finds_char_entry_over_token() {
        let table: CharacterTable = serde_json::from_str(CHARS).unwrap();
        let (key, rec) = find_character(&table, "exusiai").unwrap();
        assert_eq!(key, "char_103_angel");
        assert_eq!(rec.rarity, 6);
        assert!(find_character(&table, "texas").is_none());
    }

    #[test]
    fn profile_stats_and_talents() {
        let table: CharacterTable = serde_json::from_str(CHARS).unwrap();
        let (_, rec) = find_character(&table, "Exusiai").unwrap();

        let p = profile(rec);
        assert_eq!(p.profession, "Sniper");
        assert_eq!(p.description[0], "Attacks aerial units first");
        assert_eq!(p.description.len(), 3);

        let s = stats(rec).unwrap();
        assert_eq!(s.phases.len(), 1);
        assert_eq!(s.phases[0].atk, 400);
        assert_eq!(s.redeploy_time, Some(70));

        let t = talents(rec);
        assert_eq!(t[0].unlock, "Lvl 1 E1 Pot1");
        assert_eq!(t[0].description, "ATK +8%");
    }

    #[test]
    fn skills_fill_placeholders_and_skip_unknown_ids() {
        let chars: CharacterTable = serde_json::from_str(CHARS).unwrap();
        let table: SkillTable = serde_json::from_str(SKILLS).unwrap();
        let (_, rec) = find_character(&chars, "Exusiai").unwrap();

        let got = skills(rec, &table, &[1, 2, 10]);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Skill 1: Overloading Mode");
        assert_eq!(got[0].tiers.len(), 2);

        let t1 = &got[0].tiers[0];
        assert_eq!(t1.duration, "-");
        assert_eq!(t1.description, "ATK 10%, interval 0.5");

        let t2 = &got[0].tiers[1];
        assert_eq!(t2.sp_cost, "35");
        assert_eq!(t2.duration, "15");
        // unknown key stays as written
        assert_eq!(t2.description, "ATK +45% for {duration}s");
    }

    #[test]
    fn base_skills_join_buff_records() {
        let data: BuildingData = serde_json::from_str(
            r#"{
                "chars": {"char_103_angel": {"buffChar": [
                    {"buffData": [{"buffId": "trade_ord_spd[000]", "cond": {"phase": 0, "level": 1}}]},
                    {"buffData": []}
                ]}},
                "buffs": {"trade_ord_spd[000]": {"buffName": "Penguin Logistics",
                    "roomType": "TRADING", "description": "Order efficiency <@cc.vup>+20%</>"}}
            }"#,
        )
        .unwrap();

        let got = base_skills(&data, "char_103_angel").unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].room.as_deref(), Some("Trading Post"));
        assert_eq!(got[0].unlock, "Lvl 1 E0");
        assert_eq!(got[0].description, "Order efficiency +20%");
        assert!(base_skills(&data, "char_nobody").is_none());
    }
}
