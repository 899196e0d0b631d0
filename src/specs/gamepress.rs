// src/specs/gamepress.rs
//! Spec for a Gamepress operator page (`<base>/operator/<slug>`).
//!
//! Everything is located by div class:
//! - `tag-title` (one per tag), `rarity-cell` (one star image per rarity
//!   level), `profession-title`, `description-box` (trait, usage, lore)
//! - `talent-cell` > `talent-child`: name, unlock text, promotion icons, text
//! - `skill-cell` > `skill-title-cell` and `skill-upgrade-tab-N` (N = 1..10);
//!   the first three tab blocks are SP cost, initial SP and duration, the
//!   rest is the description
//! - `building-buff-cell` > `top-cell` (name + unlock icon), `bottom-cell`
//! - `other-stat-value-cell`: "Attack Interval" / "Redeploy Time" and a value
//!
//! Stats come from three places. Max ATK/DEF/HP per promotion live in the
//! site-wide `stat-rankings?_format=json` feed (`max_atkne`, `max_defe1`, ...).
//! RES, cost and block are in the page's `myStats = {...}` script as quoted
//! numbers, one per phase (block is listed twice per phase, base and max).
//! Values the page doesn't carry are -1.
//!
//! Icons are rendered as their `alt` text, or the image file name.

use serde::de::Deserializer;
use serde::Deserialize;

use crate::core::html::{attr, class_blocks, first_class_block, open_tags, strip_tags, text_chunks, to_lower};
use crate::core::net::{self, Fetch, FetchError};
use crate::core::sanitize::title_case;
use crate::operator::model::{BaseSkill, OperatorProfile, PhaseStats, Skill, SkillTier, Stats, Talent};

pub fn page_url(base: &str, slug: &str) -> String {
    format!("{}/operator/{slug}", base.trim_end_matches('/'))
}

pub fn fetch_page(fetcher: &dyn Fetch, base: &str, slug: &str) -> Result<String, FetchError> {
    fetcher.get_text(&page_url(base, slug))
}

pub fn stat_rankings_url(base: &str) -> String {
    format!("{}/stat-rankings?_format=json", base.trim_end_matches('/'))
}

/* ---------- stat rankings feed ---------- */

#[derive(Deserialize)]
#[serde(untagged)]
enum StatValue {
    Num(f64),
    Text(String),
}

/// Numbers arrive as strings, numbers, `""` or `null`.
fn de_stat<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<StatValue>::deserialize(d)? {
        Some(StatValue::Num(n)) => Some(n as i64),
        Some(StatValue::Text(t)) => t.trim().parse().ok(),
        None => None,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct StatRanking {
    pub title: String,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_atkne: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_defne: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_hpne: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_atke1: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_defe1: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_hpe1: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_atke2: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_defe2: Option<i64>,
    #[serde(default, deserialize_with = "de_stat")]
    pub max_hpe2: Option<i64>,
}

impl StatRanking {
    /// (atk, def, hp) per phase; `None` for a phase the operator lacks.
    fn phase_maxes(&self) -> [Option<(i64, i64, i64)>; 3] {
        [
            (self.max_atkne, self.max_defne, self.max_hpne),
            (self.max_atke1, self.max_defe1, self.max_hpe1),
            (self.max_atke2, self.max_defe2, self.max_hpe2),
        ]
        .map(|(atk, def, hp)| Some((atk?, def?, hp?)))
    }
}

pub fn fetch_stat_rankings(fetcher: &dyn Fetch, base: &str) -> Result<Vec<StatRanking>, FetchError> {
    net::get_json(fetcher, &stat_rankings_url(base))
}

/// Entry for `name`, compared title-cased so "GreyThroat" and "Greythroat" agree.
pub fn find_ranking<'a>(rankings: &'a [StatRanking], name: &str) -> Option<&'a StatRanking> {
    let wanted = title_case(name);
    rankings.iter().find(|r| title_case(&r.title) == wanted)
}

/* ---------- page stats ---------- */

/// Quoted numbers for `"key": "N"` inside the `myStats` script, in order.
fn script_values(doc: &str, key: &str) -> Vec<i64> {
    let Some(start) = doc.find("myStats =") else { return Vec::new() };
    let script = &doc[start..];
    let end = to_lower(script).find("</script").unwrap_or(script.len());
    let script = &script[..end];

    let pat = format!("\"{key}\": \"");
    script
        .match_indices(&pat)
        .filter_map(|(at, _)| {
            let rest = &script[at + pat.len()..];
            rest[..rest.find('"')?].parse().ok()
        })
        .collect()
}

fn stat_number(text: &str) -> Option<&str> {
    let last = text.split_whitespace().last()?;
    Some(last.trim_end_matches(|c: char| c.is_ascii_alphabetic()))
}

/// Attack interval (seconds) and redeploy time (seconds).
fn other_stats(doc: &str) -> (Option<f64>, Option<i64>) {
    let mut interval = None;
    let mut redeploy = None;
    for cell in class_blocks(doc, "div", "other-stat-value-cell") {
        let text = text_chunks(cell).join(" ");
        let Some(value) = stat_number(&text) else { continue };
        if text.contains("Attack Interval") {
            interval = value.parse().ok();
        } else if text.contains("Redeploy Time") {
            redeploy = value.parse().ok();
        }
    }
    (interval, redeploy)
}

/// `None` when neither the ranking entry nor the page has anything to show.
pub fn stats(doc: &str, ranking: Option<&StatRanking>) -> Option<Stats> {
    let res = script_values(doc, "arts");
    let cost = script_values(doc, "cost");
    let block: Vec<i64> = script_values(doc, "block").into_iter().step_by(2).collect();

    let phases: Vec<PhaseStats> = ranking
        .map(StatRanking::phase_maxes)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(i, maxes)| {
            let (atk, def, hp) = maxes?;
            Some(PhaseStats {
                phase: u8::try_from(i).ok()?,
                atk,
                def,
                hp,
                res: res.get(i).map_or(-1.0, |&v| v as f64),
                block: block.get(i).copied().unwrap_or(-1),
                cost: cost.get(i).copied().unwrap_or(-1),
            })
        })
        .collect();

    let (attack_interval, redeploy_time) = other_stats(doc);
    if phases.is_empty() && attack_interval.is_none() && redeploy_time.is_none() {
        return None;
    }
    Some(Stats { phases, attack_interval, redeploy_time })
}

fn image_text(img: &str) -> String {
    if let Some(alt) = attr(img, "alt").filter(|a| !a.trim().is_empty()) {
        return s!(alt.trim());
    }
    attr(img, "src")
        .and_then(|src| {
            let file = src.rsplit('/').next()?;
            let stem = file.split('.').next()?;
            Some(s!(stem))
        })
        .unwrap_or_default()
}

fn block_text(block: &str) -> String {
    text_chunks(block).join("\n")
}

/// `None` when the page is not an operator page (no rarity or profession).
pub fn profile(doc: &str, name: &str) -> Option<OperatorProfile> {
    let rarity_cell = first_class_block(doc, "div", "rarity-cell")?;
    let profession = strip_tags(first_class_block(doc, "div", "profession-title")?);
    let rarity = u8::try_from(open_tags(rarity_cell, "img").len()).ok()?;

    let tags = class_blocks(doc, "div", "tag-title")
        .into_iter()
        .map(strip_tags)
        .filter(|t| !t.is_empty())
        .collect();

    let boxes = class_blocks(doc, "div", "description-box");
    let description = if boxes.len() < 3 {
        vec![s!("No proper description.")]
    } else {
        boxes.iter().take(3).map(|b| block_text(b)).collect()
    };

    Some(OperatorProfile { name: s!(name), rarity, profession, tags, description })
}

pub fn talents(doc: &str) -> Vec<Talent> {
    let mut out = Vec::new();
    for cell in class_blocks(doc, "div", "talent-cell") {
        for child in class_blocks(cell, "div", "talent-child") {
            let chunks = text_chunks(child);
            let [name, unlock, rest @ ..] = chunks.as_slice() else { continue };

            let icons: Vec<String> = open_tags(child, "img").into_iter().map(image_text).collect();
            let unlock = std::iter::once(unlock.clone())
                .chain(icons)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");

            out.push(Talent { name: name.clone(), unlock, description: rest.join(" ") });
        }
    }
    out
}

pub fn skills(doc: &str, tiers: &[u8]) -> Vec<Skill> {
    let mut out = Vec::new();
    for cell in class_blocks(doc, "div", "skill-cell") {
        let Some(title) = first_class_block(cell, "div", "skill-title-cell") else { continue };

        let tiers = tiers
            .iter()
            .filter_map(|&lvl| {
                let blocks = class_blocks(cell, "div", &format!("skill-upgrade-tab-{lvl}"));
                let [cost, init, duration, desc @ ..] = blocks.as_slice() else {
                    log::debug!("skill tier {lvl} missing or short ({} blocks)", blocks.len());
                    return None;
                };
                Some(SkillTier {
                    level: lvl,
                    sp_cost: strip_tags(cost),
                    initial_sp: strip_tags(init),
                    duration: strip_tags(duration),
                    description: desc
                        .iter()
                        .map(|b| block_text(b))
                        .filter(|t| !t.is_empty())
                        .collect::<Vec<_>>()
                        .join("\n"),
                })
            })
            .collect();

        out.push(Skill { name: strip_tags(title), tiers });
    }
    out
}

pub fn base_skills(doc: &str) -> Vec<BaseSkill> {
    let mut out = Vec::new();
    for cell in class_blocks(doc, "div", "building-buff-cell") {
        let (Some(top), Some(bottom)) = (
            first_class_block(cell, "div", "top-cell"),
            first_class_block(cell, "div", "bottom-cell"),
        ) else {
            continue;
        };

        let mut top_text = text_chunks(top).into_iter();
        let Some(name) = top_text.next() else { continue };
        let unlock = top_text
            .chain(open_tags(top, "img").into_iter().map(image_text))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("  ");

        out.push(BaseSkill {
            name,
            unlock,
            room: None,
            description: text_chunks(bottom).join(" "),
        });
    }
    out
}
