// src/format.rs
// Plain-text rendering for everything the CLI prints to stdout.

use std::fmt::Write;

use crate::operator::{BaseSkill, OperatorDetail, OperatorProfile, SectionDetail, Skill, SourceKind, Stats, Talent};
use crate::recruit::vocab::{TagDef, TagVocabulary};
use crate::recruit::{RankingSet, ResolvedMatch};
use crate::store::Shortcut;

pub const OPERATOR_RULE: &str = "------------------------------------";
const TIER_RULE: &str = "--------------------";

/* ---------- recruitment ---------- */

fn push_match(out: &mut String, m: &ResolvedMatch, good: bool) {
    if good {
        out.push_str("***Good***\n");
    }
    out.push_str(&m.label);
    out.push('\n');
    let ops: Vec<String> = m.entities.iter().map(|o| format!("{}: {}*", o.name, o.rarity)).collect();
    out.push_str(&ops.join(",\n"));
    out.push_str("\n\n");
}

/// Ranked matches, worst first. With `beneficial_only` only matches whose
/// weakest operator is above `threshold` are listed; otherwise those
/// matches are flagged as good.
pub fn recruitment(set: &RankingSet, beneficial_only: bool, threshold: u8) -> String {
    let mut out = s!("Recruitment Results\n\n");
    out.push_str("Note: the lower down the tag collection, the better the tags.\n\n\n");

    if beneficial_only {
        out.push_str("Only beneficial tags:\n\n");
        let good = set.beneficial(threshold);
        if good.is_empty() {
            out.push_str("No good combinations found...\n");
        }
        for m in &good {
            push_match(&mut out, m, false);
        }
        return out;
    }

    if set.is_empty() {
        out.push_str("Could not find any recruitment results.\n");
    }
    for m in set {
        push_match(&mut out, m, m.min_rarity() > threshold);
    }
    out
}

/* ---------- operators ---------- */

fn push_profile(out: &mut String, p: &OperatorProfile) {
    let _ = writeln!(out, "{}   {}   {}", p.name, "*".repeat(usize::from(p.rarity)), p.profession);
    if p.tags.is_empty() {
        out.push_str("No tags available!\n\n");
    } else {
        let _ = writeln!(out, "{}\n", p.tags.join(", "));
    }
    for d in &p.description {
        let _ = writeln!(out, "{d}");
    }
}

/// Negative values mark stats the source didn't have.
fn or_dash<T: std::fmt::Display + PartialOrd + Default>(v: T) -> String {
    if v < T::default() { s!("-") } else { v.to_string() }
}

fn push_stats(out: &mut String, stats: &Stats) {
    if stats.phases.is_empty() {
        out.push_str("No stats found!\n");
    }
    for ph in &stats.phases {
        let _ = writeln!(out, "E{} max", ph.phase);
        let _ = writeln!(out, "Max atk: {} atk", ph.atk);
        let _ = writeln!(out, "Max def: {} def", ph.def);
        let _ = writeln!(out, "Max hp : {} hp", ph.hp);
        let _ = writeln!(out, "Res    : {}", or_dash(ph.res));
        let _ = writeln!(out, "Block  : {}", or_dash(ph.block));
        let _ = writeln!(out, "Cost   : {} dp\n", or_dash(ph.cost));
    }
    let or_unknown = |v: Option<String>| v.unwrap_or_else(|| s!("-"));
    let _ = writeln!(out, "Attack Interval: {} s", or_unknown(stats.attack_interval.map(|v| v.to_string())));
    let _ = writeln!(out, "Deployment Time: {} s", or_unknown(stats.redeploy_time.map(|v| v.to_string())));
}

fn push_talents(out: &mut String, talents: &[Talent]) {
    if talents.is_empty() {
        out.push_str("No talents found!\n");
    }
    for t in talents {
        let _ = writeln!(out, "{} - {} -\n {}\n", t.name, t.unlock, t.description);
    }
}

fn push_skills(out: &mut String, skills: &[Skill]) {
    if skills.is_empty() {
        out.push_str("No skills found!\n");
    }
    for skill in skills {
        let _ = writeln!(out, "{}", skill.name);
        for tier in &skill.tiers {
            let cost = format!("SP cost: {}", tier.sp_cost);
            let init = format!("Initial SP: {}", tier.initial_sp);
            let _ = writeln!(out, "{:15}{cost:18}{init:22}Duration: {}", tier.level_label(), tier.duration);
            let _ = writeln!(out, " {}", tier.description);
            if skill.tiers.len() > 1 {
                out.push_str(TIER_RULE);
                out.push('\n');
            }
        }
        out.push('\n');
    }
}

fn push_base_skills(out: &mut String, skills: &[BaseSkill]) {
    if skills.is_empty() {
        out.push_str("No base skills found!\n");
    }
    for b in skills {
        match &b.room {
            Some(room) => {
                let _ = writeln!(out, "{}  {}  Room Type: {room}", b.name, b.unlock);
            }
            None => {
                let _ = writeln!(out, "{}  {}", b.name, b.unlock);
            }
        }
        let _ = writeln!(out, " {}\n", b.description);
    }
}

pub fn operator(detail: &OperatorDetail) -> String {
    let mut out = s!();
    if detail.source == SourceKind::Gamepress {
        out.push_str("Skipping JSON; Using gamepress.\n\n");
    }
    push_profile(&mut out, &detail.profile);

    for section in &detail.sections {
        out.push('\n');
        match section {
            SectionDetail::Stats(stats) => {
                out.push_str("Operator Stats\n");
                push_stats(&mut out, stats);
            }
            SectionDetail::Talents(talents) => {
                out.push_str("Talents\n");
                push_talents(&mut out, talents);
            }
            SectionDetail::Skills(skills) => {
                out.push_str("Operator Skills\n");
                push_skills(&mut out, skills);
            }
            SectionDetail::BaseSkills(skills) => {
                out.push_str("Base Skills\n");
                push_base_skills(&mut out, skills);
            }
            SectionDetail::Unavailable { section, reason } => {
                let _ = writeln!(out, "{}\n{reason}", section.title());
            }
        }
    }
    out
}

pub fn operator_failure(name: &str, reason: &str) -> String {
    format!("{name}\n\n{reason}\n")
}

/* ---------- shortcuts ---------- */

pub fn shortcuts(entries: &[Shortcut], vocab: &TagVocabulary) -> String {
    if entries.is_empty() {
        return s!("No shortcuts found!\n");
    }
    let mut out = s!("Shortcuts\n\n");
    for (short, id) in entries {
        let _ = writeln!(out, "{short:20} ---> {}", vocab.to_display_label(id));
    }
    out
}

/// Per tag: its built-in aliases (marked `*`, they cannot be changed) and
/// then the user's shortcuts.
pub fn shortcuts_by_tag(tags: &[&TagDef], vocab: &TagVocabulary) -> String {
    let mut out = s!();
    for def in tags {
        let names: Vec<String> = def
            .aliases
            .iter()
            .map(|a| format!("{a} *"))
            .chain(vocab.shortcuts_for(def.id).map(String::from))
            .collect();
        let _ = writeln!(out, "{}\n{}\n", def.label, names.join(",\n"));
    }
    out
}
