// src/operator/model.rs
// Provider-neutral shapes for operator details. Both the JSON tables and
// the Gamepress page are read into these.

#[derive(Clone, Debug, PartialEq)]
pub struct OperatorProfile {
    pub name: String,
    pub rarity: u8,
    pub profession: String,
    pub tags: Vec<String>,
    /// Trait, usage and flavour text, in that order when available.
    pub description: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhaseStats {
    /// 0 for E0, 1 for E1, 2 for E2.
    pub phase: u8,
    pub atk: i64,
    pub def: i64,
    pub hp: i64,
    pub res: f64,
    pub block: i64,
    pub cost: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    /// Max-level stats per promotion phase.
    pub phases: Vec<PhaseStats>,
    pub attack_interval: Option<f64>,
    pub redeploy_time: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Talent {
    pub name: String,
    /// e.g. "Lvl 1 E2 Pot1"
    pub unlock: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillTier {
    /// 1..=10; 8-10 are masteries.
    pub level: u8,
    pub sp_cost: String,
    pub initial_sp: String,
    pub duration: String,
    pub description: String,
}

impl SkillTier {
    pub fn level_label(&self) -> String {
        if self.level > 7 {
            format!("Lv7 M{}", self.level - 7)
        } else {
            format!("Lv{}", self.level)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub tiers: Vec<SkillTier>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseSkill {
    pub name: String,
    /// e.g. "Lvl 30 E1" or whatever the page prints.
    pub unlock: String,
    pub room: Option<String>,
    pub description: String,
}
