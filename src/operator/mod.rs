// src/operator/mod.rs
//! Operator details: profile, stats, talents, skills and base skills.
//!
//! Two sources can answer: the game-data JSON tables (`JsonProvider`) and
//! the operator's Gamepress page (`HtmlProvider`). Both implement
//! [`DetailProvider`]; [`lookup`] picks one per operator. JSON is tried
//! first unless Gamepress was forced, and Gamepress is the fallback when
//! the tables are unreachable or don't know the operator.

pub mod error;
pub mod html;
pub mod json;
pub mod model;

pub use error::DetailError;
pub use html::HtmlProvider;
pub use json::JsonProvider;
pub use model::{BaseSkill, OperatorProfile, PhaseStats, Skill, SkillTier, Stats, Talent};

use crate::config::Context;
use crate::config::options::OperatorOptions;
use crate::core::net::Fetch;
use crate::progress::Progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillDepth {
    /// Top tier only.
    Max,
    /// Level 1, level 7 and (when available) mastery 3.
    Verbose,
}

impl SkillDepth {
    /// Operators above 3 stars have masteries; the rest stop at level 7.
    pub fn tiers(self, rarity: u8) -> Vec<u8> {
        let masteries = rarity > 3;
        match (self, masteries) {
            (SkillDepth::Max, true) => vec![10],
            (SkillDepth::Max, false) => vec![7],
            (SkillDepth::Verbose, true) => vec![1, 7, 10],
            (SkillDepth::Verbose, false) => vec![1, 7],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Stats,
    Talents,
    Skills(SkillDepth),
    BaseSkills,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Stats => "Operator Stats",
            Section::Talents => "Talents",
            Section::Skills(_) => "Operator Skills",
            Section::BaseSkills => "Base Skills",
        }
    }

    /// Sections selected by the command-line flags, in display order.
    /// `all` turns on everything; verbose skills win over max skills.
    pub fn from_flags(info: bool, talents: bool, base: bool, skills: bool, vskills: bool, all: bool) -> Vec<Section> {
        let mut out = Vec::new();
        if info || all {
            out.push(Section::Stats);
        }
        if vskills {
            out.push(Section::Skills(SkillDepth::Verbose));
        } else if skills || all {
            out.push(Section::Skills(SkillDepth::Max));
        }
        if talents || all {
            out.push(Section::Talents);
        }
        if base || all {
            out.push(Section::BaseSkills);
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Json,
    Gamepress,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SectionDetail {
    Stats(Stats),
    Talents(Vec<Talent>),
    Skills(Vec<Skill>),
    BaseSkills(Vec<BaseSkill>),
    /// The provider could not produce this section; `reason` is shown instead.
    Unavailable { section: Section, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperatorDetail {
    pub profile: OperatorProfile,
    pub source: SourceKind,
    pub sections: Vec<SectionDetail>,
}

pub trait DetailProvider {
    fn source(&self) -> SourceKind;

    fn profile(&self) -> OperatorProfile;

    /// `None` when the source has no stats for this operator.
    fn stats(&self) -> Option<Stats>;

    fn talents(&self) -> Vec<Talent>;

    fn skills(&self, tiers: &[u8]) -> Result<Vec<Skill>, DetailError>;

    fn base_skills(&self) -> Result<Vec<BaseSkill>, DetailError>;

    /// Profile plus each requested section. A section that fails is
    /// reported in place and never fails the whole lookup.
    fn detail(&self, sections: &[Section]) -> OperatorDetail {
        let profile = self.profile();
        let sections = sections
            .iter()
            .map(|&section| {
                let unavailable = |reason: String| SectionDetail::Unavailable { section, reason };
                match section {
                    Section::Stats => match self.stats() {
                        Some(stats) => SectionDetail::Stats(stats),
                        None => unavailable(s!("Could not retrieve stats")),
                    },
                    Section::Talents => SectionDetail::Talents(self.talents()),
                    Section::Skills(depth) => match self.skills(&depth.tiers(profile.rarity)) {
                        Ok(skills) => SectionDetail::Skills(skills),
                        Err(e) => {
                            log::warn!("{}: skills unavailable: {e}", profile.name);
                            unavailable(s!("Skill data failed to load!"))
                        }
                    },
                    Section::BaseSkills => match self.base_skills() {
                        Ok(skills) => SectionDetail::BaseSkills(skills),
                        Err(e) => {
                            log::warn!("{}: base skills unavailable: {e}", profile.name);
                            unavailable(s!("Base skill data failed to load!"))
                        }
                    },
                }
            })
            .collect();

        OperatorDetail { profile, source: self.source(), sections }
    }
}

/// Resolve one operator name to its details.
pub fn lookup(
    ctx: &Context,
    fetcher: &dyn Fetch,
    name: &str,
    opts: &OperatorOptions,
    progress: &mut dyn Progress,
) -> Result<OperatorDetail, DetailError> {
    progress.begin("Fetching...");

    let json = if opts.force_gamepress {
        None
    } else {
        match JsonProvider::find(fetcher, &ctx.config, name) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("character table unavailable ({e}); trying Gamepress");
                None
            }
        }
    };

    progress.begin("Parsing...");
    let provider: Box<dyn DetailProvider + '_> = match json {
        Some(p) => Box::new(p),
        None => match HtmlProvider::fetch(fetcher, &ctx.config, name) {
            Ok(p) => Box::new(p),
            Err(e) => {
                progress.fail("Failed.");
                return Err(e);
            }
        },
    };

    let detail = provider.detail(&opts.sections);
    progress.succeed("Success!");
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_depend_on_rarity() {
        assert_eq!(SkillDepth::Max.tiers(6), vec![10]);
        assert_eq!(SkillDepth::Max.tiers(3), vec![7]);
        assert_eq!(SkillDepth::Verbose.tiers(4), vec![1, 7, 10]);
        assert_eq!(SkillDepth::Verbose.tiers(2), vec![1, 7]);
    }

    #[test]
    fn flags_select_sections_in_display_order() {
        assert!(Section::from_flags(false, false, false, false, false, false).is_empty());
        assert_eq!(
            Section::from_flags(false, true, false, true, false, false),
            vec![Section::Skills(SkillDepth::Max), Section::Talents]
        );
        assert_eq!(
            Section::from_flags(false, false, false, false, true, true),
            vec![
                Section::Stats,
                Section::Skills(SkillDepth::Verbose),
                Section::Talents,
                Section::BaseSkills
            ]
        );
    }
}
