// src/operator/html.rs
use super::error::DetailError;
use super::model::{BaseSkill, OperatorProfile, Skill, Stats, Talent};
use super::{DetailProvider, SourceKind};
use crate::config::Config;
use crate::core::net::{Fetch, FetchError};
use crate::core::sanitize::{slug, title_case};
use crate::specs::gamepress;

/// Details scraped from the operator's Gamepress page. Every section is read
/// from the same document; stats also need the site's ranking feed, which is
/// only fetched when stats are asked for.
pub struct HtmlProvider<'a> {
    doc: String,
    profile: OperatorProfile,
    /// Fetcher and site base for the ranking feed; `None` for a page given
    /// directly.
    rankings: Option<(&'a dyn Fetch, &'a str)>,
}

impl<'a> HtmlProvider<'a> {
    pub fn fetch(fetcher: &'a dyn Fetch, config: &'a Config, name: &str) -> Result<Self, DetailError> {
        let page = slug(name);
        let page = config.operator.slug_replacements.get(&page).cloned().unwrap_or(page);

        let doc = match gamepress::fetch_page(fetcher, &config.sources.gamepress, &page) {
            Ok(doc) => doc,
            Err(FetchError::Status { status: 404, .. }) => return Err(DetailError::NotFound(title_case(name))),
            Err(e) => return Err(e.into()),
        };
        let mut provider = Self::from_document(doc, config, name)?;
        provider.rankings = Some((fetcher, config.sources.gamepress.as_str()));
        Ok(provider)
    }

    pub fn from_document(doc: String, config: &Config, name: &str) -> Result<Self, DetailError> {
        let wanted = title_case(name);
        let display = config.operator.name_replacements.get(&wanted).cloned().unwrap_or(wanted);
        let profile = gamepress::profile(&doc, &display).ok_or_else(|| DetailError::NotFound(display.clone()))?;
        Ok(Self { doc, profile, rankings: None })
    }
}

impl DetailProvider for HtmlProvider<'_> {
    fn source(&self) -> SourceKind {
        SourceKind::Gamepress
    }

    fn profile(&self) -> OperatorProfile {
        self.profile.clone()
    }

    fn stats(&self) -> Option<Stats> {
        let rankings = match self.rankings.map(|(fetcher, base)| gamepress::fetch_stat_rankings(fetcher, base)) {
            Some(Ok(r)) => r,
            Some(Err(e)) => {
                log::warn!("stat rankings unavailable: {e}");
                Vec::new()
            }
            None => Vec::new(),
        };
        let entry = gamepress::find_ranking(&rankings, &self.profile.name);
        if entry.is_none() {
            log::debug!("{} has no stat ranking entry", self.profile.name);
        }
        gamepress::stats(&self.doc, entry)
    }

    fn talents(&self) -> Vec<Talent> {
        gamepress::talents(&self.doc)
    }

    fn skills(&self, tiers: &[u8]) -> Result<Vec<Skill>, DetailError> {
        Ok(gamepress::skills(&self.doc, tiers))
    }

    fn base_skills(&self) -> Result<Vec<BaseSkill>, DetailError> {
        Ok(gamepress::base_skills(&self.doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
      <div class="rarity-cell"><img src="/s.png"><img src="/s.png"><img src="/s.png"><img src="/s.png"></div>
      <div class="profession-title">Vanguard</div>
      <div class="other-stat-value-cell">Attack Interval 1.0</div>
      <div class="other-stat-value-cell">Redeploy Time 70</div>
    "#;

    #[test]
    fn page_alone_gives_interval_and_redeploy() {
        let p = HtmlProvider::from_document(s!(PAGE), &Config::default(), "texas").unwrap();
        let stats = p.stats().unwrap();
        assert_eq!(stats.attack_interval, Some(1.0));
        assert_eq!(stats.redeploy_time, Some(70));
        assert!(stats.phases.is_empty());
    }

    #[test]
    fn non_operator_page_is_not_found() {
        let err = HtmlProvider::from_document(s!("<p>404</p>"), &Config::default(), "blue-poison").err();
        assert!(matches!(err, Some(DetailError::NotFound(n)) if n == "Blue Poison"));
    }
}
