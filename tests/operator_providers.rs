// tests/operator_providers.rs
//
// Operator lookup: JSON tables first, Gamepress on request or as fallback.
//
use ark_scrape::cli::operator_command;
use ark_scrape::config::options::OperatorOptions;
use ark_scrape::config::{Config, Context};
use ark_scrape::core::net::FixtureFetcher;
use ark_scrape::format;
use ark_scrape::operator::{self, DetailError, Section, SectionDetail, SkillDepth, SourceKind};
use ark_scrape::progress::{NullProgress, RecordingProgress};

const CHARACTERS: &str = r#"{
    "char_002_amiya": {
        "name": "Amiya", "rarity": 4, "profession": "CASTER",
        "description": "Deals <@ba.kw>Arts</> damage", "tagList": ["DPS", "Support"],
        "phases": [
            {"attributesKeyFrames": [
                {"level": 1, "data": {"maxHp": 699, "atk": 276, "def": 48, "magicResistance": 10.0,
                 "cost": 18, "blockCnt": 1, "respawnTime": 70, "baseAttackTime": 1.6}},
                {"level": 50, "data": {"maxHp": 1014, "atk": 428, "def": 71, "magicResistance": 10.0,
                 "cost": 18, "blockCnt": 1, "respawnTime": 70, "baseAttackTime": 1.6}}
            ]}
        ],
        "talents": [{"candidates": [
            {"unlockCondition": {"phase": 1, "level": 1}, "requiredPotentialRank": 0,
             "name": "Emotional Absorption", "description": "Recovers SP on kill"}
        ]}],
        "skills": [{"skillId": "skchr_amiya_1"}]
    }
}"#;

const SKILLS: &str = r#"{
    "skchr_amiya_1": {"levels": [
        {"name": "Tactical Chant", "description": "ASPD +{attack_speed}",
         "spData": {"spCost": 50, "initSp": 10}, "duration": 20.0,
         "blackboard": [{"key": "attack_speed", "value": 30}]}
    ]}
}"#;

const KROOS_PAGE: &str = r#"
<html><body>
  <div class="tag-title">DPS</div>
  <div class="rarity-cell"><img src="/s.png"><img src="/s.png"><img src="/s.png"></div>
  <div class="profession-title">Sniper</div>
  <div class="description-box">Attacks aerial units first</div>
  <div class="description-box">Usage</div>
  <div class="description-box">Lore</div>
  <div class="talent-cell"><div class="talent-child"><b>Eagle Eye</b> <span>Lv1</span> Longer range</div></div>
</body></html>"#;

fn context() -> Context {
    let mut config = Config::default();
    config.sources.character_table = "fixture://characters".into();
    config.sources.skill_table = "fixture://skills".into();
    config.sources.building_data = "fixture://building".into();
    config.sources.gamepress = "fixture://gp/".into();
    Context::new(config, Default::default())
}

fn tables() -> FixtureFetcher {
    FixtureFetcher::new()
        .with("fixture://characters", CHARACTERS)
        .with("fixture://skills", SKILLS)
        .with("fixture://gp/operator/kroos", KROOS_PAGE)
}

fn options(sections: Vec<Section>, force_gamepress: bool) -> OperatorOptions {
    OperatorOptions { names: Vec::new(), sections, force_gamepress }
}

#[test]
fn json_tables_answer_first() {
    let opts = options(
        vec![Section::Stats, Section::Skills(SkillDepth::Verbose), Section::Talents, Section::BaseSkills],
        false,
    );
    let mut progress = RecordingProgress::default();
    let detail = operator::lookup(&context(), &tables(), "amiya", &opts, &mut progress).unwrap();

    assert_eq!(detail.source, SourceKind::Json);
    assert_eq!(detail.profile.name, "Amiya");
    // 0-based in this dump
    assert_eq!(detail.profile.rarity, 5);
    assert_eq!(detail.profile.profession, "Caster");
    assert_eq!(detail.profile.description, vec!["Deals Arts damage".to_string()]);

    let SectionDetail::Stats(stats) = &detail.sections[0] else { panic!("stats: {:?}", detail.sections[0]) };
    assert_eq!(stats.phases[0].atk, 428);
    assert_eq!(stats.attack_interval, Some(1.6));

    let SectionDetail::Skills(skills) = &detail.sections[1] else { panic!("skills: {:?}", detail.sections[1]) };
    assert_eq!(skills[0].name, "Skill 1: Tactical Chant");
    // only level 1 exists in the table
    assert_eq!(skills[0].tiers.len(), 1);
    assert_eq!(skills[0].tiers[0].description, "ASPD +30");

    let SectionDetail::Talents(talents) = &detail.sections[2] else { panic!("talents") };
    assert_eq!(talents[0].unlock, "Lvl 1 E1 Pot1");

    // no building data fixture: that section is reported, the rest survives
    assert_eq!(
        detail.sections[3],
        SectionDetail::Unavailable { section: Section::BaseSkills, reason: "Base skill data failed to load!".into() }
    );
    assert_eq!(progress.events.last().map(String::as_str), Some("succeed:Success!"));
}

#[test]
fn forced_gamepress_skips_the_tables() {
    let opts = options(vec![Section::Stats, Section::Talents], true);
    let detail = operator::lookup(&context(), &tables(), "Kroos", &opts, &mut NullProgress).unwrap();

    assert_eq!(detail.source, SourceKind::Gamepress);
    assert_eq!(detail.profile.rarity, 3);
    assert!(matches!(&detail.sections[0], SectionDetail::Unavailable { section: Section::Stats, .. }));
    let SectionDetail::Talents(talents) = &detail.sections[1] else { panic!("talents") };
    assert_eq!(talents[0].name, "Eagle Eye");

    let text = format::operator(&detail);
    assert!(text.starts_with("Skipping JSON; Using gamepress."));
}

#[test]
fn falls_back_to_gamepress() {
    let opts = options(vec![], false);

    // operator missing from the character table
    let detail = operator::lookup(&context(), &tables(), "kroos", &opts, &mut NullProgress).unwrap();
    assert_eq!(detail.source, SourceKind::Gamepress);

    // character table unreachable
    let only_page = FixtureFetcher::new().with("fixture://gp/operator/kroos", KROOS_PAGE);
    let detail = operator::lookup(&context(), &only_page, "kroos", &opts, &mut NullProgress).unwrap();
    assert_eq!(detail.source, SourceKind::Gamepress);
    assert_eq!(detail.profile.profession, "Sniper");
}

#[test]
fn unknown_everywhere_is_not_found() {
    let mut progress = RecordingProgress::default();
    let err = operator::lookup(&context(), &tables(), "nobody-here", &options(vec![], false), &mut progress)
        .unwrap_err();

    assert!(matches!(err, DetailError::NotFound(ref n) if n == "Nobody Here"));
    assert_eq!(progress.events.last().map(String::as_str), Some("fail:Failed."));
}

#[test]
fn several_names_are_separated_and_failures_counted() {
    let mut opts = options(vec![], false);
    opts.names = vec!["amiya".into(), "nobody".into(), "kroos".into()];

    let (out, failed) = operator_command(&context(), &tables(), &opts, &mut NullProgress);

    assert_eq!(failed, 1);
    assert_eq!(out.matches(format::OPERATOR_RULE).count(), 2);
    assert!(out.contains("Amiya   *****   Caster"));
    assert!(out.contains("Nobody\n\ncould not find operator 'Nobody'"));
    assert!(out.contains("Kroos   ***   Sniper"));
}

#[test]
fn gamepress_stats_join_ranking_feed_and_page() {
    let page = format!(
        "{}{}",
        KROOS_PAGE,
        r#"<script>myStats = {"ne": {"arts": "0", "cost": "9", "block": "1", "block": "1"}};</script>
           <div class="other-stat-value-cell">Attack Interval 1.0</div>
           <div class="other-stat-value-cell">Redeploy Time 70</div>"#
    );
    let fetcher = FixtureFetcher::new()
        .with("fixture://gp/operator/kroos", page)
        .with("fixture://gp/stat-rankings?_format=json", r#"[
            {"title": "Kroos", "max_atkne": "375", "max_defne": "51", "max_hpne": "865"}
        ]"#);

    let detail = operator::lookup(&context(), &fetcher, "kroos", &options(vec![Section::Stats], true), &mut NullProgress)
        .unwrap();

    let SectionDetail::Stats(stats) = &detail.sections[0] else { panic!("stats: {:?}", detail.sections[0]) };
    assert_eq!(stats.phases.len(), 1);
    assert_eq!((stats.phases[0].atk, stats.phases[0].cost), (375, 9));
    assert_eq!(stats.attack_interval, Some(1.0));
    assert_eq!(stats.redeploy_time, Some(70));
    assert!(format::operator(&detail).contains("Max hp : 865 hp"));
}
