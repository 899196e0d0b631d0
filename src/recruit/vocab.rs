// src/recruit/vocab.rs
// Recruitment tag vocabulary: the feed's canonical identifiers, how to show
// them, and what users may type instead.

/// One recruitable tag. `id` is the identifier the recruitment feed uses.
#[derive(Debug)]
pub struct TagDef {
    pub id: &'static str,
    pub label: &'static str,
    pub aliases: &'static [&'static str],
}

const fn tag(id: &'static str, label: &'static str, aliases: &'static [&'static str]) -> TagDef {
    TagDef { id, label, aliases }
}

/// Every tag the recruitment screen can offer, in the order listings use.
pub static TAGS: &[TagDef] = &[
    // qualification
    tag("新手", "Starter", &["starter", "new"]),
    tag("资深干员", "Senior Operator", &["senior-operator", "senior"]),
    tag("高级资深干员", "Top Operator", &["top-operator", "top"]),
    // position
    tag("近战位", "Melee", &["melee"]),
    tag("远程位", "Ranged", &["ranged"]),
    // class
    tag("先锋", "Vanguard", &["vanguard"]),
    tag("近卫", "Guard", &["guard"]),
    tag("狙击", "Sniper", &["sniper"]),
    tag("重装", "Defender", &["defender"]),
    tag("医疗", "Medic", &["medic"]),
    tag("辅助", "Supporter", &["supporter"]),
    tag("术师", "Caster", &["caster"]),
    tag("特种", "Specialist", &["specialist"]),
    // affix
    tag("治疗", "Healing", &["healing", "heal"]),
    tag("支援", "Support", &["support"]),
    tag("输出", "DPS", &["dps", "damage"]),
    tag("群攻", "AoE", &["aoe"]),
    tag("减速", "Slow", &["slow"]),
    tag("生存", "Survival", &["survival"]),
    tag("防护", "Defense", &["defense"]),
    tag("削弱", "Debuff", &["debuff"]),
    tag("位移", "Shift", &["shift"]),
    tag("控场", "Crowd Control", &["crowd-control", "cc"]),
    tag("爆发", "Nuker", &["nuker", "burst"]),
    tag("召唤", "Summon", &["summon"]),
    tag("快速复活", "Fast-Redeploy", &["fast-redeploy", "redeploy"]),
    tag("费用回复", "DP-Recovery", &["dp-recovery", "dp"]),
    tag("支援机械", "Robot", &["robot"]),
    tag("元素", "Elemental", &["elemental"]),
];

/// Lower-case, with `+`, `_` and spaces read as `-`.
pub fn alias_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['+', '_', ' '], "-")
}

/// Built-in tags plus the user's shortcuts, assembled once per invocation.
#[derive(Clone, Debug, Default)]
pub struct TagVocabulary {
    /// (shortcut, canonical id), in file order.
    shortcuts: Vec<(String, String)>,
}

impl TagVocabulary {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_shortcuts(shortcuts: Vec<(String, String)>) -> Self {
        Self { shortcuts }
    }

    pub fn defs(&self) -> &'static [TagDef] {
        TAGS
    }

    pub fn recognized_tags(&self) -> Vec<&'static str> {
        TAGS.iter().map(|t| t.id).collect()
    }

    pub fn shortcuts(&self) -> &[(String, String)] {
        &self.shortcuts
    }

    /// Built-in aliases only; the canonical id itself also resolves.
    pub fn lookup_builtin(&self, raw: &str) -> Option<&'static TagDef> {
        let key = alias_key(raw);
        TAGS.iter()
            .find(|t| t.aliases.contains(&key.as_str()) || t.id == raw.trim())
    }

    pub fn is_builtin_alias(&self, raw: &str) -> bool {
        self.lookup_builtin(raw).is_some()
    }

    /// Canonical id for whatever the user typed, or `None` when neither a
    /// built-in alias nor a shortcut matches.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        if let Some(def) = self.lookup_builtin(raw) {
            return Some(s!(def.id));
        }
        let key = alias_key(raw);
        self.shortcuts
            .iter()
            .find(|(short, _)| *short == key)
            .map(|(_, id)| id.clone())
    }

    pub fn def(&self, canonical: &str) -> Option<&'static TagDef> {
        TAGS.iter().find(|t| t.id == canonical)
    }

    pub fn to_display_label(&self, canonical: &str) -> String {
        self.def(canonical).map(|t| s!(t.label)).unwrap_or_else(|| s!(canonical))
    }

    pub fn shortcuts_for<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.shortcuts
            .iter()
            .filter(move |(_, id)| id == canonical)
            .map(|(short, _)| short.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_case_and_separator_tolerant() {
        let v = TagVocabulary::builtin();
        assert_eq!(v.normalize("Top-Operator").as_deref(), Some("高级资深干员"));
        assert_eq!(v.normalize("top_operator").as_deref(), Some("高级资深干员"));
        assert_eq!(v.normalize("crowd+control").as_deref(), Some("控场"));
        assert_eq!(v.normalize("CC").as_deref(), Some("控场"));
        assert_eq!(v.normalize("近卫").as_deref(), Some("近卫"));
        assert_eq!(v.normalize("tank"), None);
    }

    #[test]
    fn shortcuts_extend_but_never_shadow_builtins() {
        let v = TagVocabulary::with_shortcuts(vec![
            (s!("tank"), s!("重装")),
            (s!("dps"), s!("治疗")),
        ]);
        assert_eq!(v.normalize("Tank").as_deref(), Some("重装"));
        assert_eq!(v.normalize("dps").as_deref(), Some("输出"));
        assert_eq!(v.shortcuts_for("重装").collect::<Vec<_>>(), vec!["tank"]);
    }

    #[test]
    fn display_label_falls_back_to_id() {
        let v = TagVocabulary::builtin();
        assert_eq!(v.to_display_label("支援机械"), "Robot");
        assert_eq!(v.to_display_label("healer"), "healer");
    }

    #[test]
    fn ids_and_aliases_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in TAGS {
            assert!(seen.insert(t.id), "duplicate id {}", t.id);
        }
        let mut aliases = std::collections::HashSet::new();
        for a in TAGS.iter().flat_map(|t| t.aliases) {
            assert!(aliases.insert(*a), "duplicate alias {a}");
            assert_eq!(alias_key(a), *a);
        }
    }
}
