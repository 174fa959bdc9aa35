//! The static, priority-ordered rule table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::kind::RuleKind;
use crate::matcher::MatchResult;

/// Named fields extracted from a matched URL (e.g. `type`, `id`, `owner`).
pub type Fields = BTreeMap<&'static str, String>;

/// Turns regex captures into fields; `None` means a malformed capture.
type Extractor = fn(&Captures<'_>) -> Option<Fields>;

/// One recognizable URL shape.
///
/// A rule pairs a pattern with an extractor. A pattern match whose extractor
/// cannot produce every required field counts as no match.
pub struct Rule {
    kind: RuleKind,
    pattern: Regex,
    extract: Extractor,
}

impl Rule {
    fn new(kind: RuleKind, pattern: &str, extract: Extractor) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).unwrap(),
            extract,
        }
    }

    /// Widget kind this rule produces.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Apply the rule to raw text.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<MatchResult> {
        let caps = self.pattern.captures(text)?;
        let fields = (self.extract)(&caps)?;
        Some(MatchResult {
            kind: self.kind,
            fields,
        })
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

static RULES: LazyLock<[Rule; 5]> = LazyLock::new(|| {
    [
        Rule::new(
            RuleKind::Spotify,
            r"(?:https|http)://open\.spotify\.com.*?/(\w*)/(\w*)(?:$|\?)",
            |caps| Some(fields([("type", required(caps, 1)?), ("id", required(caps, 2)?)])),
        ),
        Rule::new(
            RuleKind::Youtube,
            concat!(
                r"(?:https|http)://youtu\.be/([\w-]+)(?:$|\?)",
                r"|(?:https|http)://www\.youtube\.com/embed/([\w-]+)(?:$|\?)",
                r"|(?:https|http)://www\.youtube\.com/watch\?v=([\w-]+)(?:$|&)",
            ),
            |caps| {
                let id = (1..=3).find_map(|idx| required(caps, idx))?;
                Some(fields([("id", id)]))
            },
        ),
        Rule::new(
            RuleKind::Steam,
            r"(?:https|http)://store\.steampowered\.com/.*?(\d+?)(?:$|\?|/)",
            |caps| Some(fields([("id", required(caps, 1)?)])),
        ),
        Rule::new(
            RuleKind::ItchioEmbed,
            r"(?:https|http)://itch\.io/.*?(\d+?)(?:$|\?|/)",
            |caps| Some(fields([("id", required(caps, 1)?)])),
        ),
        Rule::new(
            RuleKind::ItchioProfile,
            r"(?:https|http)://([\w-]+)\.itch\.io/([\w-]+)(?:$|\?|/)",
            |caps| Some(fields([("owner", required(caps, 1)?), ("item", required(caps, 2)?)])),
        ),
    ]
});

/// The rule table in priority order.
#[must_use]
pub fn rules() -> &'static [Rule] {
    RULES.as_slice()
}

/// Non-empty text of a capture group.
fn required(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn fields<const N: usize>(pairs: [(&'static str, String); N]) -> Fields {
    pairs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rule(kind: RuleKind) -> &'static Rule {
        rules().iter().find(|r| r.kind() == kind).unwrap()
    }

    #[test]
    fn test_rule_table_follows_priority_order() {
        let kinds: Vec<_> = rules().iter().map(Rule::kind).collect();
        assert_eq!(kinds, RuleKind::ALL.to_vec());
    }

    #[test]
    fn test_spotify_rule_extracts_type_and_id() {
        let found = rule(RuleKind::Spotify)
            .apply("https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy?si=xyz")
            .unwrap();
        assert_eq!(found.field("type"), Some("album"));
        assert_eq!(found.field("id"), Some("4aawyAB9vmqN3uQ7FjRGTy"));
    }

    #[test]
    fn test_spotify_rule_with_locale_prefix() {
        let found = rule(RuleKind::Spotify)
            .apply("https://open.spotify.com/intl-it/track/abc123")
            .unwrap();
        assert_eq!(found.field("type"), Some("track"));
        assert_eq!(found.field("id"), Some("abc123"));
    }

    #[test]
    fn test_spotify_rule_empty_id_is_no_match() {
        assert!(
            rule(RuleKind::Spotify)
                .apply("https://open.spotify.com/track/?si=1")
                .is_none()
        );
    }

    #[test]
    fn test_youtube_rule_url_shapes() {
        let youtube = rule(RuleKind::Youtube);
        for url in [
            "http://youtu.be/XYZ987",
            "https://youtu.be/XYZ987?t=42",
            "https://www.youtube.com/embed/XYZ987",
            "https://www.youtube.com/watch?v=XYZ987",
            "https://www.youtube.com/watch?v=XYZ987&list=PL1",
        ] {
            let found = youtube.apply(url).unwrap_or_else(|| panic!("no match: {url}"));
            assert_eq!(found.field("id"), Some("XYZ987"), "url: {url}");
        }
    }

    #[test]
    fn test_youtube_rule_accepts_dash_and_underscore() {
        let found = rule(RuleKind::Youtube)
            .apply("https://youtu.be/a-b_c")
            .unwrap();
        assert_eq!(found.field("id"), Some("a-b_c"));
    }

    #[test]
    fn test_steam_rule_extracts_app_id() {
        let found = rule(RuleKind::Steam)
            .apply("https://store.steampowered.com/app/1145360/Hades/")
            .unwrap();
        assert_eq!(found.field("id"), Some("1145360"));
    }

    #[test]
    fn test_steam_rule_id_at_end() {
        let found = rule(RuleKind::Steam)
            .apply("https://store.steampowered.com/app/620")
            .unwrap();
        assert_eq!(found.field("id"), Some("620"));
    }

    #[test]
    fn test_itchio_embed_rule() {
        let found = rule(RuleKind::ItchioEmbed)
            .apply("https://itch.io/embed/555999?dark=true")
            .unwrap();
        assert_eq!(found.field("id"), Some("555999"));
    }

    #[test]
    fn test_itchio_profile_rule() {
        let found = rule(RuleKind::ItchioProfile)
            .apply("https://some-dev.itch.io/cool-game")
            .unwrap();
        assert_eq!(found.field("owner"), Some("some-dev"));
        assert_eq!(found.field("item"), Some("cool-game"));
    }

    #[test]
    fn test_itchio_profile_rule_rejects_foreign_host() {
        assert!(
            rule(RuleKind::ItchioProfile)
                .apply("https://user@evil.example#.itch.io/game")
                .is_none()
        );
    }

    #[test]
    fn test_itchio_profile_rule_ignores_bare_itchio() {
        assert!(
            rule(RuleKind::ItchioProfile)
                .apply("https://itch.io/embed/1")
                .is_none()
        );
    }

    #[test]
    fn test_rules_never_match_plain_text() {
        for rule in rules() {
            assert!(rule.apply("just a paragraph of text").is_none());
        }
    }
}
