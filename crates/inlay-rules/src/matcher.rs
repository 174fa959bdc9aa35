//! Block classification against the rule table.

use crate::kind::{Provider, RuleKind};
use crate::rule::{Fields, rules};
use crate::widget::WidgetSpec;

/// A successful rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Kind of the rule that matched.
    pub kind: RuleKind,
    /// Fields extracted from the URL.
    pub fields: Fields,
}

impl MatchResult {
    /// Get an extracted field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Build the widget for this match.
    ///
    /// Returns None for kinds that need a network lookup first; use
    /// [`WidgetSpec::with_resolved_id`] for those.
    #[must_use]
    pub fn widget(&self) -> Option<WidgetSpec> {
        WidgetSpec::from_match(self)
    }
}

/// Classify a block of text.
///
/// Rules are evaluated in priority order and the first one that matches wins.
/// Text that no rule recognizes yields `None`.
#[must_use]
pub fn classify(text: &str) -> Option<MatchResult> {
    rules().iter().find_map(|rule| rule.apply(text))
}

/// Classify a block as a paired storefront widget.
///
/// The text must consist of exactly two non-empty lines, one holding a Steam
/// link and the other an itch.io link (embed or profile form), in either
/// order. Two links from the same storefront never pair.
///
/// # Example
///
/// ```
/// use inlay_rules::{RuleKind, classify_paired};
///
/// let text = "https://store.steampowered.com/app/620/\nhttps://itch.io/embed/555999";
/// let (first, second) = classify_paired(text).unwrap();
/// assert_eq!(first.kind, RuleKind::Steam);
/// assert_eq!(second.kind, RuleKind::ItchioEmbed);
/// ```
#[must_use]
pub fn classify_paired(text: &str) -> Option<(MatchResult, MatchResult)> {
    let mut lines = text.lines();
    let (Some(first), Some(second), None) = (lines.next(), lines.next(), lines.next()) else {
        return None;
    };

    let first = classify_pair_member(first)?;
    let second = classify_pair_member(second)?;

    match (first.kind.provider(), second.kind.provider()) {
        (Provider::Steam, Provider::Itchio) | (Provider::Itchio, Provider::Steam) => {
            Some((first, second))
        }
        _ => None,
    }
}

/// Classify one line of a paired block against the storefront rules only.
fn classify_pair_member(line: &str) -> Option<MatchResult> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    rules()
        .iter()
        .filter(|rule| rule.kind().is_pair_member())
        .find_map(|rule| rule.apply(line))
}
