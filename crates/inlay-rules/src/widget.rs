//! Widget specifications and their HTML form.

use std::fmt::Write;

use crate::html::escape_html;
use crate::kind::RuleKind;
use crate::matcher::MatchResult;

/// CSS class of the container wrapping a paired Steam and itch.io widget.
pub const PAIRED_CONTAINER_CLASS: &str = "steam-itchio-iframe-container";

/// Everything needed to build the `<iframe>` that replaces a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSpec {
    /// Kind of the rule the widget was built from.
    pub kind: RuleKind,
    /// Embed URL loaded by the frame.
    pub source_url: String,
    /// CSS classes, provider class first, without duplicates.
    pub classes: Vec<String>,
}

impl WidgetSpec {
    /// Create a widget carrying only its provider class.
    #[must_use]
    pub fn new(kind: RuleKind, source_url: impl Into<String>) -> Self {
        Self {
            kind,
            source_url: source_url.into(),
            classes: vec![kind.provider().iframe_class().to_owned()],
        }
    }

    /// Add a CSS class. Classes already present are ignored.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Build the widget for a match that carries its own identifier.
    pub(crate) fn from_match(found: &MatchResult) -> Option<Self> {
        let source = match found.kind {
            RuleKind::Spotify => format!(
                "https://open.spotify.com/embed/{}/{}?theme=1",
                found.field("type")?,
                found.field("id")?
            ),
            RuleKind::Youtube => format!("https://www.youtube.com/embed/{}", found.field("id")?),
            RuleKind::Steam => format!(
                "https://store.steampowered.com/widget/{}?t=",
                found.field("id")?
            ),
            RuleKind::ItchioEmbed => itchio_source(found.field("id")?),
            RuleKind::ItchioProfile => return None,
        };

        let widget = Self::new(found.kind, source);
        if found.kind == RuleKind::Spotify {
            return Some(widget.with_class(found.field("type")?));
        }
        Some(widget)
    }

    /// Build the widget for a match whose identifier was looked up separately.
    ///
    /// `id` must be the numeric itch.io game id. Matches that carry their own
    /// identifier ignore `id` and build their usual widget.
    #[must_use]
    pub fn with_resolved_id(found: &MatchResult, id: &str) -> Option<Self> {
        if found.kind != RuleKind::ItchioProfile {
            return Self::from_match(found);
        }
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::new(found.kind, itchio_source(id)))
    }

    /// Space-separated `class` attribute value.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    /// Render the widget as a lazily loaded `<iframe>`.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.source_url.len() + 64);
        self.write_html(&mut out);
        out
    }

    /// Append the widget's `<iframe>` to `out`.
    pub fn write_html(&self, out: &mut String) {
        write!(
            out,
            r#"<iframe class="{}" src="{}" loading="lazy"></iframe>"#,
            escape_html(&self.class_attr()),
            escape_html(&self.source_url)
        )
        .unwrap();
    }
}

fn itchio_source(id: &str) -> String {
    format!("https://itch.io/embed/{id}?dark=true")
}
