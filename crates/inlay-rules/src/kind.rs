//! Widget kinds recognized by the rule table.

use std::fmt;

/// Kind of media link a rule recognizes.
///
/// Declaration order is the rule priority order: when a block matches more
/// than one rule, the kind listed first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    /// Spotify track, album, playlist or artist link.
    Spotify,
    /// `YouTube` video link (short, embed or watch URL).
    Youtube,
    /// Steam store page.
    Steam,
    /// itch.io link that already carries the numeric game id.
    ItchioEmbed,
    /// itch.io `{owner}.itch.io/{item}` page; the numeric id must be looked up.
    ItchioProfile,
}

impl RuleKind {
    /// All kinds in priority order.
    pub const ALL: [Self; 5] = [
        Self::Spotify,
        Self::Youtube,
        Self::Steam,
        Self::ItchioEmbed,
        Self::ItchioProfile,
    ];

    /// Return kind as string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::Youtube => "youtube",
            Self::Steam => "steam",
            Self::ItchioEmbed => "itchio-embed",
            Self::ItchioProfile => "itchio-profile",
        }
    }

    /// Service that hosts the embedded widget.
    #[must_use]
    pub fn provider(self) -> Provider {
        match self {
            Self::Spotify => Provider::Spotify,
            Self::Youtube => Provider::Youtube,
            Self::Steam => Provider::Steam,
            Self::ItchioEmbed | Self::ItchioProfile => Provider::Itchio,
        }
    }

    /// Whether the widget id has to be recovered with a network lookup.
    #[must_use]
    pub fn requires_network_resolution(self) -> bool {
        matches!(self, Self::ItchioProfile)
    }

    /// Whether this kind can take part in a paired storefront widget.
    #[must_use]
    pub fn is_pair_member(self) -> bool {
        matches!(self.provider(), Provider::Steam | Provider::Itchio)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service an embed widget is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Spotify,
    Youtube,
    Steam,
    Itchio,
}

impl Provider {
    /// Return provider as string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::Youtube => "youtube",
            Self::Steam => "steam",
            Self::Itchio => "itchio",
        }
    }

    /// CSS class every widget of this provider carries.
    #[must_use]
    pub fn iframe_class(self) -> &'static str {
        match self {
            Self::Spotify => "spotify-iframe",
            Self::Youtube => "youtube-iframe",
            Self::Steam => "steam-iframe",
            Self::Itchio => "itchio-iframe",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
