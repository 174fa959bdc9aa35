//! Embed id recovery for itch.io profile links.
//!
//! Profile URLs (`https://{owner}.itch.io/{item}`) name a game but not the
//! numeric id the embed widget needs. The id is recovered from the page's
//! `/embed` endpoint by an [`IdResolver`].

use std::future::Future;
use std::sync::LazyLock;

use inlay_rules::{MatchResult, RuleKind};
use regex::Regex;

/// Marker surrounding the game id in the embed endpoint's HTML.
static EMBED_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"embed\\/(\d+?)&quot").unwrap());

/// Owner and item of an itch.io profile link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTarget {
    /// Account name (the subdomain).
    pub owner: String,
    /// Game slug (the first path segment).
    pub item: String,
}

impl ProfileTarget {
    /// Create a new profile target.
    pub fn new(owner: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            item: item.into(),
        }
    }

    /// Extract the target from an itch.io profile match.
    ///
    /// Returns None for any other kind of match.
    #[must_use]
    pub fn from_match(found: &MatchResult) -> Option<Self> {
        if found.kind != RuleKind::ItchioProfile {
            return None;
        }
        Some(Self::new(found.field("owner")?, found.field("item")?))
    }

    /// URL of the page whose body carries the embed id.
    #[must_use]
    pub fn lookup_url(&self) -> String {
        format!("https://{}.itch.io/{}/embed", self.owner, self.item)
    }
}

/// Embed id lookup error.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Request could not be sent or no response arrived.
    #[error("HTTP error: {0}")]
    Http(String),
    /// Server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),
    /// Response body could not be read as text.
    #[error("unreadable response body: {0}")]
    Body(String),
    /// Response did not contain an embed id.
    #[error("no embed id in response")]
    IdNotFound,
    /// Network lookups are turned off.
    #[error("embed id lookup disabled")]
    Disabled,
    /// Blocking lookup task panicked or was cancelled.
    #[error("lookup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Recovers the numeric embed id behind an itch.io profile link.
///
/// Implementations perform at most one lookup per call and do not retry.
pub trait IdResolver: Send + Sync {
    /// Look up the embed id for `target`.
    fn resolve(
        &self,
        target: &ProfileTarget,
    ) -> impl Future<Output = Result<String, ResolveError>> + Send;
}

/// Resolver used when network lookups are disabled; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl IdResolver for NoResolver {
    async fn resolve(&self, _target: &ProfileTarget) -> Result<String, ResolveError> {
        Err(ResolveError::Disabled)
    }
}

/// Find the embed id in an embed endpoint response.
///
/// The endpoint answers with JSON whose `content` field holds HTML; that
/// field is searched first. Bodies that are not such JSON, or whose content
/// has no id, are searched as raw text.
#[must_use]
pub fn extract_embed_id(body: &str) -> Option<String> {
    let content = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("content")?.as_str().map(str::to_owned));

    content
        .as_deref()
        .and_then(scan_embed_id)
        .or_else(|| scan_embed_id(body))
}

fn scan_embed_id(text: &str) -> Option<String> {
    EMBED_ID_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}
