//! Per-block rewriting.

use inlay_rules::{MatchResult, WidgetSpec, classify, classify_paired};

use crate::block::{Block, Rewrite, WidgetElement};
use crate::resolver::{IdResolver, ProfileTarget};

/// Replaces blocks holding a media link with embed widgets.
///
/// Each call handles one block and shares no mutable state with other calls,
/// so blocks can be rewritten concurrently. The only suspension point is the
/// resolver lookup for itch.io profile links.
///
/// # Algorithm
///
/// 1. Two-line blocks are tried as a paired Steam and itch.io widget.
/// 2. Otherwise the first matching single-link rule wins.
/// 3. Profile links get their embed id from the [`IdResolver`]; when the
///    lookup fails the block stays untouched.
#[derive(Debug, Clone, Default)]
pub struct BlockRewriter<R> {
    resolver: R,
}

impl<R: IdResolver> BlockRewriter<R> {
    /// Create a rewriter using `resolver` for profile link lookups.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Get the resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Rewrite one block in place.
    ///
    /// The block is replaced at most once; blocks that produce no widget are
    /// not touched.
    pub async fn rewrite<B: Block + ?Sized>(&self, block: &mut B) -> Rewrite {
        let text = block.text().into_owned();
        match self.widget_for(&text).await {
            Some(element) => {
                let kinds = element.kinds();
                block.replace_with(element);
                Rewrite::Replaced(kinds)
            }
            None => Rewrite::Untouched,
        }
    }

    /// Build the widget element for a block's text, if any.
    pub async fn widget_for(&self, text: &str) -> Option<WidgetElement> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some((first, second)) = classify_paired(text) {
            if let Some(element) = self.paired_widget(&first, &second).await {
                return Some(element);
            }
            tracing::debug!("Paired storefront widget incomplete, trying single-link rules");
        }

        let found = classify(text)?;
        self.build_widget(&found).await.map(WidgetElement::Single)
    }

    /// Recover the embed id for a profile link.
    ///
    /// Lookup failures are logged and reported as `None`.
    pub async fn recover_id(&self, target: &ProfileTarget) -> Option<String> {
        match self.resolver.resolve(target).await {
            Ok(id) => {
                tracing::debug!(owner = %target.owner, item = %target.item, id = %id, "Recovered embed id");
                Some(id)
            }
            Err(e) => {
                tracing::debug!(url = %target.lookup_url(), error = %e, "Embed id lookup failed");
                None
            }
        }
    }

    async fn paired_widget(
        &self,
        first: &MatchResult,
        second: &MatchResult,
    ) -> Option<WidgetElement> {
        let first = self.build_widget(first).await?;
        let second = self.build_widget(second).await?;
        Some(WidgetElement::Paired([first, second]))
    }

    async fn build_widget(&self, found: &MatchResult) -> Option<WidgetSpec> {
        if !found.kind.requires_network_resolution() {
            return found.widget();
        }
        let target = ProfileTarget::from_match(found)?;
        let id = self.recover_id(&target).await?;
        WidgetSpec::with_resolved_id(found, &id)
    }
}
