//! Blocks and the widget elements that replace them.

use std::borrow::Cow;

use inlay_rules::{PAIRED_CONTAINER_CLASS, RuleKind, WidgetSpec};

/// One unit of rendered content considered for replacement.
///
/// The host owns the block. The rewriter only reads its text and, when a rule
/// matches, asks for the whole block to be replaced once.
pub trait Block {
    /// Concatenated text content of the block.
    fn text(&self) -> Cow<'_, str>;

    /// Replace the block with a widget element.
    fn replace_with(&mut self, element: WidgetElement);
}

/// Replacement produced for a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetElement {
    /// A single embed frame.
    Single(WidgetSpec),
    /// A Steam and an itch.io frame in one container, in line order.
    Paired([WidgetSpec; 2]),
}

impl WidgetElement {
    /// Kinds of the widgets in this element.
    #[must_use]
    pub fn kinds(&self) -> Vec<RuleKind> {
        match self {
            Self::Single(widget) => vec![widget.kind],
            Self::Paired(widgets) => widgets.iter().map(|w| w.kind).collect(),
        }
    }

    /// Render the element as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Single(widget) => widget.to_html(),
            Self::Paired(widgets) => {
                let mut out = format!(r#"<div class="{PAIRED_CONTAINER_CLASS}">"#);
                for widget in widgets {
                    widget.write_html(&mut out);
                }
                out.push_str("</div>");
                out
            }
        }
    }
}

/// Outcome of rewriting one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// No rule produced a widget; the block was left as is.
    Untouched,
    /// The block was replaced by widgets of these kinds.
    Replaced(Vec<RuleKind>),
}

impl Rewrite {
    /// Whether the block was replaced.
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced(_))
    }
}
