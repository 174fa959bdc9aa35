//! URL pattern rules for recognizing embeddable media links.
//!
//! This crate is the pattern-matching half of inlay. It classifies a block of
//! rendered text against a fixed, priority-ordered rule table and turns the
//! result into a [`WidgetSpec`] describing the `<iframe>` that replaces it.
//!
//! # Rule Order
//!
//! Rules are evaluated in [`RuleKind::ALL`] order and the first match wins:
//!
//! 1. Spotify (`open.spotify.com/{type}/{id}`)
//! 2. `YouTube` (`youtu.be`, `/embed/`, `/watch?v=`)
//! 3. Steam store pages
//! 4. itch.io embed links (`itch.io/embed/{id}`)
//! 5. itch.io profile links (`{owner}.itch.io/{item}`), which need a network
//!    lookup before a widget can be built
//!
//! Two-line blocks holding one Steam and one itch.io link are checked first
//! with [`classify_paired`].
//!
//! # Example
//!
//! ```
//! use inlay_rules::{RuleKind, classify};
//!
//! let found = classify("http://open.spotify.com/track/abc123").unwrap();
//! assert_eq!(found.kind, RuleKind::Spotify);
//!
//! let widget = found.widget().unwrap();
//! assert_eq!(widget.source_url, "https://open.spotify.com/embed/track/abc123?theme=1");
//! ```

mod html;
mod kind;
mod matcher;
mod rule;
mod widget;

pub use html::escape_html;
pub use kind::{Provider, RuleKind};
pub use matcher::{MatchResult, classify, classify_paired};
pub use rule::{Fields, Rule, rules};
pub use widget::{PAIRED_CONTAINER_CLASS, WidgetSpec};
