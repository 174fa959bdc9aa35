//! Block rewriting for inlay.
//!
//! This crate turns blocks of rendered text that hold a recognizable media
//! link into embed widgets:
//! - [`BlockRewriter`] classifies one block and replaces it with a widget
//! - [`IdResolver`] recovers itch.io game ids that profile URLs do not carry
//! - [`HttpResolver`] performs that lookup over HTTP
//! - [`Document`] is a Markdown host that exposes every paragraph as a [`Block`]
//!
//! # Failure Handling
//!
//! Rewriting never fails. Text that matches no rule, a malformed URL and a
//! failed id lookup all leave the block untouched.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use inlay_rewriter::{BlockRewriter, Document, HttpResolver};
//!
//! let rewriter = Arc::new(BlockRewriter::new(HttpResolver::new()));
//! let mut document = Document::parse("https://youtu.be/XYZ987\n", true);
//! let summary = document.rewrite_all(&rewriter).await;
//! assert_eq!(summary.replaced, 1);
//! let html = document.into_html();
//! ```

mod block;
mod consts;
mod document;
mod http;
mod resolver;
mod rewriter;

pub use block::{Block, Rewrite, WidgetElement};
pub use consts::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use document::{Document, ParagraphBlock, RenderSummary};
pub use http::HttpResolver;
pub use resolver::{IdResolver, NoResolver, ProfileTarget, ResolveError, extract_embed_id};
pub use rewriter::BlockRewriter;
