//! Markdown host for the block rewriter.
//!
//! Renders Markdown to HTML with every paragraph pulled out as a
//! [`ParagraphBlock`]. The HTML between paragraphs is kept as separate
//! segments, so after rewriting [`Document::into_html`] only has to join
//! segments and block HTML in order.

use std::borrow::Cow;
use std::sync::Arc;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use tokio::task::JoinSet;

use crate::block::{Block, WidgetElement};
use crate::resolver::IdResolver;
use crate::rewriter::BlockRewriter;

/// A rendered paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphBlock {
    text: String,
    html: String,
    replacement: Option<WidgetElement>,
}

impl ParagraphBlock {
    /// Rendered HTML of the paragraph, or of its replacement.
    #[must_use]
    pub fn html(&self) -> Cow<'_, str> {
        match &self.replacement {
            Some(element) => Cow::Owned(element.to_html()),
            None => Cow::Borrowed(&self.html),
        }
    }

    /// Widget element that replaced the paragraph, if any.
    #[must_use]
    pub fn replacement(&self) -> Option<&WidgetElement> {
        self.replacement.as_ref()
    }
}

impl Block for ParagraphBlock {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn replace_with(&mut self, element: WidgetElement) {
        self.replacement = Some(element);
    }
}

/// Counts reported after rewriting a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Paragraph blocks scanned.
    pub blocks: usize,
    /// Blocks replaced by a widget element.
    pub replaced: usize,
    /// Replacements that were paired storefront containers.
    pub paired: usize,
}

/// Piece of a rendered document.
#[derive(Debug, Clone)]
enum Segment {
    /// Rendered HTML between paragraphs.
    Html(String),
    /// Position of a paragraph block.
    Block {
        index: usize,
        /// The preceding HTML did not end a line (e.g. `<li>` of a loose list).
        newline_before: bool,
    },
}

/// A Markdown document split into HTML and paragraph blocks.
#[derive(Debug, Clone)]
pub struct Document {
    segments: Vec<Segment>,
    blocks: Vec<ParagraphBlock>,
}

impl Document {
    /// Render Markdown, collecting paragraphs as blocks.
    ///
    /// `gfm` enables tables, strikethrough and task lists.
    #[must_use]
    pub fn parse(markdown: &str, gfm: bool) -> Self {
        let mut segments = Vec::new();
        let mut blocks = Vec::new();
        let mut pending: Vec<Event<'_>> = Vec::new();
        let mut paragraph: Option<ParagraphCollector<'_>> = None;
        let mut end_newline = true;

        for event in Parser::new_ext(markdown, parser_options(gfm)) {
            match paragraph.take() {
                Some(mut collector) => {
                    let done = matches!(event, Event::End(TagEnd::Paragraph));
                    collector.push(event);
                    if done {
                        segments.push(Segment::Block {
                            index: blocks.len(),
                            newline_before: !end_newline,
                        });
                        blocks.push(collector.finish());
                        end_newline = true;
                    } else {
                        paragraph = Some(collector);
                    }
                }
                None if matches!(event, Event::Start(Tag::Paragraph)) => {
                    flush_html(&mut segments, &mut pending, &mut end_newline);
                    paragraph = Some(ParagraphCollector::new(event));
                }
                None => pending.push(event),
            }
        }
        flush_html(&mut segments, &mut pending, &mut end_newline);

        Self { segments, blocks }
    }

    /// Paragraph blocks in document order.
    #[must_use]
    pub fn blocks(&self) -> &[ParagraphBlock] {
        &self.blocks
    }

    /// Rewrite every block concurrently.
    ///
    /// Blocks are independent, so lookups for one block never hold up the
    /// others. Completion order is not significant; blocks keep their
    /// document positions.
    pub async fn rewrite_all<R>(&mut self, rewriter: &Arc<BlockRewriter<R>>) -> RenderSummary
    where
        R: IdResolver + 'static,
    {
        let mut summary = RenderSummary {
            blocks: self.blocks.len(),
            ..RenderSummary::default()
        };

        let mut tasks = JoinSet::new();
        for (index, block) in self.blocks.iter().enumerate() {
            let rewriter = Arc::clone(rewriter);
            let mut block = block.clone();
            tasks.spawn(async move {
                let outcome = rewriter.rewrite(&mut block).await;
                (index, block, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, block, outcome)) if outcome.is_replaced() => {
                    self.blocks[index] = block;
                }
                Ok(_) => {}
                // The block keeps its original paragraph
                Err(e) => tracing::warn!(error = %e, "Block rewrite task failed"),
            }
        }

        for block in &self.blocks {
            match block.replacement() {
                Some(WidgetElement::Paired(_)) => {
                    summary.replaced += 1;
                    summary.paired += 1;
                }
                Some(WidgetElement::Single(_)) => summary.replaced += 1,
                None => {}
            }
        }

        tracing::debug!(
            blocks = summary.blocks,
            replaced = summary.replaced,
            "Document rewrite completed"
        );
        summary
    }

    /// Assemble the final HTML.
    #[must_use]
    pub fn into_html(self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Html(html) => out.push_str(html),
                Segment::Block {
                    index,
                    newline_before,
                } => {
                    let Some(block) = self.blocks.get(*index) else {
                        continue;
                    };
                    if *newline_before {
                        out.push('\n');
                    }
                    out.push_str(&block.html());
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Render pending events as one HTML segment.
fn flush_html(segments: &mut Vec<Segment>, pending: &mut Vec<Event<'_>>, end_newline: &mut bool) {
    if pending.is_empty() {
        return;
    }
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, pending.drain(..));
    if !html.is_empty() {
        *end_newline = html.ends_with('\n');
        segments.push(Segment::Html(html));
    }
}

/// Parser options for the GFM setting.
fn parser_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    } else {
        Options::empty()
    }
}

/// Accumulates one paragraph's events and text content.
struct ParagraphCollector<'a> {
    events: Vec<Event<'a>>,
    text: String,
}

impl<'a> ParagraphCollector<'a> {
    fn new(start: Event<'a>) -> Self {
        Self {
            events: vec![start],
            text: String::new(),
        }
    }

    fn push(&mut self, event: Event<'a>) {
        match &event {
            Event::Text(text) | Event::Code(text) => self.text.push_str(text),
            Event::SoftBreak | Event::HardBreak => self.text.push('\n'),
            _ => {}
        }
        self.events.push(event);
    }

    fn finish(self) -> ParagraphBlock {
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, self.events.into_iter());
        let trimmed = html.trim_end().len();
        html.truncate(trimmed);

        ParagraphBlock {
            text: self.text,
            html,
            replacement: None,
        }
    }
}
