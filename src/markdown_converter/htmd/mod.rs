//! HTML to Markdown rendering.
//!
//! A rule table keyed by tag name decides how each element is written.
//! Elements without a rule render their children. The table formatter lives
//! in [`element_handler::table`] and is reachable on its own through
//! [`render_table`] and [`format_table`].

pub(crate) mod dom_walker;
pub(crate) mod element_handler;
pub(crate) mod node_util;
pub(crate) mod text_util;

use std::collections::HashMap;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};
use url::Url;

use crate::config::{ConversionOptions, TableFormatting};
use element_handler::ElementHandlers;

pub use element_handler::table::format_table;

/// Flags inherited from ancestors while walking the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Scope {
    /// Inside `pre` or `code`: text is copied verbatim.
    pub(crate) is_pre: bool,
    /// Anchors emit only their text, images only their alt text.
    pub(crate) strip_links: bool,
    /// Emphasis handlers emit no delimiters.
    pub(crate) strip_formatting: bool,
}

impl Scope {
    pub(crate) fn for_table_cell(self, formatting: &TableFormatting) -> Self {
        Self {
            strip_links: self.strip_links || formatting.strip_links,
            strip_formatting: self.strip_formatting || formatting.strip_formatting,
            ..self
        }
    }

    pub(crate) fn pre(self) -> Self {
        Self {
            is_pre: true,
            ..self
        }
    }
}

/// An element being handled.
#[derive(Clone, Copy)]
pub(crate) struct Element<'a> {
    pub(crate) node: ElementRef<'a>,
    pub(crate) tag: &'a str,
    pub(crate) skipped_handlers: usize,
    pub(crate) scope: Scope,
}

impl<'a> Element<'a> {
    pub(crate) fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.value().attr(name)
    }

    pub(crate) fn tree_node(&self) -> NodeRef<'a, Node> {
        *self.node
    }
}

/// Everything one render call reads.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub conversion: ConversionOptions,
    /// Base for resolving `href` and `src`.
    pub base_url: Url,
    /// Resolved image URL to data URI, used by the `base64` image style.
    pub embedded_images: HashMap<String, String>,
    /// Filled prefix for downloaded image filenames.
    pub image_prefix: String,
}

impl RenderOptions {
    #[must_use]
    pub fn new(conversion: ConversionOptions, base_url: Url) -> Self {
        let image_prefix = conversion.image_prefix.clone();
        Self {
            conversion,
            base_url,
            embedded_images: HashMap::new(),
            image_prefix,
        }
    }

    #[must_use]
    pub fn with_embedded_images(mut self, embedded_images: HashMap<String, String>) -> Self {
        self.embedded_images = embedded_images;
        self
    }

    #[must_use]
    pub fn with_image_prefix(mut self, image_prefix: impl Into<String>) -> Self {
        self.image_prefix = image_prefix.into();
        self
    }
}

/// An image the rendered Markdown refers to by local filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDownload {
    pub url: String,
    pub filename: String,
}

/// Output of [`render_document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub markdown: String,
    /// Images to download, first-seen order, no duplicates.
    pub image_list: Vec<ImageDownload>,
}

/// Render a node (document, fragment or element) to Markdown.
#[must_use]
pub fn render(node: NodeRef<'_, Node>, options: &RenderOptions) -> String {
    render_document(node, options).markdown
}

/// Render a node and collect the images it references.
#[must_use]
pub fn render_document(node: NodeRef<'_, Node>, options: &RenderOptions) -> RenderedMarkdown {
    let handlers = ElementHandlers::new(options);

    let mut buffer = String::new();
    dom_walker::walk_node(&node, &mut buffer, &handlers, true, Scope::default());
    buffer.push_str(&handlers.append_all());

    let markdown = buffer.trim_matches(['\n', '\r', '\t']).to_string();
    tracing::debug!(
        markdown_len = markdown.len(),
        images = handlers.image_count(),
        "rendered markdown"
    );

    RenderedMarkdown {
        markdown,
        image_list: handlers.take_image_list(),
    }
}

/// Render a parsed document or fragment.
#[must_use]
pub fn render_html(html: &Html, options: &RenderOptions) -> RenderedMarkdown {
    render_document(html.tree.root(), options)
}

/// Render one `table` element through the table formatter.
#[must_use]
pub fn render_table(table: ElementRef<'_>, options: &RenderOptions) -> String {
    let handlers = ElementHandlers::new(options);
    let content = element_handler::table::render_table_element(&handlers, table, Scope::default());
    let mut markdown = content.trim_matches('\n').to_string();
    markdown.push_str(&handlers.append_all());
    markdown.trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenderOptions {
        RenderOptions::new(
            ConversionOptions::default(),
            Url::parse("https://example.com/blog/").expect("valid base"),
        )
    }

    #[test]
    fn renders_paragraphs_and_emphasis() {
        let html = Html::parse_fragment("<p>Hello <strong>bold</strong> and <em>soft</em></p><p>Next</p>");
        assert_eq!(
            render_html(&html, &options()).markdown,
            "Hello **bold** and _soft_\n\nNext"
        );
    }

    #[test]
    fn comments_render_nothing() {
        let html = Html::parse_fragment("<p>a<!-- hidden -->b</p>");
        assert_eq!(render_html(&html, &options()).markdown, "ab");
    }

    #[test]
    fn scripts_are_dropped() {
        let html = Html::parse_fragment("<p>keep</p><script>var x = 1;</script>");
        assert_eq!(render_html(&html, &options()).markdown, "keep");
    }
}
