//! Selector-based main content extraction.
//!
//! This adapter picks the article body by looking for semantic containers in
//! priority order (`<main>`, `<article>`, content-specific ids and classes),
//! falling back to `<body>`. Boilerplate inside the container (navigation,
//! headers, footers, sidebars, scripts, forms) is dropped unless the tree
//! normalizer marked it, or something inside it, for preservation.

use std::collections::HashSet;
use std::sync::LazyLock;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use super::{Article, ContentExtractor};
use crate::markdown_converter::html_preprocessing::PRESERVE_ATTR;

/// Maximum nesting depth serialized from the container.
///
/// Deeper branches are truncated with a warning.
const MAX_HTML_NESTING_DEPTH: usize = 256;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// ============================================================================
// CSS Selectors
// ============================================================================

// Hardcoded selectors should NEVER fail to parse - if they do, it's a bug.

fn parse_selectors(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|selector| {
            Selector::parse(selector).expect("BUG: hardcoded CSS selector is invalid")
        })
        .collect()
}

/// Content containers, highest priority first.
static CONTENT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_selectors(&[
        "main",
        "article",
        "[role='main']",
        "#main-content",
        ".main-content",
        "#content",
        ".content",
        ".post-content",
        ".entry-content",
        "[itemprop='articleBody']",
        ".article-body",
        ".story-body",
        "body",
    ])
});

static BOILERPLATE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_selectors(&[
        "nav",
        "header",
        "footer",
        "aside",
        "script",
        "style",
        "noscript",
        "form",
        "iframe",
        ".sidebar",
        "#sidebar",
        ".advertisement",
        ".social-share",
        ".related-posts",
        ".cookie-notice",
    ])
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid"));

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("BUG: hardcoded CSS selector 'h1' is invalid"));

static BASE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("base[href]").expect("BUG: hardcoded CSS selector 'base[href]' is invalid")
});

static BYLINE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[rel='author'], .byline")
        .expect("BUG: hardcoded CSS selector \"[rel='author'], .byline\" is invalid")
});

static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("BUG: hardcoded CSS selector 'p' is invalid"));

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("BUG: hardcoded CSS selector 'img' is invalid"));

fn meta_selector(attribute: &str, value: &str) -> Selector {
    Selector::parse(&format!("meta[{attribute}='{value}']"))
        .expect("BUG: hardcoded meta selector is invalid")
}

static META_AUTHOR: LazyLock<Selector> = LazyLock::new(|| meta_selector("name", "author"));
static META_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| meta_selector("name", "description"));
static META_KEYWORDS: LazyLock<Selector> = LazyLock::new(|| meta_selector("name", "keywords"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| meta_selector("property", "og:title"));
static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| meta_selector("property", "og:description"));
static OG_SITE_NAME: LazyLock<Selector> = LazyLock::new(|| meta_selector("property", "og:site_name"));
static PUBLISHED_TIME: LazyLock<Selector> =
    LazyLock::new(|| meta_selector("property", "article:published_time"));

// ============================================================================
// Extractor
// ============================================================================

/// Default [`ContentExtractor`]: first matching content container, minus boilerplate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorExtractor;

impl SelectorExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`ContentExtractor::extract`].
    #[must_use]
    pub fn extract_article(&self, document: &Html, base_url: &Url) -> Option<Article> {
        let root = document.root_element();
        let container = find_container(root)?;

        let removed = boilerplate_ids(container);
        let mut body = SerializedBody::default();
        body.push_children(container, &removed, 0);

        let has_images = container
            .select(&IMG_SELECTOR)
            .any(|img| !is_inside(img, &removed, container.id()));
        if body.text.trim().is_empty() && !has_images {
            tracing::debug!(
                container = container.value().name(),
                "content container is empty"
            );
            return None;
        }

        let content = Html::parse_fragment(&body.html);
        let text_content = body.text;
        let length = text_content.chars().count();

        let description = meta_content(root, &META_DESCRIPTION)
            .or_else(|| meta_content(root, &OG_DESCRIPTION))
            .unwrap_or_default();
        let excerpt = if description.is_empty() {
            first_paragraph(&content).unwrap_or_default()
        } else {
            description.clone()
        };
        let author = meta_content(root, &META_AUTHOR).unwrap_or_default();
        let byline = if author.is_empty() {
            first_text(root, &BYLINE_SELECTOR).unwrap_or_default()
        } else {
            author.clone()
        };
        let keywords = meta_content(root, &META_KEYWORDS)
            .map(|keywords| {
                keywords
                    .split(',')
                    .map(str::trim)
                    .filter(|keyword| !keyword.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let article = Article {
            title: page_title(root).unwrap_or_default(),
            author,
            byline,
            description,
            site_name: meta_content(root, &OG_SITE_NAME).unwrap_or_default(),
            base_uri: document_base(root, base_url).to_string(),
            keywords,
            content,
            text_content,
            length,
            excerpt,
            published_time: meta_content(root, &PUBLISHED_TIME).unwrap_or_default(),
        };

        tracing::debug!(
            container = container.value().name(),
            removed = removed.len(),
            length = article.length,
            "extracted article"
        );
        Some(article)
    }
}

impl ContentExtractor for SelectorExtractor {
    async fn extract(&self, document: Html, base_url: &Url) -> Option<Article> {
        self.extract_article(&document, base_url)
    }
}

/// First content container in priority order.
///
/// Elements carrying the preservation marker are parts of an article, never the
/// article itself.
fn find_container(root: ElementRef<'_>) -> Option<ElementRef<'_>> {
    CONTENT_SELECTORS.iter().find_map(|selector| {
        root.select(selector)
            .find(|element| element.value().attr(PRESERVE_ATTR).is_none())
    })
}

fn is_preserved(element: ElementRef<'_>) -> bool {
    element
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|node| node.value().attr(PRESERVE_ATTR).is_some())
}

fn boilerplate_ids(container: ElementRef<'_>) -> HashSet<NodeId> {
    container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| BOILERPLATE_SELECTORS.iter().any(|s| s.matches(element)))
        .filter(|element| !is_preserved(*element))
        .map(|element| element.id())
        .collect()
}

fn is_inside(element: ElementRef<'_>, removed: &HashSet<NodeId>, stop: NodeId) -> bool {
    element
        .ancestors()
        .take_while(|ancestor| ancestor.id() != stop)
        .any(|ancestor| removed.contains(&ancestor.id()))
}

/// The container's children as HTML, plus their visible text.
#[derive(Default)]
struct SerializedBody {
    html: String,
    text: String,
}

impl SerializedBody {
    fn push_children(&mut self, element: ElementRef<'_>, removed: &HashSet<NodeId>, depth: usize) {
        if depth > MAX_HTML_NESTING_DEPTH {
            tracing::warn!(
                element = element.value().name(),
                limit = MAX_HTML_NESTING_DEPTH,
                "maximum HTML nesting depth exceeded, truncating branch"
            );
            return;
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    self.text.push_str(text);
                    push_escaped(&mut self.html, text, false);
                }
                Node::Element(_) => {
                    let Some(child) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if removed.contains(&child.id()) {
                        continue;
                    }
                    let name = child.value().name();
                    self.html.push('<');
                    self.html.push_str(name);
                    for (attr, value) in child.value().attrs() {
                        self.html.push(' ');
                        self.html.push_str(attr);
                        self.html.push_str("=\"");
                        push_escaped(&mut self.html, value, true);
                        self.html.push('"');
                    }
                    self.html.push('>');

                    if VOID_ELEMENTS.contains(&name) {
                        continue;
                    }
                    self.push_children(child, removed, depth + 1);
                    self.html.push_str("</");
                    self.html.push_str(name);
                    self.html.push('>');
                }
                _ => {}
            }
        }
    }
}

fn push_escaped(output: &mut String, value: &str, in_attribute: bool) {
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if in_attribute => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            c => output.push(c),
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

fn meta_content(root: ElementRef<'_>, selector: &Selector) -> Option<String> {
    root.select(selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

fn first_text(root: ElementRef<'_>, selector: &Selector) -> Option<String> {
    root.select(selector)
        .map(|element| element.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|text| !text.is_empty())
}

fn page_title(root: ElementRef<'_>) -> Option<String> {
    first_text(root, &TITLE_SELECTOR)
        .or_else(|| meta_content(root, &OG_TITLE))
        .or_else(|| first_text(root, &H1_SELECTOR))
}

fn first_paragraph(content: &Html) -> Option<String> {
    first_text(content.root_element(), &PARAGRAPH_SELECTOR)
}

/// `<base href>` resolved against the page URL, else the page URL.
fn document_base(root: ElementRef<'_>, base_url: &Url) -> Url {
    root.select(&BASE_SELECTOR)
        .filter_map(|base| base.value().attr("href"))
        .find_map(|href| base_url.join(href.trim()).ok())
        .unwrap_or_else(|| base_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/post").expect("valid base")
    }

    #[test]
    fn prefers_main_and_drops_navigation() {
        let html = Html::parse_document(
            "<html><head><title>Page</title></head><body><nav>Menu</nav>\
             <main><p>Content</p><nav>Inner menu</nav></main></body></html>",
        );
        let article = SelectorExtractor::new()
            .extract_article(&html, &base())
            .expect("article");
        assert_eq!(article.title, "Page");
        assert!(article.text_content.contains("Content"));
        assert!(!article.text_content.contains("menu"));
    }

    #[test]
    fn keeps_preserved_boilerplate() {
        let html = Html::parse_document(&format!(
            "<body><article><p>Body</p><aside {PRESERVE_ATTR}=\"callout\">Note</aside></article></body>"
        ));
        let article = SelectorExtractor::new()
            .extract_article(&html, &base())
            .expect("article");
        assert!(article.text_content.contains("Note"));
    }

    #[test]
    fn reads_metadata() {
        let html = Html::parse_document(
            "<html><head><meta name=\"author\" content=\"Ada\">\
             <meta name=\"keywords\" content=\"rust, html ,\">\
             <meta property=\"og:site_name\" content=\"Site\">\
             <base href=\"/docs/\"></head><body><p>Text</p></body></html>",
        );
        let article = SelectorExtractor::new()
            .extract_article(&html, &base())
            .expect("article");
        assert_eq!(article.author, "Ada");
        assert_eq!(article.byline, "Ada");
        assert_eq!(article.keywords, vec!["rust", "html"]);
        assert_eq!(article.site_name, "Site");
        assert_eq!(article.base_uri, "https://example.com/docs/");
        assert_eq!(article.excerpt, "Text");
    }

    #[test]
    fn empty_page_has_no_article() {
        let html = Html::parse_document("<html><body><nav>Only menu</nav></body></html>");
        assert!(SelectorExtractor::new().extract_article(&html, &base()).is_none());
    }
}
