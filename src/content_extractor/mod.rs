//! Content extraction: from a whole page to an [`Article`].
//!
//! The conversion pipeline only depends on the [`ContentExtractor`] trait.
//! [`SelectorExtractor`] is the built-in adapter; callers with a readability
//! implementation plug it in through the same trait.

mod selector_extractor;

use scraper::Html;
use url::Url;

pub use selector_extractor::SelectorExtractor;

/// Extracted page content plus metadata.
///
/// Metadata fields are empty strings when the page does not provide them.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub author: String,
    pub byline: String,
    pub description: String,
    pub site_name: String,
    /// Absolute URL the article's relative links resolve against
    pub base_uri: String,
    pub keywords: Vec<String>,
    /// Article body as a parsed fragment
    pub content: Html,
    pub text_content: String,
    /// Character count of `text_content`
    pub length: usize,
    pub excerpt: String,
    pub published_time: String,
}

impl Article {
    /// An article around `content` with empty metadata.
    ///
    /// `text_content` and `length` are computed from the fragment.
    #[must_use]
    pub fn new(content: Html, base_uri: impl Into<String>) -> Self {
        let text_content: String = content.root_element().text().collect();
        let length = text_content.chars().count();
        Self {
            title: String::new(),
            author: String::new(),
            byline: String::new(),
            description: String::new(),
            site_name: String::new(),
            base_uri: base_uri.into(),
            keywords: Vec::new(),
            content,
            text_content,
            length,
            excerpt: String::new(),
            published_time: String::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// Turns a normalized page into an article, or `None` when the page has no content.
///
/// Parsed trees are not `Send`, so implementations run on the caller's task.
#[allow(async_fn_in_trait)]
pub trait ContentExtractor {
    async fn extract(&self, document: Html, base_url: &Url) -> Option<Article>;
}
