use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use scraper::{ElementRef, Html};
use url::Url;

use super::html_preprocessing::normalize;
use super::htmd::{ImageDownload, RenderOptions, render_html};
use crate::config::{ConversionOptions, ImageStyle};
use crate::content_extractor::{Article, ContentExtractor};
use crate::error::{ClipError, ClipResult};
use crate::resource_fetch::ResourceFetcher;
use crate::template::{TemplateContext, fill_at};
use crate::utils::constants::{MARKDOWN_EXTENSION, MAX_HTML_SIZE, UNTITLED_FILENAME};
use crate::utils::{resolve_against, sanitize_filename};

/// A finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClippedDocument {
    /// Filled title template
    pub title: String,
    /// Sanitized title plus `.md`
    pub filename: String,
    /// Filled clips folder template, possibly empty
    pub folder: String,
    /// Front matter, body and back matter
    pub markdown: String,
    /// Images the Markdown refers to by local filename
    pub image_list: Vec<ImageDownload>,
}

impl ClippedDocument {
    /// `folder/filename`, or just the filename without a folder.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let folder = self.folder.trim_matches('/');
        if folder.is_empty() {
            PathBuf::from(&self.filename)
        } else {
            PathBuf::from(folder).join(&self.filename)
        }
    }
}

/// Runs the conversion pipeline with a pluggable extractor and fetcher.
#[derive(Debug, Clone)]
pub struct MarkdownClipper<E, F> {
    extractor: E,
    fetcher: F,
    options: ConversionOptions,
}

impl<E, F> MarkdownClipper<E, F>
where
    E: ContentExtractor,
    F: ResourceFetcher,
{
    #[must_use]
    pub fn new(extractor: E, fetcher: F, options: ConversionOptions) -> Self {
        Self {
            extractor,
            fetcher,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Parse `html` as a full page and clip it.
    ///
    /// # Errors
    ///
    /// `DocumentTooLarge` above the input size limit, otherwise as [`Self::clip`].
    pub async fn clip_str(&self, html: &str, base_uri: &str) -> ClipResult<ClippedDocument> {
        if html.len() > MAX_HTML_SIZE {
            return Err(ClipError::DocumentTooLarge {
                size: html.len(),
                limit: MAX_HTML_SIZE,
            });
        }
        self.clip(Html::parse_document(html), base_uri).await
    }

    /// Convert a parsed page into a Markdown document.
    ///
    /// # Errors
    ///
    /// `InvalidBaseUrl` when `base_uri` is not absolute, `NoArticleContent` when the
    /// extractor finds nothing.
    pub async fn clip(&self, mut document: Html, base_uri: &str) -> ClipResult<ClippedDocument> {
        let base_url =
            Url::parse(base_uri).map_err(|e| ClipError::invalid_base_url(base_uri, e))?;

        let report = normalize(&mut document);
        tracing::debug!(edits = report.total(), "normalized page");

        let article = self
            .extractor
            .extract(document, &base_url)
            .await
            .ok_or(ClipError::NoArticleContent)?;

        let embedded = if self.options.image_style == ImageStyle::Base64 {
            self.embed_images(&article).await
        } else {
            HashMap::new()
        };

        assemble_document(&article, &self.options, embedded, &Local::now())
    }

    /// Fetch every image of the article once, in document order.
    ///
    /// Failed fetches are logged and the image keeps its URL.
    async fn embed_images(&self, article: &Article) -> HashMap<String, String> {
        let base = article_base(article);
        let mut embedded = HashMap::new();

        for url in image_sources(&article.content, base.as_ref()) {
            if embedded.contains_key(&url) {
                continue;
            }
            match self.fetcher.fetch(&url).await {
                Ok(resource) => {
                    let data_uri = resource.to_data_uri(&url);
                    embedded.insert(url, data_uri);
                }
                Err(e) => tracing::warn!(url = %url, error = %e, "image not embedded"),
            }
        }

        embedded
    }
}

/// Render `article` and fill every template of `options`.
///
/// `embedded` maps resolved image URLs to data URIs. `now` is the instant every
/// `{date:...}` placeholder renders.
///
/// # Errors
///
/// `InvalidBaseUrl` when the article's base URI is not an absolute URL.
pub fn assemble_document<Tz>(
    article: &Article,
    options: &ConversionOptions,
    embedded: HashMap<String, String>,
    now: &DateTime<Tz>,
) -> ClipResult<ClippedDocument>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let base_url = Url::parse(&article.base_uri)
        .map_err(|e| ClipError::invalid_base_url(&article.base_uri, e))?;

    let context = TemplateContext::from_article(article);
    let disallowed = Some(options.disallowed_chars.as_str());

    let title = fill_at(&options.title, &context, disallowed, now);
    let filename = document_filename(&title, disallowed);
    let folder = fill_at(&options.md_clips_folder, &context, disallowed, now);
    let image_prefix = fill_at(&options.image_prefix, &context, disallowed, now);

    let render_options = RenderOptions::new(options.clone(), base_url)
        .with_embedded_images(embedded)
        .with_image_prefix(image_prefix);
    let rendered = render_html(&article.content, &render_options);

    let markdown = if options.include_template {
        let frontmatter = fill_at(&options.frontmatter, &context, None, now);
        let backmatter = fill_at(&options.backmatter, &context, None, now);
        join_parts(&frontmatter, &rendered.markdown, &backmatter)
    } else {
        rendered.markdown
    };

    tracing::debug!(
        title = %title,
        markdown_len = markdown.len(),
        images = rendered.image_list.len(),
        "assembled document"
    );

    Ok(ClippedDocument {
        title,
        filename,
        folder,
        markdown,
        image_list: rendered.image_list,
    })
}

/// Sanitized title plus the Markdown extension, never a bare `.md`.
fn document_filename(title: &str, disallowed: Option<&str>) -> String {
    let stem = sanitize_filename(title, disallowed);
    if stem.trim().is_empty() {
        format!("{UNTITLED_FILENAME}.{MARKDOWN_EXTENSION}")
    } else {
        format!("{stem}.{MARKDOWN_EXTENSION}")
    }
}

/// Concatenate the parts, with a newline where two non-empty parts would touch.
fn join_parts(frontmatter: &str, body: &str, backmatter: &str) -> String {
    let mut markdown = String::with_capacity(frontmatter.len() + body.len() + backmatter.len() + 2);
    for part in [frontmatter, body, backmatter] {
        if part.is_empty() {
            continue;
        }
        if !markdown.is_empty() && !markdown.ends_with('\n') && !part.starts_with('\n') {
            markdown.push('\n');
        }
        markdown.push_str(part);
    }
    markdown
}

fn article_base(article: &Article) -> Option<Url> {
    Url::parse(&article.base_uri).ok()
}

/// Resolved `src` of every attached `img`, document order, repeats included.
fn image_sources(content: &Html, base: Option<&Url>) -> Vec<String> {
    content
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "img")
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty() && !src.starts_with("data:"))
        .map(|src| match base {
            Some(base) => resolve_against(src, base),
            None => src.to_string(),
        })
        .collect()
}
