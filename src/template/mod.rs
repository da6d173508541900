//! Placeholder substitution for titles, filenames and front/back matter.
//!
//! A template is filled in four fixed phases:
//!
//! 1. `{key}` and `{key:kebab|snake|camel|pascal}` for every context field
//! 2. `{date:FORMAT}` against one captured instant
//! 3. `{keywords}` / `{keywords:SEP}`
//! 4. removal of every `{...}` token that is still left
//!
//! `date` and `keywords` are reserved, so an article field with either name can
//! never shadow them. Filling never fails: unknown placeholders disappear.

pub mod case;
pub mod date_format;

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Local, TimeZone};
use regex::{Captures, Regex};

use crate::content_extractor::Article;
use crate::utils::sanitize_filename;

pub use case::{camel_case, kebab_case, pascal_case, snake_case};
pub use date_format::format_date;

/// Context keys that never take part in per-field substitution.
const RESERVED_KEYS: [&str; 3] = ["content", "date", "keywords"];

static DATE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{date:([^}\n]+)\}")
        .expect("BUG: hardcoded date placeholder regex is statically valid")
});

static KEYWORDS_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{keywords(?::([^}\n]*))?\}")
        .expect("BUG: hardcoded keywords placeholder regex is statically valid")
});

// Innermost tokens only; cleanup repeats until nothing matches.
static LEFTOVER_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[^{}\n]*\}")
        .expect("BUG: hardcoded leftover placeholder regex is statically valid")
});

/// Metadata available to templates.
///
/// Fields keep insertion order, which is also the substitution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    fields: Vec<(String, String)>,
    keywords: Vec<String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context for an article: every metadata field plus the parts of its base URL.
    #[must_use]
    pub fn from_article(article: &Article) -> Self {
        let mut context = Self::new()
            .with_field("title", &article.title)
            .with_field("author", &article.author)
            .with_field("byline", &article.byline)
            .with_field("description", &article.description)
            .with_field("siteName", &article.site_name)
            .with_field("baseURI", &article.base_uri)
            .with_field("textContent", &article.text_content)
            .with_field("length", article.length.to_string())
            .with_field("excerpt", &article.excerpt)
            .with_field("publishedTime", &article.published_time)
            .with_keywords(article.keywords.iter().cloned());

        if let Ok(url) = url::Url::parse(&article.base_uri) {
            let host = match (url.host_str(), url.port()) {
                (Some(host), Some(port)) => format!("{host}:{port}"),
                (Some(host), None) => host.to_string(),
                _ => String::new(),
            };
            context.insert("host", host);
            context.insert("hostname", url.host_str().unwrap_or_default());
            context.insert("origin", url.origin().ascii_serialization());
            context.insert("pathname", url.path());
            context.insert("port", url.port().map(|p| p.to_string()).unwrap_or_default());
            context.insert("protocol", format!("{}:", url.scheme()));
            context.insert(
                "search",
                url.query().map(|q| format!("?{q}")).unwrap_or_default(),
            );
            context.insert(
                "hash",
                url.fragment().map(|f| format!("#{f}")).unwrap_or_default(),
            );
        }

        context
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
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

    /// Set a field, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Fill `template` using the current local time for date placeholders.
///
/// When `disallowed` is given, every field value is passed through
/// [`sanitize_filename`] before substitution.
#[must_use]
pub fn fill(template: &str, context: &TemplateContext, disallowed: Option<&str>) -> String {
    fill_at(template, context, disallowed, &Local::now())
}

/// Fill `template`, resolving every `{date:...}` against `now`.
#[must_use]
pub fn fill_at<Tz>(
    template: &str,
    context: &TemplateContext,
    disallowed: Option<&str>,
    now: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if !template.contains('{') {
        return template.to_string();
    }

    let output = substitute_fields(template, context, disallowed);
    let output = substitute_dates(&output, now);
    let output = substitute_keywords(&output, context.keywords());
    remove_leftover_placeholders(output)
}

fn substitute_fields(template: &str, context: &TemplateContext, disallowed: Option<&str>) -> String {
    let mut output = template.to_string();

    for (key, value) in context.fields() {
        if RESERVED_KEYS.contains(&key) || !output.contains(&format!("{{{key}")) {
            continue;
        }

        let value = match disallowed {
            Some(chars) if !value.is_empty() => sanitize_filename(value, Some(chars)),
            _ => value.to_string(),
        };

        output = output.replace(&format!("{{{key}}}"), &value);
        for (suffix, transform) in case::CASE_TRANSFORMS {
            let placeholder = format!("{{{key}:{suffix}}}");
            if output.contains(&placeholder) {
                output = output.replace(&placeholder, &transform(&value));
            }
        }
    }

    output
}

fn substitute_dates<Tz>(input: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    DATE_PLACEHOLDER
        .replace_all(input, |caps: &Captures<'_>| format_date(&caps[1], now))
        .into_owned()
}

fn substitute_keywords(input: &str, keywords: &[String]) -> String {
    KEYWORDS_PLACEHOLDER
        .replace_all(input, |caps: &Captures<'_>| {
            let separator = caps
                .get(1)
                .map_or_else(|| ",".to_string(), |sep| unescape_separator(sep.as_str()));
            keywords.join(&separator)
        })
        .into_owned()
}

/// Resolve `\n`, `\t`, `\r`, `\\`, `\"` and `\/` in a keyword separator.
/// Any other backslash sequence is kept as written.
pub fn unescape_separator(separator: &str) -> String {
    let mut out = String::with_capacity(separator.len());
    let mut chars = separator.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(escaped @ ('\\' | '"' | '/')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn remove_leftover_placeholders(mut output: String) -> String {
    while LEFTOVER_PLACEHOLDER.is_match(&output) {
        output = LEFTOVER_PLACEHOLDER.replace_all(&output, "").into_owned();
    }
    output
}
