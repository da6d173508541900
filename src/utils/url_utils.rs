//! URL resolution utilities.
//!
//! Links and image sources are joined onto the article's base URL with a
//! simple rule set:
//!
//! - an `href` that parses as an absolute URL is returned unchanged (this covers
//!   `data:`, `mailto:`, `tel:` and any other scheme);
//! - an `href` starting with `/` is joined to the base URL's origin;
//! - anything else is appended to the full base URL, inserting a `/` only when
//!   the base does not already end with one.
//!
//! The last rule does not drop the final path segment of a non-directory base:
//! `photo.jpg` against `https://example.com/post.html` becomes
//! `https://example.com/post.html/photo.jpg`.

use url::Url;

use crate::error::{ClipError, ClipResult};

/// Resolve `href` against `base_uri`.
///
/// # Errors
///
/// Returns `ClipError::InvalidBaseUrl` when `href` is relative and `base_uri`
/// is not a valid absolute URL.
pub fn resolve_url(href: &str, base_uri: &str) -> ClipResult<String> {
    if is_absolute_url(href) {
        return Ok(href.to_string());
    }

    let base = Url::parse(base_uri).map_err(|e| ClipError::invalid_base_url(base_uri, e))?;
    Ok(join_relative(href, &base))
}

/// Resolve `href` against an already validated base URL.
#[must_use]
pub fn resolve_against(href: &str, base: &Url) -> String {
    if is_absolute_url(href) {
        return href.to_string();
    }
    join_relative(href, base)
}

fn join_relative(href: &str, base: &Url) -> String {
    if href.starts_with('/') {
        return format!("{}{href}", base.origin().ascii_serialization());
    }

    let base_href = base.as_str();
    if base_href.ends_with('/') {
        format!("{base_href}{href}")
    } else {
        format!("{base_href}/{href}")
    }
}

/// Check if `href` parses as an absolute URL on its own
#[must_use]
pub fn is_absolute_url(href: &str) -> bool {
    Url::parse(href).is_ok()
}

/// Derive a local filename for an image source.
///
/// Takes the text after the last `/`, cut at the first `?` that follows it,
/// and prepends `prefix` when one is given.
#[must_use]
pub fn image_filename(src: &str, prefix: Option<&str>) -> String {
    let last_segment = src.rsplit('/').next().unwrap_or(src);
    let name = last_segment.split('?').next().unwrap_or(last_segment);

    match prefix {
        Some(prefix) => format!("{prefix}{name}"),
        None => name.to_string(),
    }
}
