use parking_lot::Mutex;

use super::super::text_util::{JoinOnStringIterator, concat_strings};
use super::super::{Element, ImageDownload};
use super::{ElementHandler, HandlerResult, Handlers};
use crate::config::{ImageRefStyle, ImageStyle};
use crate::utils::{image_filename, resolve_against};

pub(super) struct ImageElementHandler {
    figures: Mutex<Vec<String>>,
}

impl ElementHandler for ImageElementHandler {
    fn append(&self) -> Option<String> {
        let mut figures = self.figures.lock();
        if figures.is_empty() {
            return None;
        }
        let result = concat_strings!("\n\n", figures.iter().join("\n"), "\n\n");
        figures.clear();
        Some(result)
    }

    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let options = handlers.options();
        let style = options.conversion.image_style;

        let src = element.attr("src").map(str::trim).filter(|src| !src.is_empty());
        let Some(src) = src else {
            return Some("".into());
        };
        if style == ImageStyle::NoImage {
            return Some("".into());
        }
        if element.scope.strip_links {
            let alt = element.attr("alt").unwrap_or("");
            return Some(alt.split_whitespace().join(" ").into());
        }

        let resolved = resolve_against(src, &options.base_url);

        let target = match style {
            ImageStyle::Base64 => options
                .embedded_images
                .get(&resolved)
                .cloned()
                .unwrap_or_else(|| resolved.clone()),
            _ if options.conversion.download_images && !resolved.starts_with("data:") => {
                let filename = image_filename(&resolved, Some(options.image_prefix.as_str()));
                handlers.record_image(ImageDownload {
                    url: resolved.clone(),
                    filename: filename.clone(),
                });
                filename
            }
            _ => resolved,
        };

        let md = match style {
            ImageStyle::Obsidian => concat_strings!("![[", target, "]]"),
            ImageStyle::ObsidianNoFolder => {
                let name = target.rsplit('/').next().unwrap_or(&target);
                concat_strings!("![[", name, "]]")
            }
            ImageStyle::Markdown | ImageStyle::Base64 | ImageStyle::NoImage => {
                let alt = clean_attribute(element.attr("alt").unwrap_or(""));
                let title = element
                    .attr("title")
                    .map(clean_attribute)
                    .filter(|title| !title.is_empty())
                    .map_or(String::new(), |t| {
                        concat_strings!(" \"", t.replace('"', "\\\""), "\"")
                    });
                let target = if target.contains(' ') {
                    concat_strings!("<", target, ">")
                } else {
                    target
                };

                match options.conversion.image_ref_style {
                    ImageRefStyle::Inlined => concat_strings!("![", alt, "](", target, title, ")"),
                    ImageRefStyle::Referenced => {
                        let mut figures = self.figures.lock();
                        let id = concat_strings!("fig", (figures.len() + 1).to_string());
                        figures.push(concat_strings!("[", id, "]: ", target, title));
                        concat_strings!("![", alt, "][", id, "]")
                    }
                }
            }
        };

        Some(md.into())
    }
}

// Attribute text on one line per paragraph, without stray blank lines.
fn clean_attribute(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join("\n")
}

impl ImageElementHandler {
    pub(super) fn new() -> Self {
        Self {
            figures: Mutex::new(Vec::new()),
        }
    }
}
