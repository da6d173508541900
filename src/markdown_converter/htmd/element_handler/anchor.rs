use parking_lot::Mutex;

use super::super::Element;
use super::super::node_util::sole_heading_child;
use super::super::text_util::{JoinOnStringIterator, StripWhitespace, concat_strings};
use super::{ElementHandler, HandlerResult, Handlers};
use crate::config::{LinkReferenceStyle, LinkStyle};
use crate::utils::resolve_against;

pub(super) struct AnchorElementHandler {
    links: Mutex<Vec<String>>,
}

impl ElementHandler for AnchorElementHandler {
    fn append(&self) -> Option<String> {
        let mut links = self.links.lock();
        if links.is_empty() {
            return None;
        }
        let result = concat_strings!("\n\n", links.iter().join("\n"), "\n\n");
        links.clear();
        Some(result)
    }

    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let node = element.tree_node();

        // A link wrapped around a lone heading is just the heading.
        if let Some(heading) = sole_heading_child(&node) {
            return handlers.handle(&heading, element.scope);
        }

        let content = handlers.walk_children(&node, element.scope).content;

        let options = handlers.options();
        let href = element.attr("href").map(str::trim).filter(|href| !href.is_empty());
        let Some(href) = href else {
            return Some(content.into());
        };
        if element.scope.strip_links || options.conversion.link_style == LinkStyle::StripLinks {
            return Some(content.into());
        }
        if content.trim().is_empty() {
            return Some(content.into());
        }

        let link = resolve_against(href, &options.base_url);
        let title = element.attr("title").map(process_title).filter(|t| !t.is_empty());

        let md = match options.conversion.link_style {
            LinkStyle::Referenced => self.build_referenced_anchor(
                &content,
                link,
                title,
                &options.conversion.link_reference_style,
            ),
            LinkStyle::Inlined | LinkStyle::StripLinks => {
                self.build_inlined_anchor(&content, link, title)
            }
        };

        Some(md.into())
    }
}

// Title lines are trimmed and quotes escaped so the title stays one token.
fn process_title(text: &str) -> String {
    text.lines()
        .map(|line| line.trim().replace('"', "\\\""))
        .filter(|line| !line.is_empty())
        .join("\n")
}

impl AnchorElementHandler {
    pub(super) fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
        }
    }

    fn build_inlined_anchor(&self, content: &str, link: String, title: Option<String>) -> String {
        let has_spaces_in_link = link.contains(' ');
        let (content, leading_whitespace) = content.strip_leading_whitespace();
        let (content, trailing_whitespace) = content.strip_trailing_whitespace();
        concat_strings!(
            leading_whitespace.unwrap_or(""),
            "[",
            content,
            "](",
            if has_spaces_in_link { "<" } else { "" },
            link,
            if has_spaces_in_link { ">" } else { "" },
            title
                .as_ref()
                .map_or(String::new(), |t| concat_strings!(" \"", t, "\"")),
            ")",
            trailing_whitespace.unwrap_or("")
        )
    }

    // Every occurrence gets its own entry, repeated URLs included.
    fn build_referenced_anchor(
        &self,
        content: &str,
        link: String,
        title: Option<String>,
        style: &LinkReferenceStyle,
    ) -> String {
        let title = title.map_or(String::new(), |t| concat_strings!(" \"", t, "\""));
        let content = content.trim();

        let mut links = self.links.lock();

        let (current, append) = match style {
            LinkReferenceStyle::Full => {
                let index = (links.len() + 1).to_string();
                (
                    concat_strings!("[", content, "][", index, "]"),
                    concat_strings!("[", index, "]: ", link, title),
                )
            }
            LinkReferenceStyle::Collapsed => (
                concat_strings!("[", content, "][]"),
                concat_strings!("[", content, "]: ", link, title),
            ),
            LinkReferenceStyle::Shortcut => (
                concat_strings!("[", content, "]"),
                concat_strings!("[", content, "]: ", link, title),
            ),
        };

        links.push(append);
        current
    }
}
