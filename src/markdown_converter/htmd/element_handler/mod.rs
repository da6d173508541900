mod anchor;
mod blockquote;
mod br;
mod code;
mod emphasis;
mod headings;
mod hr;
mod img;
mod list;
mod p;
pub(crate) mod table;

use std::collections::HashMap;

use ego_tree::NodeRef;
use parking_lot::Mutex;
use scraper::{ElementRef, Node};

use super::dom_walker::{self, walk_node};
use super::node_util::get_node_tag_name;
use super::text_util::concat_strings;
use super::{Element, ImageDownload, RenderOptions, Scope};
use anchor::AnchorElementHandler;
use blockquote::blockquote_handler;
use br::br_handler;
use code::{code_handler, mark_handler, pre_handler};
use emphasis::emphasis_handler;
use headings::headings_handler;
use hr::hr_handler;
use img::ImageElementHandler;
use list::{list_handler, list_item_handler};
use p::p_handler;
use table::table_handler;

/// The processing result of an `ElementHandler`.
pub(crate) struct HandlerResult {
    /// The converted content.
    pub(crate) content: String,
}

impl From<String> for HandlerResult {
    fn from(value: String) -> Self {
        HandlerResult { content: value }
    }
}

impl From<&str> for HandlerResult {
    fn from(value: &str) -> Self {
        HandlerResult {
            content: value.to_string(),
        }
    }
}

/// Trait for handling the conversion of a specific HTML element to Markdown.
pub(crate) trait ElementHandler: Send + Sync {
    /// Append additional content to the end of the converted Markdown.
    fn append(&self) -> Option<String> {
        None
    }

    /// Handle the conversion of an element.
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult>;
}

impl<F> ElementHandler for F
where
    F: (Fn(&dyn Handlers, Element) -> Option<HandlerResult>) + Send + Sync,
{
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        self(handlers, element)
    }
}

/// Builtin element handlers for one render call.
pub(crate) struct ElementHandlers<'o> {
    handlers: Vec<Box<dyn ElementHandler>>,
    tag_to_handler_indices: HashMap<&'static str, Vec<usize>>,
    options: &'o RenderOptions,
    image_list: Mutex<Vec<ImageDownload>>,
}

impl<'o> ElementHandlers<'o> {
    pub(crate) fn new(options: &'o RenderOptions) -> Self {
        let mut handlers = Self {
            handlers: Vec::new(),
            tag_to_handler_indices: HashMap::new(),
            options,
            image_list: Mutex::new(Vec::new()),
        };

        // Other block elements. This is taken from the [CommonMark
        // spec](https://spec.commonmark.org/0.31.2/#html-blocks).
        handlers.add_handler(
            vec![
                "address",
                "article",
                "aside",
                "body",
                "caption",
                "center",
                "dd",
                "details",
                "dialog",
                "dir",
                "div",
                "dl",
                "dt",
                "fieldset",
                "figcaption",
                "figure",
                "footer",
                "form",
                "header",
                "legend",
                "main",
                "menu",
                "nav",
                "search",
                "section",
                "summary",
                "tfoot",
            ],
            block_handler,
        );

        // img
        handlers.add_handler(vec!["img"], ImageElementHandler::new());

        // a
        handlers.add_handler(vec!["a"], AnchorElementHandler::new());

        // list
        handlers.add_handler(vec!["ol", "ul"], list_handler);

        // li
        handlers.add_handler(vec!["li"], list_item_handler);

        // quote
        handlers.add_handler(vec!["blockquote"], blockquote_handler);

        // code
        handlers.add_handler(vec!["code", "kbd", "samp", "tt"], code_handler);

        // pre
        handlers.add_handler(vec!["pre"], pre_handler);

        // mark
        handlers.add_handler(vec!["mark"], mark_handler);

        // strong
        handlers.add_handler(vec!["strong", "b"], bold_handler);

        // italic
        handlers.add_handler(vec!["i", "em"], italic_handler);

        // strikethrough
        handlers.add_handler(vec!["del", "s", "strike"], strikethrough_handler);

        // headings
        handlers.add_handler(vec!["h1", "h2", "h3", "h4", "h5", "h6"], headings_handler);

        // br
        handlers.add_handler(vec!["br"], br_handler);

        // hr
        handlers.add_handler(vec!["hr"], hr_handler);

        // table, plus stray table parts outside a table
        handlers.add_handler(vec!["table"], table_handler);
        handlers.add_handler(vec!["thead", "tbody", "tr", "td", "th"], block_handler);

        // p
        handlers.add_handler(vec!["p"], p_handler);

        // Elements with no Markdown form.
        handlers.add_handler(
            vec![
                "head", "script", "style", "noscript", "template", "iframe", "button", "input",
                "select", "textarea", "option", "svg", "canvas",
            ],
            discard_handler,
        );

        handlers
    }

    pub(crate) fn add_handler<Handler>(&mut self, tags: Vec<&'static str>, handler: Handler)
    where
        Handler: ElementHandler + 'static,
    {
        assert!(!tags.is_empty(), "tags cannot be empty.");
        let handler_idx = self.handlers.len();
        self.handlers.push(Box::new(handler));
        for tag in tags {
            self.tag_to_handler_indices
                .entry(tag)
                .or_default()
                .insert(0, handler_idx);
        }
    }

    pub(crate) fn handle_element(
        &self,
        node: ElementRef<'_>,
        skipped_handlers: usize,
        scope: Scope,
    ) -> Option<HandlerResult> {
        let tag = node.value().name();
        match self.find_handler(tag, skipped_handlers) {
            Some(handler) => handler.handle(
                self,
                Element {
                    node,
                    tag,
                    skipped_handlers,
                    scope,
                },
            ),
            // Unknown elements render their children.
            None => Some(Handlers::walk_children(self, &*node, scope)),
        }
    }

    /// Collected reference lists, in registration order.
    pub(crate) fn append_all(&self) -> String {
        self.handlers
            .iter()
            .filter_map(|handler| handler.append())
            .collect()
    }

    pub(crate) fn image_count(&self) -> usize {
        self.image_list.lock().len()
    }

    pub(crate) fn take_image_list(&self) -> Vec<ImageDownload> {
        std::mem::take(&mut *self.image_list.lock())
    }

    fn find_handler(&self, tag: &str, skipped_handlers: usize) -> Option<&dyn ElementHandler> {
        let handler_indices = self.tag_to_handler_indices.get(tag)?;
        let idx = *handler_indices.get(skipped_handlers)?;
        Some(self.handlers[idx].as_ref())
    }
}

/// Provides access to the handlers for processing elements and nodes.
///
/// Handlers can use this to delegate to other handlers or recursively process child nodes.
pub(crate) trait Handlers {
    /// Skip the current handler and fall back to the previous handler (earlier in registration order).
    fn fallback(&self, element: Element) -> Option<HandlerResult>;

    /// Process a node through the handlers.
    fn handle(&self, node: &NodeRef<'_, Node>, scope: Scope) -> Option<HandlerResult>;

    /// Walks the children of a node. Children of `pre` and `code` are walked verbatim.
    fn walk_children(&self, node: &NodeRef<'_, Node>, scope: Scope) -> HandlerResult;

    /// Get the render options.
    fn options(&self) -> &RenderOptions;

    /// Record an image for download; repeated URLs are kept once.
    fn record_image(&self, image: ImageDownload);
}

impl Handlers for ElementHandlers<'_> {
    fn fallback(&self, element: Element) -> Option<HandlerResult> {
        self.handle_element(element.node, element.skipped_handlers + 1, element.scope)
    }

    fn handle(&self, node: &NodeRef<'_, Node>, scope: Scope) -> Option<HandlerResult> {
        let mut buffer = String::new();
        walk_node(node, &mut buffer, self, true, scope);
        Some(HandlerResult { content: buffer })
    }

    fn walk_children(&self, node: &NodeRef<'_, Node>, scope: Scope) -> HandlerResult {
        let mut buffer = String::new();
        let tag = get_node_tag_name(node);
        let is_block = tag.is_some_and(dom_walker::is_block_element);

        let scope = if tag.is_some_and(|t| t == "pre" || t == "code") {
            scope.pre()
        } else {
            scope
        };

        dom_walker::walk_children(node, &mut buffer, self, is_block, scope);
        HandlerResult { content: buffer }
    }

    fn options(&self) -> &RenderOptions {
        self.options
    }

    fn record_image(&self, image: ImageDownload) {
        let mut images = self.image_list.lock();
        if !images.iter().any(|existing| existing.url == image.url) {
            images.push(image);
        }
    }
}

fn block_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(&element.tree_node(), element.scope).content;
    let content = content.trim_matches('\n');
    Some(concat_strings!("\n\n", content, "\n\n").into())
}

fn bold_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    emphasis_handler(handlers, element, &handlers.options().conversion.strong_delimiter)
}

fn italic_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    emphasis_handler(handlers, element, &handlers.options().conversion.em_delimiter)
}

fn strikethrough_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    emphasis_handler(handlers, element, "~~")
}

fn discard_handler(_handlers: &dyn Handlers, _element: Element) -> Option<HandlerResult> {
    Some("".into())
}
