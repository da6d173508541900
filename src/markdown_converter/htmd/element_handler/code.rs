use scraper::ElementRef;

use super::super::Element;
use super::super::node_util::raw_text;
use super::super::text_util::{concat_strings, longest_run};
use super::{HandlerResult, Handlers};
use crate::config::CodeBlockStyle;

/// Inline code span. Newlines inside the span become spaces.
pub(super) fn code_handler(_handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = raw_text(&element.tree_node()).replace(['\r', '\n'], " ");
    Some(code_span(&content).into())
}

/// `<mark>` renders as a code span around its rendered content.
pub(super) fn mark_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers
        .walk_children(&element.tree_node(), element.scope)
        .content;
    Some(code_span(content.trim()).into())
}

fn code_span(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let delimiter = "`".repeat(longest_run(content, '`') + 1);
    let padding = if content.starts_with('`') || content.ends_with('`') {
        " "
    } else {
        ""
    };
    concat_strings!(delimiter, padding, content, padding, delimiter)
}

pub(super) fn pre_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let options = &handlers.options().conversion;
    let node = element.tree_node();

    let code = raw_text(&node);
    let code = code.strip_suffix('\n').unwrap_or(&code);
    if code.trim().is_empty() {
        return Some("".into());
    }

    let block = match options.code_block_style {
        CodeBlockStyle::Indented => code
            .split('\n')
            .map(|line| concat_strings!("    ", line))
            .collect::<Vec<_>>()
            .join("\n"),
        CodeBlockStyle::Fenced => {
            let fence_char = options.fence_char();
            let min_len = options.fence.chars().count().max(3);
            let fence_len = code
                .lines()
                .map(|line| line.chars().take_while(|&c| c == fence_char).count())
                .filter(|&run| run >= min_len)
                .map(|run| run + 1)
                .fold(min_len, usize::max);
            let fence = fence_char.to_string().repeat(fence_len);
            let language = code_language(element.node).unwrap_or_default();
            concat_strings!(fence, language, "\n", code, "\n", fence)
        }
    };

    Some(concat_strings!("\n\n", block, "\n\n").into())
}

/// `language-*` class of the inner `code` element, else of the `pre` itself.
fn code_language<'a>(pre: ElementRef<'a>) -> Option<&'a str> {
    let code = pre
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == "code");

    code.into_iter()
        .chain(std::iter::once(pre))
        .find_map(|element| {
            element
                .value()
                .attr("class")?
                .split_ascii_whitespace()
                .find_map(|class| class.strip_prefix("language-"))
        })
        .filter(|language| !language.is_empty())
}
