use super::super::Element;
use super::super::text_util::concat_strings;
use super::{HandlerResult, Handlers};

pub(super) fn p_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers
        .walk_children(&element.tree_node(), element.scope)
        .content;
    let content = content.trim_matches('\n');
    if content.trim().is_empty() {
        return Some("".into());
    }
    Some(concat_strings!("\n\n", content, "\n\n").into())
}
