use super::super::Element;
use super::super::text_util::{JoinOnStringIterator, concat_strings};
use super::{HandlerResult, Handlers};

pub(super) fn blockquote_handler(
    handlers: &dyn Handlers,
    element: Element,
) -> Option<HandlerResult> {
    let content = handlers
        .walk_children(&element.tree_node(), element.scope)
        .content;
    let content = content.trim_matches('\n');
    if content.is_empty() {
        return None;
    }

    // Blank lines between quoted paragraphs keep the marker.
    let quoted = content
        .lines()
        .map(|line| concat_strings!("> ", line))
        .join("\n");
    Some(concat_strings!("\n\n", quoted, "\n\n").into())
}
