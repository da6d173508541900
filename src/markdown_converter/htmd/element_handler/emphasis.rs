use super::super::Element;
use super::super::text_util::{StripWhitespace, concat_strings};
use super::{HandlerResult, Handlers};

pub(super) fn emphasis_handler(
    handlers: &dyn Handlers,
    element: Element,
    marker: &str,
) -> Option<HandlerResult> {
    let content = handlers
        .walk_children(&element.tree_node(), element.scope)
        .content;
    if content.is_empty() {
        return None;
    }
    // Note: this is whitespace, NOT document whitespace, per the
    // [Commonmark spec](https://spec.commonmark.org/0.31.2/#emphasis-and-strong-emphasis).
    let (content, leading_whitespace) = content.strip_leading_whitespace();
    let (content, trailing_whitespace) = content.strip_trailing_whitespace();

    // Whitespace-only emphasis and stripped table formatting keep the text only.
    let marker = if content.is_empty() || element.scope.strip_formatting {
        ""
    } else {
        marker
    };

    let content = concat_strings!(
        leading_whitespace.unwrap_or(""),
        marker,
        content,
        marker,
        trailing_whitespace.unwrap_or("")
    );
    Some(content.into())
}
