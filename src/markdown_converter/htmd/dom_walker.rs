use std::borrow::Cow;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::Scope;
use super::element_handler::{ElementHandlers, Handlers};
use super::node_util::get_node_tag_name;
use super::text_util::{
    compress_whitespace, index_of_markdown_ordered_item_dot, is_markdown_atx_heading,
};

pub(crate) fn walk_node(
    node: &NodeRef<'_, Node>,
    buffer: &mut String,
    handlers: &ElementHandlers<'_>,
    trim_leading_spaces: bool,
    scope: Scope,
) {
    match node.value() {
        Node::Document | Node::Fragment => {
            walk_children(node, buffer, handlers, true, scope);
            trim_buffer_end(buffer);
        }

        Node::Text(text) => {
            let text: &str = text;

            if scope.is_pre {
                buffer.push_str(text);
            } else {
                let text = if handlers.options().conversion.escape_markdown {
                    escape_if_needed(Cow::Borrowed(text))
                } else {
                    Cow::Borrowed(text)
                };
                let text = compress_whitespace(&text);

                if trim_leading_spaces
                    || (text.starts_with(' ') && (buffer.ends_with(' ') || buffer.ends_with('\n')))
                {
                    let trimmed = text.trim_start_matches(' ');
                    if !trimmed.is_empty() {
                        buffer.push_str(trimmed);
                    }
                } else if !text.is_empty() {
                    buffer.push_str(&text);
                }
            }
        }

        Node::Element(_) => {
            let Some(element) = ElementRef::wrap(*node) else {
                return;
            };
            if let Some(res) = handlers.handle_element(element, 0, scope) {
                let content = normalize_content_for_buffer(buffer, res.content, scope.is_pre);
                if !content.is_empty() {
                    buffer.push_str(&content);
                }
            }
        }

        // Comments, doctypes and processing instructions have no Markdown form.
        _ => {}
    }
}

pub(crate) fn walk_children(
    node: &NodeRef<'_, Node>,
    buffer: &mut String,
    handlers: &ElementHandlers<'_>,
    is_parent_block_element: bool,
    scope: Scope,
) {
    let mut trim_leading_spaces = !scope.is_pre && is_parent_block_element;

    for child in node.children() {
        let is_block = get_node_tag_name(&child).is_some_and(is_block_element);

        if is_block {
            trim_buffer_end_spaces(buffer);
        }

        let buffer_len = buffer.len();

        walk_node(&child, buffer, handlers, trim_leading_spaces, scope);

        if buffer.len() > buffer_len {
            trim_leading_spaces = is_block;
        }
    }
}

/// Normalizes content before adding to buffer by:
/// 1. Collapsing excessive newlines (max 2 consecutive newlines)
/// 2. Collapsing adjacent spaces between inline elements (when not in pre context)
fn normalize_content_for_buffer(buffer: &str, mut content: String, is_pre: bool) -> String {
    if buffer.is_empty() {
        return content;
    }

    let last_newlines = buffer
        .as_bytes()
        .iter()
        .rev()
        .take_while(|&&b| b == b'\n')
        .count();

    let content_newlines = content
        .as_bytes()
        .iter()
        .take_while(|&&b| b == b'\n')
        .count();

    let total_newlines = last_newlines + content_newlines;

    if total_newlines > 2 {
        let to_remove = std::cmp::min(total_newlines - 2, content_newlines);
        content.drain(..to_remove);
    }

    if !is_pre
        && last_newlines == 0
        && content_newlines == 0
        && buffer.as_bytes().last() == Some(&b' ')
        && content.as_bytes().first() == Some(&b' ')
    {
        content.remove(0);
    }

    content
}

fn trim_buffer_end(buffer: &mut String) {
    let end = buffer.trim_end_matches(['\n', '\t', ' ']).len();
    buffer.truncate(end);
}

fn trim_buffer_end_spaces(buffer: &mut String) {
    let end = buffer.trim_end_matches(' ').len();
    buffer.truncate(end);
}

/// Escapes markdown special characters in text content.
///
/// - Body escapes: `\` `*` `_` `` ` `` `[` `]` -> backslash-prefixed
/// - Line-start `=` `~` `>` -> backslash-prefixed (prevents h1/h2/blockquote)
/// - Line-start `-` `+` followed by space -> backslash-prefixed (prevents list)
/// - Line-start `#` heading pattern -> backslash-prefixed
/// - Line-start `N.` followed by space -> escaped dot (prevents ordered list)
fn escape_if_needed(text: Cow<'_, str>) -> Cow<'_, str> {
    let Some(&first_byte) = text.as_bytes().first() else {
        return text;
    };

    let needs_body_escape = text
        .bytes()
        .any(|b| matches!(b, b'\\' | b'*' | b'_' | b'`' | b'[' | b']'));
    let needs_line_start_escape =
        matches!(first_byte, b'=' | b'~' | b'>' | b'-' | b'+' | b'#' | b'0'..=b'9');

    if !needs_body_escape && !needs_line_start_escape {
        return text;
    }

    let mut escaped = if needs_body_escape {
        let mut result = String::with_capacity(text.len() + 16);
        for ch in text.chars() {
            if matches!(ch, '\\' | '*' | '_' | '`' | '[' | ']') {
                result.push('\\');
            }
            result.push(ch);
        }
        result
    } else {
        text.into_owned()
    };

    match first_byte {
        b'=' | b'~' | b'>' => escaped.insert(0, '\\'),
        b'-' | b'+' if escaped.as_bytes().get(1) == Some(&b' ') => escaped.insert(0, '\\'),
        b'#' if is_markdown_atx_heading(&escaped) => escaped.insert(0, '\\'),
        b'0'..=b'9' => {
            if let Some(dot_idx) = index_of_markdown_ordered_item_dot(&escaped) {
                escaped.replace_range(dot_idx..=dot_idx, "\\.");
            }
        }
        _ => {}
    }

    Cow::Owned(escaped)
}

// This is taken from the
// [CommonMark spec](https://spec.commonmark.org/0.31.2/#html-blocks).
pub(crate) fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "base"
            | "basefont"
            | "blockquote"
            | "body"
            | "caption"
            | "center"
            | "col"
            | "colgroup"
            | "dd"
            | "details"
            | "dialog"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "frame"
            | "frameset"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hr"
            | "html"
            | "iframe"
            | "legend"
            | "li"
            | "link"
            | "main"
            | "menu"
            | "menuitem"
            | "nav"
            | "noframes"
            | "ol"
            | "optgroup"
            | "option"
            | "p"
            | "param"
            | "pre"
            | "script"
            | "search"
            | "section"
            | "style"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "textarea"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "track"
            | "ul"
    )
}
