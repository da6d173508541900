use ego_tree::NodeRef;
use scraper::Node;

use super::super::Element;
use super::super::node_util::{get_node_tag_name, parent_tag_name_equals};
use super::super::text_util::{concat_strings, indent_continuation_lines};
use super::{HandlerResult, Handlers};

/// Nested list indentation, per level.
const NESTED_INDENT: usize = 2;

pub(super) fn list_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let node = element.tree_node();
    let content = handlers.walk_children(&node, element.scope).content;
    let content = content.trim_matches('\n');
    if content.is_empty() {
        return Some("".into());
    }

    // A nested list hugs its parent item.
    if parent_tag_name_equals(&node, &["li"]) {
        Some(concat_strings!("\n", content, "\n").into())
    } else {
        Some(concat_strings!("\n\n", content, "\n\n").into())
    }
}

pub(super) fn list_item_handler(
    handlers: &dyn Handlers,
    element: Element,
) -> Option<HandlerResult> {
    let node = element.tree_node();

    let marker = match node.parent() {
        Some(parent) if get_node_tag_name(&parent) == Some("ol") => {
            let start = parent
                .value()
                .as_element()
                .and_then(|ol| ol.attr("start"))
                .and_then(|start| start.trim().parse::<usize>().ok())
                .unwrap_or(1);
            let index = node
                .prev_siblings()
                .filter(|sibling| get_node_tag_name(sibling) == Some("li"))
                .count();
            concat_strings!((start + index).to_string(), ". ")
        }
        _ => concat_strings!(handlers.options().conversion.bullet_list_marker, " "),
    };

    let task = match task_state(&node) {
        Some(true) => "[x] ",
        Some(false) => "[ ] ",
        None => "",
    };

    let content = handlers.walk_children(&node, element.scope).content;
    let content = content.trim_matches('\n').trim_start_matches(' ');
    let content = indent_continuation_lines(content, NESTED_INDENT);

    Some(concat_strings!(marker, task, content, "\n").into())
}

/// Checked state of the item's own checkbox, ignoring checkboxes of nested lists.
fn task_state(item: &NodeRef<'_, Node>) -> Option<bool> {
    item.descendants().find_map(|node| {
        let element = node.value().as_element()?;
        if element.name() != "input"
            || !element
                .attr("type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"))
        {
            return None;
        }
        let in_nested_list = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != item.id())
            .any(|ancestor| matches!(get_node_tag_name(&ancestor), Some("ul" | "ol")));
        (!in_nested_list).then(|| element.attr("checked").is_some())
    })
}
