use ego_tree::NodeRef;
use scraper::Node;
use scraper::node::Element;

pub(crate) fn get_node_tag_name<'a>(node: &NodeRef<'a, Node>) -> Option<&'a str> {
    match node.value() {
        Node::Document | Node::Fragment => Some("html"),
        Node::Element(element) => Some(element.name()),
        _ => None,
    }
}

// Check to see if node's parent's tag name matches one of the provided names.
pub(crate) fn parent_tag_name_equals(node: &NodeRef<'_, Node>, tag_names: &[&str]) -> bool {
    node.parent()
        .as_ref()
        .and_then(get_node_tag_name)
        .is_some_and(|tag| tag_names.contains(&tag))
}

pub(crate) fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Class check that reads the attribute directly.
///
/// `Element::has_class` caches the parsed class list, and the normalizer
/// rewrites class attributes in place, so matching goes through the raw value.
pub(crate) fn has_class(element: &Element, class: &str) -> bool {
    element
        .attr("class")
        .is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class))
}

/// Children that carry content: elements and non-blank text.
pub(crate) fn significant_children<'a>(
    node: &NodeRef<'a, Node>,
) -> impl Iterator<Item = NodeRef<'a, Node>> + use<'a> {
    node.children().filter(|child| match child.value() {
        Node::Element(_) => true,
        Node::Text(text) => !text.trim().is_empty(),
        _ => false,
    })
}

/// The heading element when it is the only meaningful child of `node`.
///
/// Whitespace-only text and comments beside the heading are ignored.
pub(crate) fn sole_heading_child<'a>(node: &NodeRef<'a, Node>) -> Option<NodeRef<'a, Node>> {
    let mut children = significant_children(node);
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Element(element) if is_heading_tag(element.name()) => Some(only),
        _ => None,
    }
}

/// Concatenated text of a subtree, with `<br>` as a newline.
pub(crate) fn raw_text(node: &NodeRef<'_, Node>) -> String {
    let mut buffer = String::new();
    collect_raw_text(node, &mut buffer);
    buffer
}

fn collect_raw_text(node: &NodeRef<'_, Node>, buffer: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => buffer.push_str(text),
            Node::Element(element) if element.name() == "br" => buffer.push('\n'),
            Node::Element(_) => collect_raw_text(&child, buffer),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn finds_heading_inside_anchor() {
        let html = Html::parse_fragment("<a href=\"/x\">\n  <h2>Title</h2>\n</a>");
        let anchor = html
            .tree
            .root()
            .descendants()
            .find(|n| get_node_tag_name(n) == Some("a"))
            .expect("anchor present");
        let heading = sole_heading_child(&anchor).expect("heading child");
        assert_eq!(get_node_tag_name(&heading), Some("h2"));
    }

    #[test]
    fn text_next_to_heading_disqualifies() {
        let html = Html::parse_fragment("<a href=\"/x\"><h2>Title</h2> more</a>");
        let anchor = html
            .tree
            .root()
            .descendants()
            .find(|n| get_node_tag_name(n) == Some("a"))
            .expect("anchor present");
        assert!(sole_heading_child(&anchor).is_none());
    }

    #[test]
    fn raw_text_turns_br_into_newline() {
        let html = Html::parse_fragment("<pre><code>a<br>b</code></pre>");
        let pre = html
            .tree
            .root()
            .descendants()
            .find(|n| get_node_tag_name(n) == Some("pre"))
            .expect("pre present");
        assert_eq!(raw_text(&pre), "a\nb");
    }
}
