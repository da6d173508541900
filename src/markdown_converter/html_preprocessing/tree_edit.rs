//! Structural edits on a parsed `scraper::Html` tree.
//!
//! The tree is an `ego_tree` arena, so splicing and unwrapping only relink
//! node ids. Removed nodes stay in the arena, each detached from its parent,
//! so neither a walk from the root nor `Html::select` can reach them.

use ego_tree::NodeId;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::Element;
use scraper::{Html, Node};

/// Attribute list being edited, as `(name, value)` pairs in document order.
pub(super) type Attrs = Vec<(String, String)>;

/// Ids of every element reachable from the root that satisfies `predicate`, in document order.
pub(super) fn find_elements(html: &Html, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
    html.tree
        .root()
        .descendants()
        .filter(|node| node.value().as_element().is_some_and(&predicate))
        .map(|node| node.id())
        .collect()
}

/// Whether `id` can still be reached from the document root.
pub(super) fn is_attached(html: &Html, id: NodeId) -> bool {
    let root = html.tree.root().id();
    html.tree
        .get(id)
        .is_some_and(|node| node.id() == root || node.ancestors().last().is_some_and(|a| a.id() == root))
}

/// First descendant of `id` (excluding itself) that satisfies `predicate`.
pub(super) fn find_descendant(
    html: &Html,
    id: NodeId,
    predicate: impl Fn(&Element) -> bool,
) -> Option<NodeId> {
    html.tree.get(id)?.descendants().skip(1).find_map(|node| {
        node.value()
            .as_element()
            .filter(|element| predicate(element))
            .map(|_| node.id())
    })
}

/// Rewrite the attributes of element `id`. Returns whether anything changed.
///
/// The element is rebuilt rather than patched so its cached id/class lookups
/// match the new attributes.
pub(super) fn edit_attributes(html: &mut Html, id: NodeId, edit: impl FnOnce(&mut Attrs)) -> bool {
    let Some(mut node) = html.tree.get_mut(id) else {
        return false;
    };
    let Node::Element(element) = node.value() else {
        return false;
    };

    let before: Attrs = element
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let mut after = before.clone();
    edit(&mut after);
    if after == before {
        return false;
    }

    let attributes = after
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
            value: StrTendril::from(value),
        })
        .collect();
    *element = Element::new(element.name.clone(), attributes);
    true
}

pub(super) fn set_attr(attrs: &mut Attrs, name: &str, value: &str) {
    match attrs.iter_mut().find(|(n, _)| n == name) {
        Some(entry) => {
            if entry.1 != value {
                entry.1 = value.to_string();
            }
        }
        None => attrs.push((name.to_string(), value.to_string())),
    }
}

pub(super) fn remove_attr(attrs: &mut Attrs, name: &str) {
    attrs.retain(|(n, _)| n != name);
}

/// Append each class not already present on the element.
pub(super) fn add_classes(attrs: &mut Attrs, classes: &[&str]) {
    let current = attrs
        .iter()
        .find(|(n, _)| n == "class")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();

    let mut tokens: Vec<&str> = current.split_ascii_whitespace().collect();
    let missing: Vec<&str> = classes
        .iter()
        .copied()
        .filter(|class| !tokens.contains(class))
        .collect();
    if missing.is_empty() {
        return;
    }
    tokens.extend(missing);
    set_attr(attrs, "class", &tokens.join(" "));
}

/// Put `replacement` where `target` is and drop `target` (with whatever else it still holds).
pub(super) fn replace_with(html: &mut Html, target: NodeId, replacement: NodeId) -> bool {
    if target == replacement || !has_parent(html, target) {
        return false;
    }
    let Some(mut target_node) = html.tree.get_mut(target) else {
        return false;
    };
    target_node.insert_id_before(replacement);
    discard(html, target);
    true
}

/// Replace `wrapper` with its children, keeping their order.
pub(super) fn unwrap(html: &mut Html, wrapper: NodeId) -> bool {
    if !has_parent(html, wrapper) {
        return false;
    }
    let children: Vec<NodeId> = match html.tree.get(wrapper) {
        Some(node) => node.children().map(|child| child.id()).collect(),
        None => return false,
    };
    let Some(mut wrapper_node) = html.tree.get_mut(wrapper) else {
        return false;
    };
    for child in children {
        wrapper_node.insert_id_before(child);
    }
    wrapper_node.detach();
    true
}

/// Detach `id` and every node still below it.
///
/// `Html::select` scans the whole arena and skips only parentless nodes.
fn discard(html: &mut Html, id: NodeId) {
    let subtree: Vec<NodeId> = match html.tree.get(id) {
        Some(node) => node.descendants().map(|node| node.id()).collect(),
        None => return,
    };
    for node_id in subtree {
        if let Some(mut node) = html.tree.get_mut(node_id) {
            node.detach();
        }
    }
}

fn has_parent(html: &Html, id: NodeId) -> bool {
    html.tree.get(id).and_then(|node| node.parent()).is_some()
}
