//! Namespaced path lookups over a parsed brief search response.

use roxmltree::Node;

pub const SEARCH_NS: &str = "http://www.exlibrisgroup.com/xsd/jaguar/search";
pub const PRIMO_NS: &str = "http://www.exlibrisgroup.com/xsd/primo/primo_nm_bib";

/// One path step: (namespace, local name).
pub(crate) type Step = (&'static str, &'static str);

pub(crate) const fn search(name: &'static str) -> Step {
    (SEARCH_NS, name)
}

pub(crate) const fn primo(name: &'static str) -> Step {
    (PRIMO_NS, name)
}

/// Elements matching `//first/second/...` below `scope`, in document order.
pub(crate) fn select<'a, 'input>(scope: Node<'a, 'input>, path: &[Step]) -> Vec<Node<'a, 'input>> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut nodes: Vec<Node<'a, 'input>> = scope
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name(*first))
        .collect();

    for step in rest {
        nodes = nodes
            .into_iter()
            .flat_map(|n| n.children())
            .filter(|n| n.is_element() && n.has_tag_name(*step))
            .collect();
    }
    nodes
}

/// Concatenated text of all descendant text nodes.
pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

pub(crate) fn node_values(scope: Node<'_, '_>, path: &[Step]) -> Vec<String> {
    select(scope, path).into_iter().map(text_content).collect()
}

/// Value of the first match, all subsequent values are discarded.
pub(crate) fn node_value(scope: Node<'_, '_>, path: &[Step]) -> Option<String> {
    select(scope, path).into_iter().next().map(text_content)
}
