use tree_sitter::Node;

/// What [`walk`] should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Continue into the node's children.
    Descend,
    /// Leave the node's children unvisited and move on to its next sibling.
    Skip,
    /// End the traversal.
    Stop,
}

/// Pre-order traversal of the subtree rooted at `root`.
///
/// Children are visited in source order. The walk never leaves the
/// subtree, even when `root` is not the root of its tree.
pub fn walk<'t, F>(root: Node<'t>, mut visitor: F)
where
    F: FnMut(Node<'t>) -> Visit,
{
    let mut cursor = root.walk();
    let mut depth = 0usize;

    loop {
        match visitor(cursor.node()) {
            Visit::Stop => return,
            Visit::Descend if cursor.goto_first_child() => {
                depth += 1;
                continue;
            }
            Visit::Descend | Visit::Skip => {}
        }

        loop {
            if depth == 0 {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            cursor.goto_parent();
            depth -= 1;
        }
    }
}

/// Return the first node, in pre-order, for which `predicate` holds.
///
/// The walk stops at the first match, so neither the match's subtree nor
/// any later sibling is inspected.
pub fn find_first<'t, P>(root: Node<'t>, mut predicate: P) -> Option<Node<'t>>
where
    P: FnMut(Node<'t>) -> bool,
{
    let mut found = None;
    walk(root, |node| {
        if predicate(node) {
            found = Some(node);
            Visit::Stop
        } else {
            Visit::Descend
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxTree;

    const SOURCE: &str = "package main\n\nfunc a() {}\n\nfunc b() { c() }\n";

    #[test]
    fn walk_is_preorder() {
        let tree = SyntaxTree::parse("walk.go", SOURCE).unwrap();
        let mut names = Vec::new();
        walk(tree.root(), |node| {
            if node.kind() == "function_declaration" {
                let name = node.child_by_field_name("name").unwrap();
                names.push(tree.text(name).to_string());
            }
            Visit::Descend
        });
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn skip_leaves_children_unvisited() {
        let tree = SyntaxTree::parse("walk.go", SOURCE).unwrap();
        let mut calls = 0;
        walk(tree.root(), |node| {
            if node.kind() == "call_expression" {
                calls += 1;
            }
            if node.kind() == "function_declaration" {
                Visit::Skip
            } else {
                Visit::Descend
            }
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn walk_stays_inside_subtree() {
        let tree = SyntaxTree::parse("walk.go", SOURCE).unwrap();
        let first = find_first(tree.root(), |n| n.kind() == "function_declaration").unwrap();
        let mut seen_b = false;
        walk(first, |node| {
            if node.kind() == "identifier" && tree.text(node) == "b" {
                seen_b = true;
            }
            Visit::Descend
        });
        assert!(!seen_b);
    }

    #[test]
    fn find_first_returns_earliest_match() {
        let tree = SyntaxTree::parse("walk.go", SOURCE).unwrap();
        let node = find_first(tree.root(), |n| n.kind() == "function_declaration").unwrap();
        assert_eq!(tree.text(node.child_by_field_name("name").unwrap()), "a");
    }

    #[test]
    fn find_first_none_when_absent() {
        let tree = SyntaxTree::parse("walk.go", SOURCE).unwrap();
        assert!(find_first(tree.root(), |n| n.kind() == "import_declaration").is_none());
    }
}
