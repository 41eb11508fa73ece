//! Structural insertion points.
//!
//! An anchor is found by shape, never by line number. Each
//! [`AnchorKind`] is a predicate over a single node; the traversal in
//! [`crate::visit`] is shared by all of them.
//!
//! Only the first candidate in pre-order is ever returned. A file holding
//! two import blocks or two `map[string]` literals gets only the first one
//! updated.

use std::fmt;
use std::ops::Range;

use tree_sitter::Node;

use crate::error::{EditError, Result};
use crate::tree::SyntaxTree;
use crate::visit::{find_first, walk, Visit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorKind {
    /// The first `import` declaration.
    ImportBlock,
    /// The first composite literal of type `map[string]T`.
    StringKeyedMap,
    /// The first call whose callee is `receiver.selector`.
    SelectorCall { receiver: String, selector: String },
}

impl AnchorKind {
    pub fn selector_call(receiver: impl Into<String>, selector: impl Into<String>) -> Self {
        AnchorKind::SelectorCall {
            receiver: receiver.into(),
            selector: selector.into(),
        }
    }

    /// tree-sitter node kind an anchor of this kind sits on.
    pub fn node_kind(&self) -> &'static str {
        match self {
            AnchorKind::ImportBlock => "import_declaration",
            AnchorKind::StringKeyedMap => "composite_literal",
            AnchorKind::SelectorCall { .. } => "call_expression",
        }
    }

    /// Whether `node` has this anchor's shape.
    pub fn matches(&self, node: Node<'_>, source: &[u8]) -> bool {
        if node.kind() != self.node_kind() {
            return false;
        }
        match self {
            AnchorKind::ImportBlock => true,
            AnchorKind::StringKeyedMap => node
                .child_by_field_name("type")
                .filter(|ty| ty.kind() == "map_type")
                .and_then(|ty| ty.child_by_field_name("key"))
                .is_some_and(|key| {
                    key.kind() == "type_identifier" && text(key, source) == "string"
                }),
            AnchorKind::SelectorCall { receiver, selector } => node
                .child_by_field_name("function")
                .filter(|callee| callee.kind() == "selector_expression")
                .is_some_and(|callee| {
                    let operand = callee.child_by_field_name("operand");
                    let field = callee.child_by_field_name("field");
                    match (operand, field) {
                        (Some(operand), Some(field)) => {
                            operand.kind() == "identifier"
                                && text(operand, source) == receiver
                                && text(field, source) == selector
                        }
                        _ => false,
                    }
                }),
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorKind::ImportBlock => f.write_str("import block"),
            AnchorKind::StringKeyedMap => f.write_str("map[string] literal"),
            AnchorKind::SelectorCall { receiver, selector } => {
                write!(f, "call to {receiver}.{selector}")
            }
        }
    }
}

/// A located insertion point.
///
/// Stores the span of the matched node rather than the node itself, so it
/// stays valid across edits that only append inside that node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    kind: AnchorKind,
    span: Range<usize>,
}

impl Anchor {
    pub fn kind(&self) -> &AnchorKind {
        &self.kind
    }

    /// Byte span of the anchored node when it was found.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Re-locate the anchored node in `tree`.
    pub fn node<'t>(&self, tree: &'t SyntaxTree) -> Option<Node<'t>> {
        let start = self.span.start;
        let source = tree.source().as_bytes();
        let mut found = None;
        walk(tree.root(), |node| {
            if node.start_byte() > start || node.end_byte() <= start {
                Visit::Skip
            } else if node.start_byte() == start && self.kind.matches(node, source) {
                found = Some(node);
                Visit::Stop
            } else {
                Visit::Descend
            }
        });
        found
    }

    /// Source text of every item currently registered at this anchor:
    /// import specs, map elements, or call arguments. Comments are not items.
    pub fn items(&self, tree: &SyntaxTree) -> Result<Vec<String>> {
        let node = self.node(tree).ok_or_else(|| EditError::AnchorNotFound {
            anchor: self.kind.to_string(),
            path: tree.path().to_path_buf(),
        })?;
        Ok(item_nodes(&self.kind, node)
            .into_iter()
            .map(|item| tree.text(item).to_string())
            .collect())
    }
}

/// Find the first anchor of `kind` in `tree`.
pub fn find(tree: &SyntaxTree, kind: &AnchorKind) -> Result<Anchor> {
    let source = tree.source().as_bytes();
    find_first(tree.root(), |node| kind.matches(node, source))
        .map(|node| Anchor {
            kind: kind.clone(),
            span: node.byte_range(),
        })
        .ok_or_else(|| EditError::AnchorNotFound {
            anchor: kind.to_string(),
            path: tree.path().to_path_buf(),
        })
}

/// The delimited list new items are appended to: the literal body of a
/// map literal or the argument list of a call. Import blocks have no
/// single list node.
pub(crate) fn list_node<'t>(kind: &AnchorKind, node: Node<'t>) -> Option<Node<'t>> {
    match kind {
        AnchorKind::ImportBlock => None,
        AnchorKind::StringKeyedMap => node.child_by_field_name("body"),
        AnchorKind::SelectorCall { .. } => node.child_by_field_name("arguments"),
    }
}

pub(crate) fn item_nodes<'t>(kind: &AnchorKind, node: Node<'t>) -> Vec<Node<'t>> {
    match kind {
        AnchorKind::ImportBlock => {
            let mut specs = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "import_spec" => specs.push(child),
                    "import_spec_list" => {
                        let mut inner = child.walk();
                        specs.extend(
                            child
                                .named_children(&mut inner)
                                .filter(|spec| spec.kind() == "import_spec"),
                        );
                    }
                    _ => {}
                }
            }
            specs
        }
        _ => match list_node(kind, node) {
            Some(list) => {
                let mut cursor = list.walk();
                list.named_children(&mut cursor)
                    .filter(|child| child.kind() != "comment")
                    .collect()
            }
            None => Vec::new(),
        },
    }
}

fn text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or_default()
}
