use std::fmt;

use crate::anchor::AnchorKind;

/// Zero-valued instance of a package-qualified type: `billing.App{}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeLit {
    pub package: String,
    pub type_name: String,
}

impl CompositeLit {
    pub fn new(package: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for CompositeLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{{}}", self.package, self.type_name)
    }
}

/// A node to be appended at an anchor.
///
/// Its `Display` output is the Go source of the node, laid out the way
/// gofmt prints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoNode {
    /// `alias "path"` inside an import block.
    ImportSpec { alias: Option<String>, path: String },
    /// `"key": pkg.Type{}` inside a map literal.
    KeyedElement { key: String, value: CompositeLit },
    /// `pkg.Type{}` as a call argument.
    Argument(CompositeLit),
}

impl GoNode {
    pub fn import(path: impl Into<String>) -> Self {
        GoNode::ImportSpec {
            alias: None,
            path: path.into(),
        }
    }

    pub fn aliased_import(alias: impl Into<String>, path: impl Into<String>) -> Self {
        GoNode::ImportSpec {
            alias: Some(alias.into()),
            path: path.into(),
        }
    }

    pub fn keyed(key: impl Into<String>, value: CompositeLit) -> Self {
        GoNode::KeyedElement {
            key: key.into(),
            value,
        }
    }

    pub fn argument(value: CompositeLit) -> Self {
        GoNode::Argument(value)
    }

    /// Whether this node belongs to the child grammar of `anchor`.
    pub fn fits(&self, anchor: &AnchorKind) -> bool {
        matches!(
            (self, anchor),
            (GoNode::ImportSpec { .. }, AnchorKind::ImportBlock)
                | (GoNode::KeyedElement { .. }, AnchorKind::StringKeyedMap)
                | (GoNode::Argument(_), AnchorKind::SelectorCall { .. })
        )
    }
}

impl fmt::Display for GoNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoNode::ImportSpec {
                alias: Some(alias),
                path,
            } => write!(f, "{alias} {}", quote(path)),
            GoNode::ImportSpec { alias: None, path } => f.write_str(&quote(path)),
            GoNode::KeyedElement { key, value } => write!(f, "{}: {value}", quote(key)),
            GoNode::Argument(value) => write!(f, "{value}"),
        }
    }
}

/// Go interpreted string literal for `value`.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
