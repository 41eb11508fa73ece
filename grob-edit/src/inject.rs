use tree_sitter::Node;

use crate::anchor::{list_node, Anchor, AnchorKind};
use crate::error::{EditError, Result};
use crate::node::GoNode;
use crate::tree::SyntaxTree;

/// Byte range replacement computed against the current source.
#[derive(Debug, PartialEq, Eq)]
struct Splice {
    start: usize,
    end: usize,
    text: String,
}

impl Splice {
    fn insert(at: usize, text: String) -> Self {
        Self {
            start: at,
            end: at,
            text,
        }
    }
}

/// Append `node` as the last item of `anchor`.
///
/// Injection is append-only: after re-parsing, the anchor must hold
/// exactly one more item, every earlier item must be unchanged and in
/// order, and the file must still parse. No duplicate check is made.
pub fn inject(tree: &mut SyntaxTree, anchor: &Anchor, node: &GoNode) -> Result<()> {
    let fail = |reason: &str| EditError::Inject {
        node: node.to_string(),
        anchor: anchor.kind().to_string(),
        reason: reason.to_string(),
    };

    if !node.fits(anchor.kind()) {
        return Err(fail("node does not belong in this anchor"));
    }

    let rendered = node.to_string();
    let before = anchor.items(tree)?;

    let splice = {
        let target = anchor
            .node(tree)
            .ok_or_else(|| fail("anchor is no longer present"))?;
        let source = tree.source();
        let eol = tree.line_ending();
        let splice = match anchor.kind() {
            AnchorKind::ImportBlock => import_splice(source, eol, target, &rendered),
            kind => list_node(kind, target)
                .and_then(|list| list_splice(source, eol, list, &rendered)),
        };
        splice.ok_or_else(|| fail("anchor has an unexpected shape"))?
    };

    tracing::trace!(start = splice.start, end = splice.end, text = %splice.text, "splicing");
    tree.splice(splice.start, splice.end, &splice.text)?;

    if let Some(at) = tree.first_error() {
        return Err(fail(&format!(
            "result does not parse (line {}, column {})",
            at.row + 1,
            at.column + 1
        )));
    }

    let after = anchor.items(tree)?;
    let appended = after.len() == before.len() + 1
        && after[..before.len()] == before[..]
        && after.last() == Some(&rendered);
    if !appended {
        return Err(fail("existing items were altered"));
    }
    Ok(())
}

/// Append to a parenthesized or single import declaration.
///
/// New lines end in `eol`, the file's own line terminator.
fn import_splice(source: &str, eol: &str, decl: Node<'_>, spec: &str) -> Option<Splice> {
    let mut cursor = decl.walk();
    let children: Vec<Node<'_>> = decl.named_children(&mut cursor).collect();

    if let Some(list) = children.iter().find(|c| c.kind() == "import_spec_list") {
        let mut inner = list.walk();
        let parts: Vec<Node<'_>> = list.children(&mut inner).collect();
        let close = parts.last().filter(|c| c.kind() == ")")?;
        let last_spec = parts.iter().rev().find(|c| c.kind() == "import_spec");

        let close_start = close.start_byte();
        let close_line = line_start(source, close_start);
        let own_line =
            close_line > list.start_byte() && source[close_line..close_start].trim().is_empty();

        return Some(if own_line {
            let indent = match last_spec {
                Some(last) => indent_of(source, last.start_byte()).to_string(),
                None => format!("{}\t", indent_of(source, close_start)),
            };
            Splice::insert(close_line, format!("{indent}{spec}{eol}"))
        } else {
            Splice::insert(close_start, format!("{eol}\t{spec}{eol}"))
        });
    }

    // A lone `import "x"` becomes a parenthesized block.
    let single = children.iter().find(|c| c.kind() == "import_spec")?;
    let existing = &source[single.byte_range()];
    Some(Splice {
        start: single.start_byte(),
        end: single.end_byte(),
        text: format!("({eol}\t{existing}{eol}\t{spec}{eol})"),
    })
}

/// Append to a `{...}` literal body or a `(...)` argument list.
fn list_splice(source: &str, eol: &str, list: Node<'_>, item: &str) -> Option<Splice> {
    let mut cursor = list.walk();
    let children: Vec<Node<'_>> = list.children(&mut cursor).collect();
    let (open, close) = match children.as_slice() {
        [open, .., close] => (*open, *close),
        _ => return None,
    };

    let last = children
        .iter()
        .rev()
        .find(|c| c.is_named() && c.kind() != "comment");
    let trailing_comma = children[..children.len() - 1]
        .iter()
        .rev()
        .find(|c| c.kind() != "comment")
        .filter(|c| c.kind() == ",");

    let close_start = close.start_byte();
    let close_line = line_start(source, close_start);
    let multiline = source[open.end_byte()..close_start].contains('\n')
        && source[close_line..close_start].trim().is_empty();

    Some(match (multiline, last, trailing_comma) {
        (true, Some(last), Some(_)) => Splice::insert(
            close_line,
            format!("{}{item},{eol}", indent_of(source, last.start_byte())),
        ),
        (true, Some(last), None) => Splice::insert(
            last.end_byte(),
            format!(",{eol}{}{item},", indent_of(source, last.start_byte())),
        ),
        (true, None, _) => Splice::insert(
            close_line,
            format!("{}\t{item},{eol}", indent_of(source, close_start)),
        ),
        (false, None, _) => Splice::insert(close_start, item.to_string()),
        (false, Some(_), Some(comma)) => Splice::insert(comma.end_byte(), format!(" {item}")),
        (false, Some(last), None) => Splice::insert(last.end_byte(), format!(", {item}")),
    })
}

fn line_start(source: &str, byte: usize) -> usize {
    source[..byte].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line holding `byte`.
fn indent_of(source: &str, byte: usize) -> &str {
    let start = line_start(source, byte);
    let rest = &source[start..];
    let width = rest
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(rest.len());
    &rest[..width]
}
