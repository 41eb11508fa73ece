use std::path::{Path, PathBuf};

use tree_sitter::{InputEdit, Node, Parser, Point, Tree};

use crate::error::{EditError, ParseFailure, Result};
use crate::visit::{walk, Visit};

/// A parsed Go source file.
///
/// Holds the full source text next to its tree-sitter concrete syntax
/// tree, so comments and layout survive every edit. The parser is kept
/// around to re-parse incrementally after [`SyntaxTree::splice`].
pub struct SyntaxTree {
    path: PathBuf,
    source: String,
    tree: Tree,
    parser: Parser,
}

impl SyntaxTree {
    /// Read and parse the Go file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EditError::Parse {
            path: path.to_path_buf(),
            cause: ParseFailure::Io(e),
        })?;
        Self::parse(path, source)
    }

    /// Parse `source` as the content of `path`.
    ///
    /// Fails if the tree contains any syntax error.
    pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let source = source.into();

        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| EditError::Parse {
                path: path.clone(),
                cause: ParseFailure::Aborted,
            })?;

        let parsed = Self {
            path,
            source,
            tree,
            parser,
        };
        if let Some(at) = parsed.first_error() {
            return Err(EditError::Parse {
                path: parsed.path,
                cause: ParseFailure::Syntax {
                    line: at.row + 1,
                    column: at.column + 1,
                },
            });
        }
        Ok(parsed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Line terminator used by the file, taken from its first line.
    pub fn line_ending(&self) -> &'static str {
        line_ending(&self.source)
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// S-expression of the whole tree, used to compare tree shapes.
    pub fn sexp(&self) -> String {
        self.root().to_sexp()
    }

    /// Position of the first `ERROR` or `MISSING` node, if any.
    pub fn first_error(&self) -> Option<Point> {
        let root = self.root();
        if !root.has_error() {
            return None;
        }
        let mut found = None;
        walk(root, |node| {
            if node.is_error() || node.is_missing() {
                found = Some(node.start_position());
                Visit::Stop
            } else if node.has_error() {
                Visit::Descend
            } else {
                Visit::Skip
            }
        });
        found
    }

    /// Replace the bytes in `start..end` with `text` and re-parse.
    ///
    /// The resulting tree may contain syntax errors; callers check
    /// [`SyntaxTree::first_error`] when that matters.
    pub fn splice(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        let start_position = point_at(&self.source, start);
        let old_end_position = point_at(&self.source, end);

        self.source.replace_range(start..end, text);
        let new_end_byte = start + text.len();

        self.tree.edit(&InputEdit {
            start_byte: start,
            old_end_byte: end,
            new_end_byte,
            start_position,
            old_end_position,
            new_end_position: point_at(&self.source, new_end_byte),
        });

        self.tree = self
            .parser
            .parse(&self.source, Some(&self.tree))
            .ok_or_else(|| EditError::Parse {
                path: self.path.clone(),
                cause: ParseFailure::Aborted,
            })?;
        Ok(())
    }
}

/// `"\r\n"` when the first line ends in CRLF, `"\n"` otherwise.
pub fn line_ending(source: &str) -> &'static str {
    match source.find('\n') {
        Some(i) if source[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Row/column of a byte offset, in tree-sitter terms (zero-based, column in bytes).
fn point_at(source: &str, byte: usize) -> Point {
    let before = &source.as_bytes()[..byte];
    let row = before.iter().filter(|b| **b == b'\n').count();
    let column = before.iter().rev().take_while(|b| **b != b'\n').count();
    Point::new(row, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_at_counts_rows_and_columns() {
        let src = "ab\ncde\nf";
        assert_eq!(point_at(src, 0), Point::new(0, 0));
        assert_eq!(point_at(src, 2), Point::new(0, 2));
        assert_eq!(point_at(src, 3), Point::new(1, 0));
        assert_eq!(point_at(src, 5), Point::new(1, 2));
        assert_eq!(point_at(src, 7), Point::new(2, 0));
    }

    #[test]
    fn line_ending_follows_first_line() {
        assert_eq!(line_ending("package a\r\n"), "\r\n");
        assert_eq!(line_ending("package a\n\r\n"), "\n");
        assert_eq!(line_ending("package a"), "\n");
    }

    #[test]
    fn splice_reparses() {
        let mut tree = SyntaxTree::parse("x.go", "package main\n\nfunc a() {}\n").unwrap();
        let at = tree.source().find("a()").unwrap();
        tree.splice(at, at + 1, "renamed").unwrap();

        assert_eq!(tree.source(), "package main\n\nfunc renamed() {}\n");
        assert!(tree.first_error().is_none());
        let fresh = SyntaxTree::parse("x.go", tree.source().to_string()).unwrap();
        assert_eq!(fresh.sexp(), tree.sexp());
    }

    #[test]
    fn splice_can_introduce_errors() {
        let mut tree = SyntaxTree::parse("x.go", "package main\n\nfunc a() {}\n").unwrap();
        let at = tree.source().find('{').unwrap();
        tree.splice(at, at + 1, "").unwrap();
        assert!(tree.first_error().is_some());
    }
}
