use std::path::PathBuf;

/// Why a source file could not be turned into a [`SyntaxTree`](crate::SyntaxTree).
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    /// The file is missing or unreadable.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The tree contains an `ERROR` or `MISSING` node.
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
    /// tree-sitter gave up without producing a tree.
    #[error("parser produced no tree")]
    Aborted,
}

/// Errors raised by the code-mutation engine.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("cannot parse {}: {cause}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        cause: ParseFailure,
    },

    #[error("no {anchor} found in {}", path.display())]
    AnchorNotFound { anchor: String, path: PathBuf },

    #[error("cannot inject {node} into {anchor}: {reason}")]
    Inject {
        node: String,
        anchor: String,
        reason: String,
    },

    #[error("cannot render {}: {reason}", path.display())]
    Serialize { path: PathBuf, reason: String },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Go grammar unavailable: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

pub type Result<T, E = EditError> = std::result::Result<T, E>;
