//! # grob-edit
//!
//! Structural editing of Go sources for the `grob` CLI.
//!
//! A file is parsed into a lossless tree-sitter tree ([`SyntaxTree`]), an
//! insertion point is located by shape ([`anchor::find`]), a new node is
//! appended there ([`inject::inject`]), and the result is rendered and
//! written back atomically ([`emit`]). [`register`] chains these steps for
//! the two registrations the CLI performs.
//!
//! ```no_run
//! use grob_edit::{register_app, EmitOptions};
//!
//! register_app("shop/internal/main.go", "shop", "billing", &EmitOptions::default())?;
//! # Ok::<(), grob_edit::EditError>(())
//! ```

pub mod anchor;
pub mod emit;
pub mod error;
pub mod ident;
pub mod inject;
pub mod node;
pub mod register;
pub mod tree;
pub mod visit;

pub use anchor::{Anchor, AnchorKind};
pub use emit::{EmitOptions, Formatter};
pub use error::{EditError, ParseFailure};
pub use node::{CompositeLit, GoNode};
pub use register::{register_app, register_module, Registration, Stage};
pub use tree::SyntaxTree;
