use std::path::Path;

use tree_sitter::Node;

use crate::anchor::{self, item_nodes, AnchorKind};
use crate::emit::{self, EmitOptions};
use crate::error::Result;
use crate::ident::capitalize;
use crate::inject;
use crate::node::{CompositeLit, GoNode};
use crate::tree::SyntaxTree;

/// Type every generated application exports from its package.
pub const APP_TYPE: &str = "App";

/// Receiver and constructor of the module list in an app entry file.
pub const MODULE_RECEIVER: &str = "core";
pub const MODULE_CONSTRUCTOR: &str = "New";

/// Progress of one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loaded,
    AnchorFound,
    Injected,
    Serialized,
    Persisted,
}

/// One load → inject → commit sequence against a single file.
///
/// All edits stay in memory until [`Registration::commit`]; dropping a
/// registration, or any error before the final rename, leaves the file
/// on disk as it was.
pub struct Registration {
    tree: SyntaxTree,
    stage: Stage,
}

impl Registration {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let tree = SyntaxTree::load(path)?;
        let mut registration = Self {
            tree,
            stage: Stage::Loaded,
        };
        registration.advance(Stage::Loaded);
        Ok(registration)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Locate the first anchor of `kind` and append `node` to it.
    pub fn inject(mut self, kind: &AnchorKind, node: GoNode) -> Result<Self> {
        let found = anchor::find(&self.tree, kind)?;
        self.advance(Stage::AnchorFound);
        inject::inject(&mut self.tree, &found, &node)?;
        self.advance(Stage::Injected);
        Ok(self)
    }

    /// Render the tree and replace the file with the result.
    pub fn commit(mut self, options: &EmitOptions) -> Result<Stage> {
        let text = emit::render(&self.tree, options)?;
        self.advance(Stage::Serialized);
        emit::persist(self.tree.path(), &text)?;
        self.advance(Stage::Persisted);
        Ok(self.stage)
    }

    fn advance(&mut self, stage: Stage) {
        self.stage = stage;
        tracing::debug!(path = %self.tree.path().display(), ?stage, "registration");
    }
}

/// Register application `app` in the project composition file at `path`.
///
/// Adds `"app": app.App{}` to the first `map[string]` literal and imports
/// `project/internal/app`.
pub fn register_app(
    path: impl AsRef<Path>,
    project: &str,
    app: &str,
    options: &EmitOptions,
) -> Result<()> {
    Registration::load(path)?
        .inject(
            &AnchorKind::StringKeyedMap,
            GoNode::keyed(app, CompositeLit::new(app, APP_TYPE)),
        )?
        .inject(
            &AnchorKind::ImportBlock,
            GoNode::import(format!("{project}/internal/{app}")),
        )?
        .commit(options)?;
    Ok(())
}

/// Register `module` in the entry file of application `app` at `path`.
///
/// Imports `project/internal/app/module` under the alias `module` and
/// passes `module.<Module>Module{}` to the first `core.New(...)` call.
pub fn register_module(
    path: impl AsRef<Path>,
    project: &str,
    app: &str,
    module: &str,
    options: &EmitOptions,
) -> Result<()> {
    Registration::load(path)?
        .inject(
            &AnchorKind::ImportBlock,
            GoNode::aliased_import(module, format!("{project}/internal/{app}/{module}")),
        )?
        .inject(
            &AnchorKind::selector_call(MODULE_RECEIVER, MODULE_CONSTRUCTOR),
            GoNode::argument(CompositeLit::new(module, module_type_name(module))),
        )?
        .commit(options)?;
    Ok(())
}

/// Package names bound by the imports of `tree`: the alias when there is
/// one, otherwise the last element of the import path. Blank (`_`) and dot
/// imports bind no name.
pub fn imported_packages(tree: &SyntaxTree) -> Vec<String> {
    let root = tree.root();
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter(|node| node.kind() == "import_declaration")
        .flat_map(|decl| item_nodes(&AnchorKind::ImportBlock, decl))
        .filter_map(|spec| bound_name(tree, spec))
        .collect()
}

fn bound_name(tree: &SyntaxTree, spec: Node<'_>) -> Option<String> {
    let name = match spec.child_by_field_name("name") {
        Some(alias) => tree.text(alias),
        None => {
            let path = tree.text(spec.child_by_field_name("path")?);
            path.trim_matches(|c| c == '"' || c == '`').rsplit('/').next()?
        }
    };
    (name != "_" && name != ".").then(|| name.to_string())
}

/// Descriptor type generated for a module: `invoices` → `InvoicesModule`.
pub fn module_type_name(module: &str) -> String {
    format!("{}Module", capitalize(module))
}
