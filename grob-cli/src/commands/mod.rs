//! Command implementations for the `grob` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use grob_edit::ident::is_go_identifier;
use grob_edit::register::imported_packages;
use grob_edit::SyntaxTree;

use crate::error::CliError;

/// Application scaffolding (`grob create-app <app>`).
///
/// Creates `internal/<app>/` with its core re-exports and entry file,
/// then registers the app in `internal/main.go`.
pub mod create_app;

/// Module scaffolding (`grob create-module <app> <module>`).
///
/// Creates the module descriptor, service and controller, then registers
/// the module in the app's entry file.
pub mod create_module;

/// Project scaffolding (`grob new <name>`).
///
/// Creates the project directory with go.mod, .gitignore and the
/// `internal/main.go` composition file.
pub mod new_project;

/// Template rendering and the Go template bodies.
pub mod templates;

/// Reject app and module names that are not importable Go package names.
pub fn validate_identifier(kind: &'static str, name: &str) -> Result<(), CliError> {
    let reason = if !is_go_identifier(name) {
        "expected a Go identifier (ASCII letters, digits and '_', not a keyword)"
    } else if name == "main" {
        "package main cannot be imported"
    } else {
        return Ok(());
    };
    Err(CliError::InvalidName {
        kind,
        name: name.to_string(),
        reason,
    })
}

/// Reject `name` when `file` already imports a package under that name.
///
/// `file` is where the new package is about to be imported; a second
/// import of the same name would not compile.
pub(crate) fn ensure_not_imported(
    kind: &'static str,
    name: &str,
    file: &Path,
) -> Result<(), CliError> {
    let tree = SyntaxTree::load(file).map_err(|source| CliError::Register {
        component: format!("{kind} '{name}'"),
        source,
    })?;
    if imported_packages(&tree).iter().any(|package| package == name) {
        return Err(CliError::InvalidName {
            kind,
            name: name.to_string(),
            reason: "a package of that name is already imported where it would be registered",
        });
    }
    Ok(())
}

/// Reject project names that cannot be used as a directory and module path.
pub fn validate_project_name(name: &str) -> Result<(), CliError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(CliError::InvalidName {
            kind: "project",
            name: name.to_string(),
            reason: "expected ASCII letters, digits, '-', '_' or '.', not starting with '.'",
        })
    }
}

/// Create a single directory; an existing one is a [`CliError::DirectoryExists`].
pub(crate) fn create_dir(path: &Path) -> Result<(), CliError> {
    fs::create_dir(path).map_err(|source| match source.kind() {
        io::ErrorKind::AlreadyExists => CliError::DirectoryExists(path.to_path_buf()),
        _ => CliError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Write a file that must not exist yet.
pub(crate) fn write_new(path: &Path, content: &str) -> Result<(), CliError> {
    let io_err = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;
    tracing::debug!(path = %path.display(), "file written");
    Ok(())
}

/// Remove a directory created earlier in a command that then failed.
pub(crate) fn rollback(dir: &Path) {
    match fs::remove_dir_all(dir) {
        Ok(()) => tracing::info!(dir = %dir.display(), "removed partially created directory"),
        Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "could not remove directory"),
    }
}

pub(crate) fn current_dir() -> Result<std::path::PathBuf, CliError> {
    std::env::current_dir().map_err(|source| CliError::Io {
        path: ".".into(),
        source,
    })
}
