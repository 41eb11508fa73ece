use std::path::PathBuf;

use grob_edit::EditError;

use crate::commands::templates::TemplateError;
use crate::config::ConfigError;

/// Everything a `grob` command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Directory '{}' already exists", .0.display())]
    DirectoryExists(PathBuf),

    #[error(
        "go.mod not found in '{}' or any parent directory. Make sure you are inside a Grob project.",
        .0.display()
    )]
    ProjectNotFound(PathBuf),

    #[error("App '{app}' not found at '{}'. Create it first with `grob create-app {app}`.", path.display())]
    AppNotFound { app: String, path: PathBuf },

    #[error("Invalid manifest '{}': {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to register {component}: {source}")]
    Register {
        component: String,
        #[source]
        source: EditError,
    },

    #[error("Failed to create '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
