use std::path::{Path, PathBuf};

use crate::error::CliError;

/// The dependency manifest marking a project root.
pub const MANIFEST: &str = "go.mod";

/// An existing Grob project on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    module: String,
}

impl Project {
    /// Walk up from `start` until a directory holding `go.mod` is found,
    /// then read the module path from it.
    pub fn discover(start: &Path) -> Result<Self, CliError> {
        let root = find_root(start)?;
        let module = module_path(&root)?;
        tracing::debug!(root = %root.display(), %module, "project located");
        Ok(Self { root, module })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Go module path declared in `go.mod`, used as the import prefix.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// `internal/main.go`, where applications are registered.
    pub fn composition_file(&self) -> PathBuf {
        self.root.join("internal").join("main.go")
    }

    pub fn app_dir(&self, app: &str) -> PathBuf {
        self.root.join("internal").join(app)
    }

    /// `internal/<app>/<app>_main.go`, where modules are registered.
    pub fn app_main(&self, app: &str) -> PathBuf {
        self.app_dir(app).join(format!("{app}_main.go"))
    }

    pub fn module_dir(&self, app: &str, module: &str) -> PathBuf {
        self.app_dir(app).join(module)
    }
}

pub fn find_root(start: &Path) -> Result<PathBuf, CliError> {
    start
        .ancestors()
        .find(|dir| dir.join(MANIFEST).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| CliError::ProjectNotFound(start.to_path_buf()))
}

pub fn module_path(root: &Path) -> Result<String, CliError> {
    let path = root.join(MANIFEST);
    let content = std::fs::read_to_string(&path).map_err(|e| CliError::Manifest {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    parse_module_directive(&content).ok_or(CliError::Manifest {
        path,
        reason: "no module directive".into(),
    })
}

/// Extract the path from the `module` directive of a go.mod file.
pub fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!module.is_empty()).then(|| module.to_string())
    })
}
