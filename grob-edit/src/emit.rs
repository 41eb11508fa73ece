use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{EditError, Result};
use crate::tree::SyntaxTree;

/// The standard Go formatter, looked up on `PATH` by [`Formatter::detect`].
pub const GOFMT: &str = "gofmt";

/// How a mutated tree is turned back into text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Formatter {
    /// Emit the tree's source as is. Injected nodes are laid out the way
    /// gofmt prints them, but the rest of the file is not reformatted.
    #[default]
    Verbatim,
    /// Pipe the source through a gofmt-compatible program (stdin to stdout).
    Command(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub formatter: Formatter,
}

impl Formatter {
    /// `gofmt` from `PATH`, if it is installed.
    pub fn detect() -> Option<Self> {
        let path = std::env::var_os("PATH")?;
        locate(GOFMT, &path).map(Formatter::Command)
    }
}

impl EmitOptions {
    pub fn with_formatter(formatter: Formatter) -> Self {
        Self { formatter }
    }

    /// Canonical gofmt output when gofmt is installed, verbatim otherwise.
    pub fn detect() -> Self {
        match Formatter::detect() {
            Some(formatter) => {
                tracing::debug!(?formatter, "formatter found");
                Self::with_formatter(formatter)
            }
            None => {
                tracing::warn!("{GOFMT} not found on PATH, rewritten files will not be reformatted");
                Self::default()
            }
        }
    }
}

/// First executable named `program` in the directory list `path_var`
/// (formatted like `PATH`).
pub fn locate(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    let file_name = format!("{program}{}", std::env::consts::EXE_SUFFIX);
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(&file_name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Render `tree` to its final text, entirely in memory.
pub fn render(tree: &SyntaxTree, options: &EmitOptions) -> Result<String> {
    match &options.formatter {
        Formatter::Verbatim => Ok(with_final_newline(tree.source(), tree.line_ending())),
        Formatter::Command(program) => {
            let serialize_err = |reason: String| EditError::Serialize {
                path: tree.path().to_path_buf(),
                reason,
            };
            let formatted = run_formatter(program, tree.source()).map_err(serialize_err)?;
            let reparsed = SyntaxTree::parse(tree.path(), formatted)
                .map_err(|e| serialize_err(format!("formatter output is invalid: {e}")))?;
            Ok(reparsed.into_source())
        }
    }
}

/// Replace the file at `path` with `text`.
///
/// The text goes to a temporary file next to the target, which is then
/// renamed over it; a failure at any step leaves the target untouched.
/// The target's permissions are carried over.
pub fn persist(path: &Path, text: &str) -> Result<()> {
    let write_err = |source: io::Error| EditError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(text.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(staged.path(), meta.permissions()).map_err(write_err)?;
    }
    staged.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

fn with_final_newline(source: &str, eol: &str) -> String {
    let mut text = source.trim_end().to_string();
    text.push_str(eol);
    text
}

fn run_formatter(program: &Path, source: &str) -> std::result::Result<String, String> {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("cannot run {}: {e}", program.display()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(source.as_bytes())
            .map_err(|e| format!("cannot feed {}: {e}", program.display()))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("{} did not finish: {e}", program.display()))?;
    if !output.status.success() {
        return Err(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    String::from_utf8(output.stdout).map_err(|e| format!("formatter output is not UTF-8: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn locate_skips_non_executables() {
        use std::os::unix::fs::PermissionsExt;

        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let plain = first.path().join("gofmt");
        fs::write(&plain, "").unwrap();
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();
        let runnable = second.path().join("gofmt");
        fs::write(&runnable, "#!/bin/sh\ncat\n").unwrap();
        fs::set_permissions(&runnable, fs::Permissions::from_mode(0o755)).unwrap();

        let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(locate("gofmt", &path_var), Some(runnable));
        assert_eq!(locate("goimports", &path_var), None);
        assert_eq!(locate("gofmt", OsStr::new("")), None);
    }

    #[test]
    fn final_newline_is_normalized() {
        assert_eq!(with_final_newline("package a", "\n"), "package a\n");
        assert_eq!(with_final_newline("package a\n\n\n", "\n"), "package a\n");
        assert_eq!(with_final_newline("package a\n", "\n"), "package a\n");
        assert_eq!(with_final_newline("package a\r\n", "\r\n"), "package a\r\n");
    }
}
