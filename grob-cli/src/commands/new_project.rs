use colored::Colorize;
use std::path::Path;

use super::templates::project;
use super::{create_dir, current_dir, validate_project_name, write_new};
use crate::config::GrobConfig;
use crate::error::CliError;

/// Create a new Grob project named `name` in the current directory.
///
/// Writes `go.mod` (module path `name`), `.gitignore`, and
/// `internal/main.go` holding an empty application registry.
///
/// Returns [`CliError::DirectoryExists`] if `name` already exists; nothing
/// is created in that case.
pub fn run(name: &str) -> Result<(), CliError> {
    validate_project_name(name)?;
    let config = GrobConfig::load(&current_dir()?)?;
    generate_project(name, &config)
}

fn generate_project(name: &str, config: &GrobConfig) -> Result<(), CliError> {
    let project_dir = Path::new(name);
    if project_dir.exists() {
        return Err(CliError::DirectoryExists(project_dir.to_path_buf()));
    }

    let vars = [
        ("ProjectName", name),
        ("GoVersion", config.go_version.as_str()),
        ("GinVersion", config.gin_version.as_str()),
        ("FrameworkModule", config.framework_module.as_str()),
        ("FrameworkVersion", config.framework_version.as_str()),
        ("DigVersion", config.dig_version.as_str()),
    ];
    let go_mod = project::GO_MOD.render(&vars)?;
    let gitignore = project::GITIGNORE.render(&[])?;
    let internal_main = project::INTERNAL_MAIN.render(&[])?;

    tracing::info!(project = name, "creating project");
    println!("{} Creating new Grob project: {}", "->".blue(), name.green());

    create_dir(project_dir)?;
    let internal = project_dir.join("internal");
    create_dir(&internal)?;

    // 1. go.mod
    write_new(&project_dir.join("go.mod"), &go_mod)?;

    // 2. .gitignore
    write_new(&project_dir.join(".gitignore"), &gitignore)?;

    // 3. internal/main.go
    write_new(&internal.join("main.go"), &internal_main)?;

    println!(
        "{} Project '{}' created successfully!",
        "✓".green(),
        name.green()
    );
    println!();
    println!("  cd {name}");
    println!("  grob create-app myapp");
    println!("  go mod tidy  # To download dependencies");

    Ok(())
}
