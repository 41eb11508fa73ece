use colored::Colorize;

use super::templates::app;
use super::{
    create_dir, current_dir, ensure_not_imported, rollback, validate_identifier, write_new,
};
use crate::config::GrobConfig;
use crate::error::CliError;
use crate::project::Project;

/// Create application `name` inside the enclosing Grob project.
///
/// Creates `internal/<name>/core/core.go` and `internal/<name>/<name>_main.go`,
/// then registers the app in `internal/main.go`. If registration fails,
/// the new app directory is removed and `internal/main.go` is left as it was.
pub fn run(name: &str) -> Result<(), CliError> {
    validate_identifier("app", name)?;
    let project = Project::discover(&current_dir()?)?;
    let config = GrobConfig::load(project.root())?;
    create_app(&project, name, &config)
}

pub fn create_app(project: &Project, name: &str, config: &GrobConfig) -> Result<(), CliError> {
    let vars = [
        ("ProjectName", project.module()),
        ("AppName", name),
        ("FrameworkModule", config.framework_module.as_str()),
    ];
    let core_go = app::CORE.render(&vars)?;
    let main_go = app::APP_MAIN.render(&vars)?;

    let app_dir = project.app_dir(name);
    if app_dir.exists() {
        return Err(CliError::DirectoryExists(app_dir));
    }
    let composition = project.composition_file();
    ensure_not_imported("app", name, &composition)?;

    tracing::info!(app = name, dir = %app_dir.display(), "creating application");
    create_dir(&app_dir)?;

    let scaffolded = (|| -> Result<(), CliError> {
        let core_dir = app_dir.join("core");
        create_dir(&core_dir)?;
        write_new(&core_dir.join("core.go"), &core_go)?;
        write_new(&project.app_main(name), &main_go)?;

        grob_edit::register_app(&composition, project.module(), name, &config.emit_options())
            .map_err(|source| CliError::Register {
                component: format!("app '{name}'"),
                source,
            })
    })();

    if let Err(e) = scaffolded {
        rollback(&app_dir);
        return Err(e);
    }

    println!(
        "{} Application '{}' created at {}",
        "✓".green(),
        name.green(),
        app_dir.display().to_string().cyan()
    );
    println!("{} Registered in internal/main.go", "✓".green());
    Ok(())
}
