use colored::Colorize;

use super::templates::module;
use super::{
    create_dir, current_dir, ensure_not_imported, rollback, validate_identifier, write_new,
};
use crate::config::GrobConfig;
use crate::error::CliError;
use crate::project::Project;

/// Create module `name` inside application `app`.
///
/// Writes `<name>.module.go`, `<name>.service.go` and `<name>.controller.go`
/// under `internal/<app>/<name>/`, then registers the module in
/// `internal/<app>/<app>_main.go`.
pub fn run(app: &str, name: &str) -> Result<(), CliError> {
    validate_identifier("app", app)?;
    validate_identifier("module", name)?;
    let project = Project::discover(&current_dir()?)?;
    let config = GrobConfig::load(project.root())?;
    create_module(&project, app, name, &config)
}

pub fn create_module(
    project: &Project,
    app: &str,
    name: &str,
    config: &GrobConfig,
) -> Result<(), CliError> {
    let app_dir = project.app_dir(app);
    if !app_dir.is_dir() {
        return Err(CliError::AppNotFound {
            app: app.to_string(),
            path: app_dir,
        });
    }

    let vars = [
        ("ProjectName", project.module()),
        ("AppName", app),
        ("ModuleName", name),
    ];
    let files = [
        (format!("{name}.module.go"), module::MODULE.render(&vars)?),
        (format!("{name}.service.go"), module::SERVICE.render(&vars)?),
        (format!("{name}.controller.go"), module::CONTROLLER.render(&vars)?),
    ];

    let module_dir = project.module_dir(app, name);
    if module_dir.exists() {
        return Err(CliError::DirectoryExists(module_dir));
    }
    let entry = project.app_main(app);
    ensure_not_imported("module", name, &entry)?;

    tracing::info!(app, module = name, dir = %module_dir.display(), "creating module");
    create_dir(&module_dir)?;

    let scaffolded = (|| -> Result<(), CliError> {
        for (file_name, content) in &files {
            write_new(&module_dir.join(file_name), content)?;
        }

        grob_edit::register_module(
            &entry,
            project.module(),
            app,
            name,
            &config.emit_options(),
        )
        .map_err(|source| CliError::Register {
            component: format!("module '{name}' in app '{app}'"),
            source,
        })
    })();

    if let Err(e) = scaffolded {
        rollback(&module_dir);
        return Err(e);
    }

    println!(
        "{} Module '{}' created at {}",
        "✓".green(),
        name.green(),
        module_dir.display().to_string().cyan()
    );
    println!("{} Registered in {app}_main.go", "✓".green());
    Ok(())
}
