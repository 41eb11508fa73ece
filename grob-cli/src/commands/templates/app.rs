use super::Template;

pub const CORE: Template = Template::new(
    "core/core.go",
    r#"package core

import "{{FrameworkModule}}/pkg/framework"

// Re-export the framework types to make them local to the app.
type App = framework.App
type Module = framework.Module

var New = framework.New
"#,
);

/// Application entry file. Modules are registered into the import block
/// and the `core.New(...)` call.
pub const APP_MAIN: Template = Template::new(
    "app_main.go",
    r#"package {{AppName}}

import (
	"{{ProjectName}}/internal/{{AppName}}/core"
)

// App is the entry point of the {{AppName}} application.
type App struct{}

// Run initializes and starts the web application.
func (a App) Run() {
	app := core.New()

	// Example of creating a route group for this app:
	// api := app.Router().Group("/api/{{AppName}}")
	// Controllers then register their routes with this group.

	app.Start()
}
"#,
);
