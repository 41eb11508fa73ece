use super::Template;

pub const GO_MOD: Template = Template::new(
    "go.mod",
    r#"module {{ProjectName}}

go {{GoVersion}}

require (
	github.com/gin-gonic/gin {{GinVersion}}
	{{FrameworkModule}} {{FrameworkVersion}}
	go.uber.org/dig {{DigVersion}}
)
"#,
);

pub const GITIGNORE: Template = Template::new(
    ".gitignore",
    r#"# Binaries for programs and plugins
*.exe
*.exe~
*.dll
*.so
*.dylib
*.test
*.out
.idea/
"#,
);

/// Project composition file. Applications are registered into the `apps`
/// literal and the import block.
pub const INTERNAL_MAIN: Template = Template::new(
    "internal/main.go",
    r#"package main

import (
	"log"
	"sync"
)

// AppRunner defines the interface for a runnable application.
type AppRunner interface {
	Run()
}

func main() {
	apps := map[string]AppRunner{}

	var wg sync.WaitGroup

	if len(apps) == 0 {
		log.Println("No applications to run. Use 'grob create-app <app-name>' to create one.")
		return
	}

	for name, app := range apps {
		wg.Add(1)

		go func(appName string, runner AppRunner) {
			defer wg.Done()
			log.Printf("Starting application: %s", appName)
			runner.Run()
		}(name, app)
	}

	log.Println("All applications are starting...")
	wg.Wait()
	log.Println("All applications have been shut down.")
}
"#,
);
