use super::Template;

pub const MODULE: Template = Template::new(
    "module.go",
    r#"package {{ModuleName}}

import (
	"{{ProjectName}}/internal/{{AppName}}/core"

	"go.uber.org/dig"
)

// {{ModuleName | Title}}Module implements the framework Module interface.
type {{ModuleName | Title}}Module struct{}

var _ core.Module = {{ModuleName | Title}}Module{}

// Register provides the components of this module to the dependency injection container.
func (m {{ModuleName | Title}}Module) Register(container *dig.Container) error {
	if err := container.Provide(New{{ModuleName | Title}}Service); err != nil {
		return err
	}

	if err := container.Provide(New{{ModuleName | Title}}Controller); err != nil {
		return err
	}

	return nil
}
"#,
);

pub const SERVICE: Template = Template::new(
    "service.go",
    r#"package {{ModuleName}}

import "log"

// {{ModuleName | Title}}Service defines the business logic for the {{ModuleName}} module.
type {{ModuleName | Title}}Service struct {
	// Add dependencies here, e.g., a database connection
}

// New{{ModuleName | Title}}Service creates a new service instance.
func New{{ModuleName | Title}}Service() *{{ModuleName | Title}}Service {
	return &{{ModuleName | Title}}Service{}
}

// ExampleMethod is an example of a service method.
func (s *{{ModuleName | Title}}Service) ExampleMethod() string {
	log.Println("{{ModuleName | Title}}Service: ExampleMethod called")
	return "Hello from {{ModuleName | Title}}Service!"
}
"#,
);

pub const CONTROLLER: Template = Template::new(
    "controller.go",
    r#"package {{ModuleName}}

import (
	"net/http"

	"github.com/gin-gonic/gin"
)

// {{ModuleName | Title}}Controller handles the HTTP requests for the {{ModuleName}} module.
type {{ModuleName | Title}}Controller struct {
	service *{{ModuleName | Title}}Service
}

// New{{ModuleName | Title}}Controller creates a new controller with its dependencies.
func New{{ModuleName | Title}}Controller(service *{{ModuleName | Title}}Service) *{{ModuleName | Title}}Controller {
	return &{{ModuleName | Title}}Controller{service: service}
}

// RegisterRoutes sets up the routes for this controller.
func (c *{{ModuleName | Title}}Controller) RegisterRoutes(router *gin.RouterGroup) {
	router.GET("/", c.GetExample)
}

// GetExample is an example handler function.
func (c *{{ModuleName | Title}}Controller) GetExample(ctx *gin.Context) {
	message := c.service.ExampleMethod()
	ctx.JSON(http.StatusOK, gin.H{"message": message})
}
"#,
);
