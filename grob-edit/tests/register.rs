use grob_edit::emit;
use grob_edit::register::{imported_packages, module_type_name};
use grob_edit::{
    register_app, register_module, AnchorKind, CompositeLit, EditError, EmitOptions, Formatter,
    GoNode, ParseFailure, Registration, Stage, SyntaxTree,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROJECT_MAIN: &str = r#"package main

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
		log.Println("No applications to run.")
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

	wg.Wait()
}
"#;

const APP_MAIN: &str = r#"package billing

import (
	"shop/internal/billing/core"
)

// App is the entry point of the billing application.
type App struct{}

// Run initializes and starts the web application.
func (a App) Run() {
	app := core.New()

	// api := app.Router().Group("/api/billing")

	app.Start()
}
"#;

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// ── Application flow ────────────────────────────────────────────────

#[test]
fn register_app_adds_entry_and_import() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "main.go", PROJECT_MAIN);

    register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap();

    let expected = PROJECT_MAIN
        .replace(
            "\t\"sync\"\n)",
            "\t\"sync\"\n\t\"shop/internal/billing\"\n)",
        )
        .replace(
            "map[string]AppRunner{}",
            "map[string]AppRunner{\"billing\": billing.App{}}",
        );
    assert_eq!(read(&path), expected);
}

#[test]
fn register_two_apps() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "main.go", PROJECT_MAIN);

    register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap();
    register_app(&path, "shop", "admin", &EmitOptions::default()).unwrap();

    let main = read(&path);
    assert!(main.contains(
        "apps := map[string]AppRunner{\"billing\": billing.App{}, \"admin\": admin.App{}}"
    ));
    assert!(main.contains("\t\"shop/internal/billing\"\n\t\"shop/internal/admin\"\n)"));
}

// ── Module flow ─────────────────────────────────────────────────────

#[test]
fn register_module_adds_alias_and_argument() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "billing_main.go", APP_MAIN);

    register_module(&path, "shop", "billing", "invoices", &EmitOptions::default()).unwrap();

    let expected = APP_MAIN
        .replace(
            "\t\"shop/internal/billing/core\"\n)",
            "\t\"shop/internal/billing/core\"\n\tinvoices \"shop/internal/billing/invoices\"\n)",
        )
        .replace("core.New()", "core.New(invoices.InvoicesModule{})");
    assert_eq!(read(&path), expected);
}

#[test]
fn module_type_name_is_capitalized() {
    assert_eq!(module_type_name("invoices"), "InvoicesModule");
    assert_eq!(module_type_name("userProfile"), "UserProfileModule");
}

// ── Atomicity ───────────────────────────────────────────────────────

#[test]
fn missing_second_anchor_leaves_file_untouched() {
    let tmp = TempDir::new().unwrap();
    let source = "package main\n\nfunc main() {\n\tapps := map[string]AppRunner{}\n\t_ = apps\n}\n";
    let path = write_fixture(&tmp, "main.go", source);

    let err = register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap_err();

    assert!(matches!(err, EditError::AnchorNotFound { .. }));
    assert_eq!(read(&path), source);
}

#[test]
fn missing_call_leaves_file_untouched() {
    let tmp = TempDir::new().unwrap();
    let source = APP_MAIN.replace("core.New()", "core.Build()");
    let path = write_fixture(&tmp, "billing_main.go", &source);

    let err = register_module(&path, "shop", "billing", "invoices", &EmitOptions::default())
        .unwrap_err();

    assert!(err.to_string().contains("call to core.New"));
    assert_eq!(read(&path), source);
}

#[test]
fn failing_formatter_leaves_file_untouched() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "main.go", PROJECT_MAIN);
    let options = EmitOptions::with_formatter(Formatter::Command(PathBuf::from(
        "/nonexistent/grob-test/gofmt",
    )));

    let err = register_app(&path, "shop", "billing", &options).unwrap_err();

    assert!(matches!(err, EditError::Serialize { .. }));
    assert_eq!(read(&path), PROJECT_MAIN);
}

#[cfg(unix)]
#[test]
fn external_formatter_output_is_written() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "main.go", PROJECT_MAIN);
    let options = EmitOptions::with_formatter(Formatter::Command(PathBuf::from("cat")));

    register_app(&path, "shop", "billing", &options).unwrap();

    assert!(read(&path).contains("\"billing\": billing.App{}"));
}

#[test]
fn syntax_error_is_reported() {
    let tmp = TempDir::new().unwrap();
    let source = "package main\n\nfunc main() {\n\tapps := map[string]AppRunner{\n}\n";
    let path = write_fixture(&tmp, "main.go", source);

    let err = register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        EditError::Parse {
            cause: ParseFailure::Syntax { .. },
            ..
        }
    ));
    assert_eq!(read(&path), source);
}

#[test]
fn missing_file_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("absent.go");

    let err = register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        EditError::Parse {
            cause: ParseFailure::Io(_),
            ..
        }
    ));
    assert!(!path.exists());
}

#[test]
fn persist_failure_is_a_write_error() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("main.go");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep.go"), "package keep\n").unwrap();

    let err = emit::persist(&target, "package main\n").unwrap_err();

    assert!(matches!(err, EditError::Write { .. }));
    assert!(target.is_dir());
    assert_eq!(read(&target.join("keep.go")), "package keep\n");
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[cfg(unix)]
#[test]
fn read_only_directory_leaves_file_untouched() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("internal");
    fs::create_dir(&dir).unwrap();
    let path = dir.join("main.go");
    fs::write(&path, PROJECT_MAIN).unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();
    // Privileged users write through directory permissions.
    let enforced = fs::write(dir.join("access-check"), "").is_err();

    let result = register_app(&path, "shop", "billing", &EmitOptions::default());
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
    if !enforced {
        return;
    }

    assert!(matches!(result, Err(EditError::Write { .. })));
    assert_eq!(read(&path), PROJECT_MAIN);
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
}

#[test]
fn crlf_file_keeps_its_line_endings() {
    let tmp = TempDir::new().unwrap();
    let source = PROJECT_MAIN.replace('\n', "\r\n");
    let path = write_fixture(&tmp, "main.go", &source);

    register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap();

    let out = read(&path);
    assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    assert!(out.contains("\t\"sync\"\r\n\t\"shop/internal/billing\"\r\n)\r\n"));
    assert!(out.contains("map[string]AppRunner{\"billing\": billing.App{}}\r\n"));
    assert!(out.ends_with("}\r\n"));
}

// ── Imported names ──────────────────────────────────────────────────

#[test]
fn imported_packages_lists_bound_names() {
    let tree = SyntaxTree::parse(
        "main.go",
        "package main\n\nimport \"fmt\"\n\nimport (\n\t\"log\"\n\tx \"a/b\"\n\t_ \"c/d\"\n\t. \"e/f\"\n\t\"shop/internal/billing\"\n)\n\nfunc main() {}\n",
    )
    .unwrap();
    assert_eq!(imported_packages(&tree), ["fmt", "log", "x", "billing"]);
}

#[test]
fn imported_packages_without_imports() {
    let tree = SyntaxTree::parse("main.go", "package main\n\nfunc main() {}\n").unwrap();
    assert!(imported_packages(&tree).is_empty());
}

// ── Registration builder ────────────────────────────────────────────

#[test]
fn registration_walks_through_stages() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "billing_main.go", APP_MAIN);

    let registration = Registration::load(&path).unwrap();
    assert_eq!(registration.stage(), Stage::Loaded);

    let registration = registration
        .inject(
            &AnchorKind::selector_call("core", "New"),
            GoNode::argument(CompositeLit::new("users", "UsersModule")),
        )
        .unwrap();
    assert_eq!(registration.stage(), Stage::Injected);
    assert_eq!(read(&path), APP_MAIN, "nothing is written before commit");

    let stage = registration.commit(&EmitOptions::default()).unwrap();
    assert_eq!(stage, Stage::Persisted);
    assert!(read(&path).contains("core.New(users.UsersModule{})"));
}

#[test]
fn dropped_registration_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "main.go", PROJECT_MAIN);

    let registration = Registration::load(&path)
        .unwrap()
        .inject(
            &AnchorKind::StringKeyedMap,
            GoNode::keyed("billing", CompositeLit::new("billing", "App")),
        )
        .unwrap();
    assert!(registration.tree().source().contains("billing.App{}"));
    drop(registration);

    assert_eq!(read(&path), PROJECT_MAIN);
}

#[cfg(unix)]
#[test]
fn permissions_are_kept() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "main.go", PROJECT_MAIN);
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}

#[test]
fn no_temporary_files_remain() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "main.go", PROJECT_MAIN);

    register_app(&path, "shop", "billing", &EmitOptions::default()).unwrap();

    let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
