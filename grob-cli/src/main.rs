use clap::{Parser, Subcommand};
use grob_cli::commands::{create_app, create_module, new_project};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grob", version, about = "Grob CLI: scaffold Go projects, apps and modules")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Grob project
    New {
        /// Project name, also used as the Go module path
        name: String,
    },
    /// Create an application inside the current project
    CreateApp {
        /// Application name (a Go identifier)
        app_name: String,
    },
    /// Create a module inside an existing application
    CreateModule {
        /// Application that owns the module
        app_name: String,
        /// Module name (a Go identifier)
        module_name: String,
    },
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("GROB_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::New { name } => new_project::run(&name),
        Commands::CreateApp { app_name } => create_app::run(&app_name),
        Commands::CreateModule {
            app_name,
            module_name,
        } => create_module::run(&app_name, &module_name),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
