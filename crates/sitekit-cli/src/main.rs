//! Sitekit CLI - static sites on Kubernetes without the YAML chores

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod error;
mod exit_codes;
mod util;

#[derive(Parser)]
#[command(name = "sitekit")]
#[command(author = "Sitekit Contributors")]
#[command(version)]
#[command(about = "Static sites on Kubernetes without the YAML chores", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new site project
    Init {
        /// Project name (also the default namespace)
        name: String,

        /// Public domain for the site
        #[arg(short, long)]
        domain: String,

        /// Target namespace (defaults to the project name)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Number of serving replicas (1-10)
        #[arg(short, long)]
        replicas: Option<u32>,

        /// Parent directory for the new project
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Check variables, manifests, and topology without touching the cluster
    Validate {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output validation results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-resolve the manifest templates from sitekit.yaml
    Render {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory (if not set, outputs to stdout)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Show only the manifest whose file name ends with this
        #[arg(short = 's', long)]
        show_only: Option<String>,
    },

    /// Apply the six manifests to the cluster, in order
    Deploy {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Validate against the API server without persisting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete the site's resources, in reverse order
    Destroy {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show aggregated resource status
    Status {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch or follow pod logs
    Logs {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Stream new lines as they arrive
        #[arg(short, long)]
        follow: bool,

        /// Only show the last N lines
        #[arg(long)]
        tail: Option<i64>,
    },

    /// Show recent events in the site namespace
    Events {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Open an interactive shell in a serving pod
    Shell {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Target a specific pod instead of the first running one
        #[arg(short, long)]
        pod: Option<String>,
    },

    /// Forward a local port to the site service
    PortForward {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Local port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Print the public URL of the site
    Open {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show the project's variable set and derived values
    Info {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Produce the deployable content in dist/
    Build {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Build, sync, and port-forward in one pass
    Dev {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Local port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Push built content into every running pod (not for production)
    Sync {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Pull the served content into a local archive
    Backup {
        /// Project path
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Archive path (defaults to <name>-content-<timestamp>.tar.gz)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();

    // Set debug level
    if cli.debug {
        // SAFETY: We're the only thread at this point (start of main)
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start async runtime: {}", e);
            std::process::exit(exit_codes::ERROR);
        }
    };

    if let Err(err) = runtime.block_on(dispatch(cli)) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

async fn dispatch(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::Init {
            name,
            domain,
            namespace,
            replicas,
            output,
        } => commands::init::run(&name, &domain, namespace.as_deref(), replicas, &output),

        Commands::Validate { path, json } => commands::validate::run(&path, json),

        Commands::Render {
            path,
            output_dir,
            show_only,
        } => commands::render::run(&path, output_dir.as_deref(), show_only.as_deref()),

        Commands::Deploy { path, dry_run } => commands::deploy::run(&path, dry_run).await,

        Commands::Destroy { path, yes, dry_run } => {
            commands::destroy::run(&path, yes, dry_run).await
        }

        Commands::Status { path, json } => commands::status::run(&path, json).await,

        Commands::Logs { path, follow, tail } => commands::logs::run(&path, follow, tail).await,

        Commands::Events { path } => commands::events::run(&path).await,

        Commands::Shell { path, pod } => commands::shell::run(&path, pod.as_deref()).await,

        Commands::PortForward { path, port } => commands::port_forward::run(&path, port).await,

        Commands::Open { path } => commands::open::run(&path),

        Commands::Info { path, json } => commands::info::run(&path, json),

        Commands::Build { path } => commands::build::run(&path).await,

        Commands::Dev { path, port } => commands::dev::run(&path, port).await,

        Commands::Sync { path } => commands::sync::run(&path).await,

        Commands::Backup { path, output } => {
            commands::backup::run(&path, output.as_deref()).await
        }
    }
}
