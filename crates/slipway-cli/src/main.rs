mod commands;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "slipway", about = "Zero-configuration deploys for local containers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect, build, and run a project directory as a container (local mode, bypasses the queue)
    Deploy {
        /// Project directory (defaults to the current directory)
        path: Option<std::path::PathBuf>,
        /// Subdomain to publish under (defaults to a slug of the directory name)
        #[arg(long)]
        subdomain: Option<String>,
    },
    /// Check Docker socket, database, and queue reachability
    Doctor,
    /// Show a deployment's current state and build log
    Status {
        /// Deployment id
        deployment_id: Uuid,
    },
    /// Sample and print a running container's resource telemetry
    Telemetry {
        /// Container id
        container_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy { path, subdomain } => commands::deploy(path, subdomain).await?,
        Commands::Doctor => commands::doctor().await?,
        Commands::Status { deployment_id } => commands::status(deployment_id).await?,
        Commands::Telemetry { container_id } => commands::telemetry(&container_id).await?,
    }

    Ok(())
}
