//! Member Service - HTTP server for gym member and trainer management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use member_service_lib::{config::MemberServiceConfig, MigrateAction};

#[derive(Parser)]
#[command(name = "member-service")]
#[command(about = "Gym member and trainer management service", version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides SERVER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Issue a signed bearer token for local use
    Token {
        /// Token subject
        #[arg(long)]
        subject: String,
        /// Granted role, repeatable
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Lifetime in hours
        #[arg(long, default_value = "24")]
        ttl_hours: i64,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> common::AppResult<()> {
    let mut config = MemberServiceConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            member_service_lib::run_server(config).await
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            member_service_lib::run_migrations(&config, migrate_action).await
        }
        Commands::Token {
            subject,
            roles,
            ttl_hours,
        } => {
            let token = member_service_lib::issue_token(&config, &subject, roles, ttl_hours)?;
            println!("{}", token);
            Ok(())
        }
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
