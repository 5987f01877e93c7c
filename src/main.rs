use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// foodgram - recipe sharing backend
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipes, favorites, subscriptions and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load ingredients from a headerless `name,measurement_unit` CSV file
    ImportIngredients { path: PathBuf },
    /// Add a tag
    CreateTag {
        name: String,
        /// Hex color such as #E26C2D
        color: String,
        slug: String,
    },
    /// Change the role of a user
    SetRole {
        email: String,
        #[arg(value_enum)]
        role: cli::user::Role,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = foodgram::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Reset => cli::migrate::reset(&config).await,
        Commands::ImportIngredients { path } => {
            cli::catalog::import_ingredients(&config, path).await
        }
        Commands::CreateTag { name, color, slug } => {
            cli::catalog::create_tag(&config, name, color, slug).await
        }
        Commands::SetRole { email, role } => cli::user::set_role(&config, email, role).await,
    }
}
