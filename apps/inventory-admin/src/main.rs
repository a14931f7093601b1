//! Inventory Admin
//!
//! Provisioning CLI for the inventory service. Creates indexes and seed
//! data, and manages user accounts; none of this is exposed over HTTP.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::mongodb::MongoConfig;
use domain_catalog::{CatalogService, MongoCategoryRepository, MongoProductRepository};
use domain_users::{CreateUser, MongoUserRepository, UserService};
use eyre::Result;
use tracing::info;

mod seed;

#[derive(Parser)]
#[command(name = "inventory-admin")]
#[command(about = "Provision accounts and seed data for the inventory service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create indexes and seed the default admin account and sample categories
    Init,

    /// Provision a new user account
    CreateUser {
        /// Login email (must be unique)
        #[arg(short, long)]
        email: String,

        /// Plaintext password, hashed before storage
        #[arg(short, long)]
        password: String,

        /// Provision the account in a deactivated state
        #[arg(long)]
        inactive: bool,
    },

    /// Replace an existing user's password
    SetPassword {
        /// Email of the account to update
        #[arg(short, long)]
        email: String,

        /// New plaintext password
        #[arg(short, long)]
        password: String,
    },

    /// List provisioned users
    ListUsers,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    let mongodb = MongoConfig::from_env()?;
    info!("Connecting to MongoDB at {}", mongodb.url());
    let client = database::mongodb::connect_from_config(&mongodb).await?;
    let db = client.database(mongodb.database());

    let users = UserService::new(MongoUserRepository::new(db.clone()));

    match cli.command {
        Commands::Init => {
            let catalog = CatalogService::new(
                MongoCategoryRepository::new(db.clone()),
                MongoProductRepository::new(db.clone()),
            );
            seed::run(&users, &catalog).await?;
        }

        Commands::CreateUser {
            email,
            password,
            inactive,
        } => {
            let created = users
                .create_user(CreateUser {
                    email,
                    password,
                    is_active: !inactive,
                })
                .await?;
            println!("Created user {} ({})", created.email, created.id);
        }

        Commands::SetPassword { email, password } => {
            users.set_password(&email, &password).await?;
            println!("Password updated for {}", email);
        }

        Commands::ListUsers => {
            let all = users.list_users().await?;
            if all.is_empty() {
                println!("No users provisioned");
            }
            for user in all {
                let state = if user.is_active { "active" } else { "inactive" };
                println!("{}  {}  {}", user.id, user.email, state);
            }
        }
    }

    Ok(())
}
