//! User Service - command-line front end for user records.

use clap::{Parser, Subcommand};

use common::ServiceResult;
use domain::User;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "Create, read, update and delete user records")]
struct Cli {
    /// Database URL (overrides the environment)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    User(UserCommands),
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

// Numeric arguments accept negatives so the service reports them
#[derive(Subcommand)]
enum UserCommands {
    /// Create a user and print its id
    Create {
        name: String,
        email: String,
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },
    /// Show one user
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// List all users
    List,
    /// Replace name, email and age of a user
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        name: String,
        email: String,
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },
    /// Delete a user
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
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
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = UserServiceConfig::from_env();
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }

    common::init_tracing(&config.log.filter, cli.verbose);
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };

            let status = user_service_lib::run_migrations(&config, migrate_action).await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        Commands::User(command) => {
            let (db, service) = user_service_lib::connect_service(&config).await?;
            let outcome = run_user_command(&service, command).await;
            if let Err(e) = db.close().await {
                tracing::warn!("Failed to close database pool: {}", e);
            }

            if let Err(e) = outcome {
                eprintln!("ERROR [{}]: {}", e.code(), e.user_message());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run_user_command(service: &dyn UserService, command: UserCommands) -> ServiceResult<()> {
    match command {
        UserCommands::Create { name, email, age } => {
            let id = service.create(&name, &email, age).await?;
            println!("User created. id={}", id);
        }
        UserCommands::Get { id } => match service.find_by_id(id).await? {
            Some(user) => print_user(&user),
            None => println!("User not found."),
        },
        UserCommands::List => {
            let users = service.find_all().await?;
            if users.is_empty() {
                println!("No users in database.");
            }
            users.iter().for_each(print_user);
        }
        UserCommands::Update {
            id,
            name,
            email,
            age,
        } => {
            service.update_by_id(id, &name, &email, age).await?;
            println!("Updated.");
        }
        UserCommands::Delete { id } => {
            service.delete_by_id(id).await?;
            println!("Deleted.");
        }
    }

    Ok(())
}

fn print_user(user: &User) {
    match serde_json::to_string(user) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", user),
    }
}
