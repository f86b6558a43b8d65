//! Command-line adapter over `usermgr_core`.
//!
//! # Responsibility
//! - Translate subcommands into `UserService` actions and print results.
//! - Keep business rules in core; this binary only parses and renders.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;
use usermgr_core::{
    HttpUserRemote, NewUserInput, RecordId, RemoteConfig, RemoteId, SortDirection, SortField,
    User, UserService, DEFAULT_BASE_URL,
};

#[derive(Debug, Parser)]
#[command(name = "usermgr", about = "Browse and edit a remote user collection")]
struct Cli {
    /// Base URL of the service exposing `/users`.
    #[arg(long, env = "USERMGR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, default_value_t = usermgr_core::default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "USERMGR_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List users, optionally filtered and sorted.
    List {
        /// Case-insensitive search over name, email and phone.
        #[arg(long, default_value = "")]
        filter: String,
        /// Sort field (name|username|email|phone|website|id).
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort descending instead of ascending.
        #[arg(long)]
        desc: bool,
    },
    /// Fetch one user from the remote collection.
    Show { id: RemoteId },
    /// Validate and create one user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        website: String,
    },
    /// Delete one user.
    Delete { id: RemoteId },
    /// Print the core version.
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        usermgr_core::init_logging(&cli.log_level, log_dir).map_err(|err| err.to_string())?;
    }

    if let Command::Version = cli.command {
        println!("usermgr_core version={}", usermgr_core::core_version());
        return Ok(());
    }

    let config = RemoteConfig::new(&cli.base_url)
        .map_err(|err| err.to_string())?
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let remote = HttpUserRemote::new(&config).map_err(|err| err.to_string())?;
    let mut service = UserService::new(remote);

    match cli.command {
        Command::List { filter, sort, desc } => {
            service.load_users().await.map_err(|err| err.to_string())?;
            service.set_filter(&filter);
            if let Some(field) = sort {
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                service.sort(field, direction);
            }
            for user in service.store().filtered() {
                print_row(user);
            }
            let count = service.count();
            println!("shown {} of {}", count.filtered, count.total);
        }
        Command::Show { id } => {
            let user = service
                .fetch_user(&RecordId::from(id))
                .await
                .map_err(|err| err.to_string())?;
            print_details(&user);
        }
        Command::Create {
            name,
            email,
            phone,
            website,
        } => {
            service.load_users().await.map_err(|err| err.to_string())?;
            let user = service
                .create_user(NewUserInput {
                    name,
                    email,
                    phone,
                    website,
                })
                .await
                .map_err(|err| err.to_string())?;
            println!("created");
            print_row(&user);
        }
        Command::Delete { id } => {
            service.load_users().await.map_err(|err| err.to_string())?;
            service
                .delete_user(&RecordId::from(id.clone()))
                .await
                .map_err(|err| err.to_string())?;
            println!("deleted {id}");
        }
        Command::Version => {}
    }

    Ok(())
}

fn print_row(user: &User) {
    let id = user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{id}\t{}\t{}\t{}\t{}",
        user.display_name(),
        user.email,
        user.phone,
        user.website_url()
    );
}

fn print_details(user: &User) {
    print_row(user);
    if let Some(address) = user.full_address() {
        println!("address\t{address}");
    }
    if let Some(company) = user.company_info() {
        println!("company\t{}\t{}\t{}", company.name, company.slogan, company.business);
    }
}
