use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pforte", version, about = "School portal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Credential management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Own profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// User search
    Users {
        #[command(subcommand)]
        action: commands::users::UsersAction,
    },
    /// Notification badges and feed
    Notifications {
        #[command(subcommand)]
        action: commands::notifications::NotificationsAction,
    },
    /// Mailbox listing and sending
    Mail {
        #[command(subcommand)]
        action: commands::mail::MailAction,
    },
    /// Calendar listing and event management
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Storage quota
    Storage,
    /// Group memberships
    Groups,
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action).await,
        Commands::Profile { action } => commands::profile::run(action).await,
        Commands::Users { action } => commands::users::run(action).await,
        Commands::Notifications { action } => commands::notifications::run(action).await,
        Commands::Mail { action } => commands::mail::run(action).await,
        Commands::Calendar { action } => commands::calendar::run(action).await,
        Commands::Storage => commands::storage::run().await,
        Commands::Groups => commands::groups::run().await,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pforte", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
