use clap::Subcommand;
use pforte_core::{credentials, Config, PortalSession};

use super::common;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Verify credentials against the portal and store them in the keyring
    Login {
        #[arg(long)]
        username: String,
        /// Password; falls back to $PFORTE_PASSWORD when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove stored credentials
    Logout,
    /// Check whether the stored credentials still work
    Status,
}

pub async fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => std::env::var("PFORTE_PASSWORD")
                    .map_err(|_| "no --password given and PFORTE_PASSWORD is unset")?,
            };
            let config = Config::load()?;
            let session = PortalSession::login(&config, &username, &password).await?;
            credentials::set("username", &username)?;
            credentials::set("password", &password)?;
            println!("logged in as {}", session.username());
            Ok(())
        }
        AuthAction::Logout => {
            credentials::delete("username")?;
            credentials::delete("password")?;
            println!("credentials removed");
            Ok(())
        }
        AuthAction::Status => match common::open_session().await {
            Ok(session) => {
                println!("session ok (user: {})", session.username());
                Ok(())
            }
            Err(e) => {
                println!("no valid session: {e}");
                Ok(())
            }
        },
    }
}
