use clap::Subcommand;
use pforte_core::scrape::users;

use super::common;

#[derive(Subcommand)]
pub enum UsersAction {
    /// Search users by name or login
    Search { query: String },
}

pub async fn run(action: UsersAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        UsersAction::Search { query } => {
            let session = common::open_session().await?;
            let hits = users::search(&session, &query).await?;
            if hits.is_empty() {
                println!("no matches for '{query}'");
                return Ok(());
            }
            for hit in hits {
                let groups = if hit.groups.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", hit.groups.join(", "))
                };
                println!("{}  {} ({}){groups}", hit.id, hit.name, hit.login);
            }
            Ok(())
        }
    }
}
