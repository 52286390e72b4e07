use clap::Subcommand;
use pforte_core::api::notifications;

use super::common;

#[derive(Subcommand)]
pub enum NotificationsAction {
    /// Show unread counters
    Badges,
    /// Show the notification feed
    List {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

pub async fn run(action: NotificationsAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = common::open_session().await?;
    match action {
        NotificationsAction::Badges => {
            let badges = notifications::badges(&session).await?;
            println!(
                "mail: {}  calendar: {}  board: {}  (total: {})",
                badges.mail,
                badges.calendar,
                badges.board,
                badges.total()
            );
        }
        NotificationsAction::List { limit } => {
            for item in notifications::list(&session, limit).await? {
                let marker = if item.unread { "*" } else { " " };
                println!("{marker} {} [{}] {}", item.date, item.kind, item.title);
            }
        }
    }
    Ok(())
}
