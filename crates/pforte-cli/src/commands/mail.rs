use clap::Subcommand;
use pforte_core::api::mail as mail_api;
use pforte_core::mail::{Mailer, OutgoingMail};
use pforte_core::Config;

use super::common;

#[derive(Subcommand)]
pub enum MailAction {
    /// List mail folders
    Folders,
    /// List message headers in a folder
    List {
        #[arg(long, default_value = "inbox")]
        folder: String,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Send a mail via the school's SMTP relay
    Send {
        /// Recipient; repeatable
        #[arg(long, required = true)]
        to: Vec<String>,
        /// CC recipient; repeatable
        #[arg(long)]
        cc: Vec<String>,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
    },
}

pub async fn run(action: MailAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MailAction::Folders => {
            let session = common::open_session().await?;
            for folder in mail_api::folders(&session).await? {
                println!("{}  {} ({} unread)", folder.id, folder.name, folder.unread);
            }
        }
        MailAction::List { folder, limit } => {
            let session = common::open_session().await?;
            for message in mail_api::messages(&session, &folder, limit).await? {
                let marker = if message.read { " " } else { "*" };
                println!(
                    "{marker} {} {} -- {}",
                    message.date, message.from, message.subject
                );
            }
        }
        MailAction::Send {
            to,
            cc,
            subject,
            body,
        } => {
            // SMTP shares the portal credentials but not the portal session.
            let config = Config::load()?;
            let (username, password) = common::stored_credentials()?;
            let mailer = Mailer::new(&config.smtp, &username, &password)?;
            let count = to.len();
            mailer
                .send(&OutgoingMail {
                    to,
                    cc,
                    subject,
                    body,
                })
                .await?;
            println!("sent to {count} recipient(s)");
        }
    }
    Ok(())
}
