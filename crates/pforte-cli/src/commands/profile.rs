use clap::Subcommand;
use pforte_core::scrape::profile::{self, ContactUpdate};

use super::common;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the own profile
    Show,
    /// Update contact data; omitted fields keep their current value
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
}

pub async fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = common::open_session().await?;
    match action {
        ProfileAction::Show => {
            let profile = profile::fetch(&session).await?;
            println!("{} ({})", profile.display_name, profile.login);
            if let Some(email) = &profile.contact.email {
                println!("  email:   {email}");
            }
            if let Some(phone) = &profile.contact.phone {
                println!("  phone:   {phone}");
            }
            if let Some(address) = &profile.contact.address {
                println!("  address: {address}");
            }
            for role in &profile.roles {
                println!("  role:    {role}");
            }
        }
        ProfileAction::Update {
            email,
            phone,
            address,
        } => {
            let update = ContactUpdate {
                email,
                phone,
                address,
            };
            profile::update_contact(&session, &update).await?;
            println!("profile updated");
        }
    }
    Ok(())
}
