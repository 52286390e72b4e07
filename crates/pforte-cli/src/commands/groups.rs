use pforte_core::scrape::groups;

use super::common;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let session = common::open_session().await?;
    for group in groups::fetch(&session).await? {
        let role = group
            .role
            .as_deref()
            .map(|r| format!(" ({r})"))
            .unwrap_or_default();
        println!("{}  {}{role}", group.id, group.name);
    }
    Ok(())
}
