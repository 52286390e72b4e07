use pforte_core::{credentials, Config, PortalSession};

/// Load config + stored credentials and open a fresh portal session.
pub async fn open_session() -> Result<PortalSession, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (username, password) = stored_credentials()?;
    Ok(PortalSession::login(&config, &username, &password).await?)
}

/// Credentials from the keyring, or a hint to log in first.
pub fn stored_credentials() -> Result<(String, String), Box<dyn std::error::Error>> {
    let username =
        credentials::get("username")?.ok_or("not logged in -- run `pforte auth login` first")?;
    let password = credentials::get("password")?
        .ok_or("stored credentials incomplete -- run `pforte auth login` again")?;
    Ok((username, password))
}
