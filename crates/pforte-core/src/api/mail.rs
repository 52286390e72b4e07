//! Mailbox listing endpoints.
//!
//! Only the listing side lives here; sending goes out over SMTP via
//! [`crate::mail`].

use serde::Deserialize;

use crate::error::Result;
use crate::session::PortalSession;

/// A mail folder (inbox, sent, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailFolder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unread: u32,
}

/// Header data of one message; bodies stay on the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailHeader {
    pub id: String,
    pub from: String,
    pub subject: String,
    /// Portal-formatted timestamp (`DD.MM.YYYY HH:MM`), passed through raw.
    pub date: String,
    #[serde(default)]
    pub read: bool,
}

#[derive(Debug, Deserialize)]
struct FolderResponse {
    #[serde(default)]
    folders: Vec<MailFolder>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    messages: Vec<MailHeader>,
}

/// List the account's mail folders.
pub async fn folders(session: &PortalSession) -> Result<Vec<MailFolder>> {
    let response: FolderResponse = session.get_json("/api/mail/folders").await?;
    Ok(response.folders)
}

/// List message headers in a folder, newest first.
pub async fn messages(
    session: &PortalSession,
    folder: &str,
    limit: u32,
) -> Result<Vec<MailHeader>> {
    let path = format!(
        "/api/mail/messages?folder={}&limit={limit}",
        urlencoding::encode(folder)
    );
    let response: MessageResponse = session.get_json(&path).await?;
    Ok(response.messages)
}
