//! Notification badges and the notification feed.

use serde::Deserialize;

use crate::error::Result;
use crate::session::PortalSession;

/// Unread counters shown in the portal header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Badges {
    #[serde(default)]
    pub mail: u32,
    #[serde(default)]
    pub calendar: u32,
    #[serde(default)]
    pub board: u32,
}

impl Badges {
    pub fn total(&self) -> u32 {
        self.mail + self.calendar + self.board
    }
}

/// One entry of the notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Source area, e.g. `mail`, `calendar`, `board`.
    pub kind: String,
    pub title: String,
    /// Portal-formatted timestamp (`DD.MM.YYYY HH:MM`), passed through raw.
    pub date: String,
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    items: Vec<Notification>,
}

/// Fetch the unread counters.
pub async fn badges(session: &PortalSession) -> Result<Badges> {
    session.get_json("/api/notifications/badges").await
}

/// Fetch the most recent notifications.
pub async fn list(session: &PortalSession, limit: u32) -> Result<Vec<Notification>> {
    let response: FeedResponse = session
        .get_json(&format!("/api/notifications?limit={limit}"))
        .await?;
    Ok(response.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_default_missing_counters() {
        let badges: Badges = serde_json::from_str(r#"{"mail": 3}"#).unwrap();
        assert_eq!(badges.mail, 3);
        assert_eq!(badges.calendar, 0);
        assert_eq!(badges.total(), 3);
    }

    #[test]
    fn feed_items_decode() {
        let raw = r#"{
            "items": [
                {"id": "n-1", "kind": "mail", "title": "Neue Nachricht",
                 "date": "05.08.2026 14:30", "unread": true}
            ]
        }"#;
        let feed: FeedResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].kind, "mail");
        assert!(feed.items[0].unread);
    }
}
