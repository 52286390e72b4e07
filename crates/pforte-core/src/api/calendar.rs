//! Calendar listing endpoint.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Result;
use crate::session::PortalSession;

/// One calendar entry as the portal lists it. Occurrences of recurring
/// events arrive pre-expanded; the portal never hands rules back out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarEntry {
    pub id: String,
    pub subject: String,
    /// Owning calendar id.
    pub calendar: String,
    /// Portal-formatted start (`DD.MM.YYYY HH:MM`), passed through raw.
    pub start: String,
    /// Portal-formatted end, passed through raw.
    pub end: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "wholeDay")]
    pub whole_day: bool,
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    #[serde(default)]
    events: Vec<CalendarEntry>,
}

/// List entries between two dates (inclusive).
pub async fn list(
    session: &PortalSession,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<CalendarEntry>> {
    let path = format!(
        "/api/calendar/events?from={}&to={}",
        from.format("%d.%m.%Y"),
        to.format("%d.%m.%Y")
    );
    let response: EventResponse = session.get_json(&path).await?;
    Ok(response.events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_decode() {
        let raw = r#"{"events": [
            {"id": "e-4", "subject": "Konferenz", "calendar": "c-lehrer",
             "start": "20.12.2024 14:00", "end": "20.12.2024 16:00",
             "location": "Raum 112", "wholeDay": false}
        ]}"#;
        let response: EventResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.events[0].subject, "Konferenz");
        assert_eq!(response.events[0].location.as_deref(), Some("Raum 112"));
        assert!(!response.events[0].whole_day);
    }
}
