//! Calendar event creation and deletion.
//!
//! Listing goes through the JSON API ([`crate::api::calendar`]); mutations
//! go through the portal's HTML form endpoints. [`EventDraft`] assembles
//! the full form body -- base event fields plus the recurrence and alarm
//! fragments from [`recurrence`] -- and the whole thing is submitted as one
//! form-encoded POST.

pub mod recurrence;

use chrono::NaiveDateTime;
use scraper::Html;

use crate::error::{PortalError, Result, ValidationError};
use crate::scrape::html::{element_text, parse_selector};
use crate::session::PortalSession;
use recurrence::RecurrenceSpec;

/// A new event, ready to be rendered into the portal's creation form.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub subject: String,
    /// Target calendar id (own calendar, group calendar, ...).
    pub calendar: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub whole_day: bool,
    /// Recurrence; `None` creates a one-off event with no recurrence keys
    /// in the form body at all.
    pub recurrence: Option<RecurrenceSpec>,
    /// Alarm offset tokens (`"15M"`, `"1H"`, ...); order defines the alarm
    /// index on the wire.
    pub alarms: Vec<String>,
}

impl EventDraft {
    /// Render the complete form body, validating the recurrence and alarm
    /// inputs first. No fields are produced when validation fails.
    pub fn to_form_fields(&self) -> Result<Vec<(String, String)>, ValidationError> {
        let recurrence_fields = match &self.recurrence {
            Some(spec) => spec.encode()?,
            None => Vec::new(),
        };
        let alarm_fields = recurrence::encode_alarms(&self.alarms, self.start.date())?;

        let mut fields = vec![
            ("subject".to_string(), self.subject.clone()),
            ("calendar".to_string(), self.calendar.clone()),
            (
                "location".to_string(),
                self.location.clone().unwrap_or_default(),
            ),
            (
                "description".to_string(),
                self.description.clone().unwrap_or_default(),
            ),
            (
                "startDate".to_string(),
                self.start.format("%d.%m.%Y").to_string(),
            ),
            (
                "startTime".to_string(),
                self.start.format("%H:%M").to_string(),
            ),
            (
                "endDate".to_string(),
                self.end.format("%d.%m.%Y").to_string(),
            ),
            ("endTime".to_string(), self.end.format("%H:%M").to_string()),
            (
                "wholeDay".to_string(),
                if self.whole_day { "1" } else { "0" }.to_string(),
            ),
        ];
        fields.extend(recurrence_fields);
        fields.extend(alarm_fields);
        Ok(fields)
    }
}

/// Create an event. Validation errors surface before any request is made.
pub async fn create_event(session: &PortalSession, draft: &EventDraft) -> Result<()> {
    let mut fields = draft.to_form_fields()?;
    let token = session.form_token("/calendar/add").await?;
    fields.insert(0, ("formtoken".to_string(), token));

    let response = session.post_form("/calendar/add", &fields).await?;
    check_form_response(&response)?;
    tracing::info!(subject = %draft.subject, "calendar event created");
    Ok(())
}

/// Delete an event by id.
pub async fn delete_event(session: &PortalSession, event_id: &str) -> Result<()> {
    let token = session.form_token("/calendar").await?;
    let fields = vec![
        ("formtoken".to_string(), token),
        ("id".to_string(), event_id.to_string()),
    ];
    let response = session.post_form("/calendar/delete", &fields).await?;
    check_form_response(&response)?;
    tracing::info!(event_id, "calendar event deleted");
    Ok(())
}

/// The form endpoints answer 200 with the page re-rendered; a `.form-error`
/// container means the portal rejected the submission.
fn check_form_response(html: &str) -> Result<()> {
    let doc = Html::parse_document(html);
    let error_sel = parse_selector(".form-error")?;
    if let Some(el) = doc.select(&error_sel).next() {
        return Err(PortalError::Api {
            status: 200,
            message: element_text(el),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::recurrence::{EndType, IntervalType, Weekday};
    use super::*;
    use chrono::NaiveDate;

    fn draft() -> EventDraft {
        EventDraft {
            subject: "Elternabend".to_string(),
            calendar: "c-8b".to_string(),
            location: Some("Aula".to_string()),
            description: None,
            start: NaiveDate::from_ymd_opt(2024, 12, 20)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 12, 20)
                .unwrap()
                .and_hms_opt(21, 0, 0)
                .unwrap(),
            whole_day: false,
            recurrence: None,
            alarms: Vec::new(),
        }
    }

    fn get<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn base_fields_use_portal_date_format() {
        let fields = draft().to_form_fields().unwrap();
        assert_eq!(get(&fields, "subject"), Some("Elternabend"));
        assert_eq!(get(&fields, "startDate"), Some("20.12.2024"));
        assert_eq!(get(&fields, "startTime"), Some("19:00"));
        assert_eq!(get(&fields, "endTime"), Some("21:00"));
        assert_eq!(get(&fields, "wholeDay"), Some("0"));
        assert_eq!(get(&fields, "description"), Some(""));
    }

    #[test]
    fn one_off_draft_emits_no_recurrence_or_alarm_keys() {
        let fields = draft().to_form_fields().unwrap();
        assert!(get(&fields, "intervalType").is_none());
        assert!(get(&fields, "endType").is_none());
        assert!(get(&fields, "triggerType0").is_none());
    }

    #[test]
    fn recurrence_and_alarm_fragments_are_appended() {
        let mut draft = draft();
        draft.recurrence = Some(RecurrenceSpec {
            interval_type: IntervalType::Weekly,
            interval: Some(1),
            weekly_days: vec![Weekday::Fri],
            end_type: EndType::Count,
            end_count: Some(10),
            ..Default::default()
        });
        draft.alarms = vec!["30M".to_string()];

        let fields = draft.to_form_fields().unwrap();
        assert_eq!(get(&fields, "intervalType"), Some("WEEKLY"));
        assert_eq!(get(&fields, "recurrenceDays"), Some("FRI"));
        assert_eq!(get(&fields, "endInterval"), Some("10"));
        assert_eq!(get(&fields, "triggerType0"), Some("30M"));
        assert_eq!(get(&fields, "triggerDate0"), Some("20.12.2024 09:00"));
    }

    #[test]
    fn invalid_recurrence_blocks_the_whole_form() {
        let mut draft = draft();
        draft.recurrence = Some(RecurrenceSpec {
            interval_type: IntervalType::Weekly,
            interval: Some(1),
            ..Default::default()
        });
        assert!(draft.to_form_fields().is_err());
    }

    #[test]
    fn invalid_alarm_blocks_the_whole_form() {
        let mut draft = draft();
        draft.alarms = vec!["99X".to_string()];
        assert!(draft.to_form_fields().is_err());
    }

    #[test]
    fn form_error_container_is_detected() {
        let err =
            check_form_response(r#"<div class="form-error">Kalender unbekannt</div>"#).unwrap_err();
        match err {
            PortalError::Api { message, .. } => assert_eq!(message, "Kalender unbekannt"),
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(check_form_response("<div id=\"calendar\"></div>").is_ok());
    }
}
