//! JSON REST endpoints under `/api/`.
//!
//! The portal's newer features answer JSON instead of markup. Responses are
//! plain payloads on success and an `{"error": "..."}` envelope on failure;
//! the envelope handling lives in [`crate::session::PortalSession::get_json`].

pub mod calendar;
pub mod mail;
pub mod notifications;

pub use calendar::CalendarEntry;
pub use mail::{MailFolder, MailHeader};
pub use notifications::{Badges, Notification};
