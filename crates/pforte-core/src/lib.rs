//! # pforte Core Library
//!
//! Credential-based client for a school-management web portal. The portal
//! is a server-rendered application with a small JSON API bolted on; this
//! library logs in through the HTML login form, keeps the session cookie,
//! and then mixes three access styles:
//!
//! - **Scraping**: profile, user search, storage quota and group pages are
//!   server-rendered HTML, read with structural CSS queries
//! - **REST**: notifications, mail listing and calendar listing are JSON
//!   endpoints under `/api/`
//! - **Form submission**: profile updates and calendar event creation /
//!   deletion are HTML form POSTs, including the recurrence and alarm
//!   sub-fields built by [`calendar::recurrence`]
//!
//! Outbound mail does not go through the portal at all -- it is handed to
//! the school's SMTP server via `lettre`.
//!
//! ## Key components
//!
//! - [`PortalSession`]: cookie-carrying authenticated HTTP session
//! - [`calendar::recurrence`]: recurrence-rule validation and form encoding
//! - [`Config`]: TOML configuration (portal base URL, SMTP relay)

pub mod api;
pub mod calendar;
pub mod config;
pub mod credentials;
pub mod error;
pub mod mail;
pub mod scrape;
pub mod session;

pub use calendar::recurrence::{
    AlarmOffset, EndRule, EndType, IntervalType, MonthlyKind, MonthlyRule, Recurrence,
    RecurrenceSpec, Weekday,
};
pub use calendar::EventDraft;
pub use config::{Config, SmtpConfig};
pub use error::{ConfigError, MailError, PortalError, Result, ValidationError};
pub use session::PortalSession;
