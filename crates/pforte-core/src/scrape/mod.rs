//! Structural queries against the portal's server-rendered pages.
//!
//! Each submodule pairs an async fetch (over [`crate::session::PortalSession`])
//! with a synchronous `parse_*` function that takes the raw HTML, so the
//! parsers are testable against fixtures without a server.

pub(crate) mod html;

pub mod groups;
pub mod profile;
pub mod storage;
pub mod users;

pub use groups::Group;
pub use profile::{ContactInfo, ContactUpdate, Profile};
pub use storage::StorageUsage;
pub use users::UserHit;
