//! Disk-quota scraping.
//!
//! The storage page carries the numbers as data attributes on the quota
//! bar, which is sturdier than parsing the human-formatted sizes.

use scraper::Html;

use super::html::select_attr;
use crate::error::{PortalError, Result};
use crate::session::PortalSession;

/// Storage quota of the logged-in account, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl StorageUsage {
    pub fn free_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.used_bytes)
    }
}

pub async fn fetch(session: &PortalSession) -> Result<StorageUsage> {
    let html = session.get_html("/storage").await?;
    parse_quota(&html)
}

pub(crate) fn parse_quota(html: &str) -> Result<StorageUsage> {
    let doc = Html::parse_document(html);
    let used = attr_u64(&doc, "data-used")?;
    let total = attr_u64(&doc, "data-total")?;
    Ok(StorageUsage {
        used_bytes: used,
        total_bytes: total,
    })
}

fn attr_u64(doc: &Html, attr: &str) -> Result<u64> {
    let raw = select_attr(doc, "#quota", attr)?.ok_or_else(|| PortalError::UnexpectedMarkup {
        what: format!("quota bar missing {attr}"),
    })?;
    raw.parse().map_err(|_| PortalError::UnexpectedMarkup {
        what: format!("quota {attr} is not a number: '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quota_attributes() {
        let html = r#"<div id="quota" data-used="1073741824" data-total="5368709120"></div>"#;
        let usage = parse_quota(html).unwrap();
        assert_eq!(usage.used_bytes, 1_073_741_824);
        assert_eq!(usage.total_bytes, 5_368_709_120);
        assert_eq!(usage.free_bytes(), 4_294_967_296);
    }

    #[test]
    fn missing_attribute_is_markup_error() {
        let err = parse_quota(r#"<div id="quota" data-used="1"></div>"#).unwrap_err();
        assert!(matches!(err, PortalError::UnexpectedMarkup { .. }));
    }
}
