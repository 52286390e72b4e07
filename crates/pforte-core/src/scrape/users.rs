//! User search against the portal's server-rendered result table.

use scraper::Html;

use super::html::{child_text, parse_selector};
use crate::error::Result;
use crate::session::PortalSession;

/// One row of the user search result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHit {
    pub id: String,
    pub name: String,
    pub login: String,
    pub groups: Vec<String>,
}

/// Search users by free-text query.
pub async fn search(session: &PortalSession, query: &str) -> Result<Vec<UserHit>> {
    let path = format!("/users/search?q={}", urlencoding::encode(query));
    let html = session.get_html(&path).await?;
    parse_results(&html)
}

pub(crate) fn parse_results(html: &str) -> Result<Vec<UserHit>> {
    let doc = Html::parse_document(html);
    let row_sel = parse_selector("#search-results tbody tr")?;
    let name_sel = parse_selector("td.name")?;
    let login_sel = parse_selector("td.login")?;
    let groups_sel = parse_selector("td.groups")?;

    let mut hits = Vec::new();
    for row in doc.select(&row_sel) {
        // Rows without a user id are filler ("no results" row).
        let id = match row.value().attr("data-user-id") {
            Some(id) => id.to_string(),
            None => continue,
        };
        let groups = child_text(row, &groups_sel)
            .map(|cell| {
                cell.split(',')
                    .map(|g| g.trim().to_string())
                    .filter(|g| !g.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        hits.push(UserHit {
            id,
            name: child_text(row, &name_sel).unwrap_or_default(),
            login: child_text(row, &login_sel).unwrap_or_default(),
            groups,
        });
    }
    Ok(hits)
}
