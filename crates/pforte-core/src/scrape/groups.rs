//! Group membership scraping.

use scraper::Html;

use super::html::{child_text, parse_selector};
use crate::error::Result;
use crate::session::PortalSession;

/// A group (class, course, working group) the account belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Role within the group as the portal labels it (member, moderator).
    pub role: Option<String>,
}

pub async fn fetch(session: &PortalSession) -> Result<Vec<Group>> {
    let html = session.get_html("/groups").await?;
    parse_groups(&html)
}

pub(crate) fn parse_groups(html: &str) -> Result<Vec<Group>> {
    let doc = Html::parse_document(html);
    let item_sel = parse_selector("#group-list li")?;
    let name_sel = parse_selector(".group-name")?;
    let role_sel = parse_selector(".group-role")?;

    let mut groups = Vec::new();
    for item in doc.select(&item_sel) {
        let id = match item.value().attr("data-group-id") {
            Some(id) => id.to_string(),
            None => continue,
        };
        groups.push(Group {
            id,
            name: child_text(item, &name_sel).unwrap_or_default(),
            role: child_text(item, &role_sel).filter(|r| !r.is_empty()),
        });
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_group_items() {
        let html = indoc! {r#"
            <ul id="group-list">
              <li data-group-id="g-8b">
                <span class="group-name">Klasse 8b</span>
                <span class="group-role">Mitglied</span>
              </li>
              <li data-group-id="g-rob">
                <span class="group-name">AG Robotik</span>
                <span class="group-role"></span>
              </li>
            </ul>
        "#};
        let groups = parse_groups(html).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Klasse 8b");
        assert_eq!(groups[0].role.as_deref(), Some("Mitglied"));
        assert_eq!(groups[1].role, None);
    }
}
