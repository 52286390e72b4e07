//! Profile pages: overview, contact data, role assignments.
//!
//! The portal renders the profile as three separate pages. They are
//! independent, so [`fetch`] requests all three concurrently and joins the
//! results into one [`Profile`].

use scraper::Html;

use super::html::{element_text, parse_selector, require_text, select_texts};
use crate::error::{PortalError, Result};
use crate::session::PortalSession;

/// A user's own profile as the portal shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub display_name: String,
    pub login: String,
    pub contact: ContactInfo,
    pub roles: Vec<String>,
}

/// Contact section of the profile. Every field is optional server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Contact fields to submit via the profile edit form. `None` leaves the
/// remote value untouched (the current value is re-submitted).
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Fetch the full profile. The three section pages are requested
/// concurrently.
pub async fn fetch(session: &PortalSession) -> Result<Profile> {
    let (overview, contact, roles) = tokio::try_join!(
        session.get_html("/profile"),
        session.get_html("/profile/contact"),
        session.get_html("/profile/roles"),
    )?;

    let (display_name, login) = parse_overview(&overview)?;
    Ok(Profile {
        display_name,
        login,
        contact: parse_contact(&contact)?,
        roles: parse_roles(&roles)?,
    })
}

/// Submit the contact edit form. The portal wants the full field set plus
/// a fresh form token, so the current values are fetched first and patched
/// with the update.
pub async fn update_contact(session: &PortalSession, update: &ContactUpdate) -> Result<()> {
    let contact_page = session.get_html("/profile/contact").await?;
    let current = parse_contact(&contact_page)?;
    let token = session.form_token("/profile/edit").await?;

    let pick = |new: &Option<String>, old: &Option<String>| {
        new.clone().or_else(|| old.clone()).unwrap_or_default()
    };
    let fields = vec![
        ("formtoken".to_string(), token),
        ("email".to_string(), pick(&update.email, &current.email)),
        ("phone".to_string(), pick(&update.phone, &current.phone)),
        (
            "address".to_string(),
            pick(&update.address, &current.address),
        ),
    ];

    let response = session.post_form("/profile/edit", &fields).await?;
    let doc = Html::parse_document(&response);
    let error_sel = parse_selector(".form-error")?;
    if let Some(el) = doc.select(&error_sel).next() {
        return Err(PortalError::Api {
            status: 200,
            message: element_text(el),
        });
    }
    tracing::info!("profile contact data updated");
    Ok(())
}

pub(crate) fn parse_overview(html: &str) -> Result<(String, String)> {
    let doc = Html::parse_document(html);
    let name = require_text(&doc, "#profile .profile-name", "profile name")?;
    let login = require_text(&doc, "#profile .profile-login", "profile login")?;
    Ok((name, login))
}

pub(crate) fn parse_contact(html: &str) -> Result<ContactInfo> {
    let doc = Html::parse_document(html);
    let row_sel = parse_selector("#contact-data tr")?;
    let th_sel = parse_selector("th")?;
    let td_sel = parse_selector("td")?;

    let mut contact = ContactInfo::default();
    for row in doc.select(&row_sel) {
        let label = match super::html::child_text(row, &th_sel) {
            Some(label) => label,
            None => continue,
        };
        let value = super::html::child_text(row, &td_sel).filter(|v| !v.is_empty());
        match label.as_str() {
            "E-Mail" => contact.email = value,
            "Telefon" => contact.phone = value,
            "Adresse" => contact.address = value,
            _ => {}
        }
    }
    Ok(contact)
}

pub(crate) fn parse_roles(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    select_texts(&doc, "#role-list li")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_overview() {
        let html = indoc! {r#"
            <div id="profile">
              <h1 class="profile-name">Anna Muster</h1>
              <span class="profile-login">anna.m</span>
            </div>
        "#};
        let (name, login) = parse_overview(html).unwrap();
        assert_eq!(name, "Anna Muster");
        assert_eq!(login, "anna.m");
    }

    #[test]
    fn overview_without_name_is_markup_error() {
        let err = parse_overview("<div id=\"profile\"></div>").unwrap_err();
        assert!(matches!(err, PortalError::UnexpectedMarkup { .. }));
    }

    #[test]
    fn parses_contact_table_by_label() {
        let html = indoc! {r#"
            <table id="contact-data">
              <tr><th>E-Mail</th><td>anna@schule.example</td></tr>
              <tr><th>Telefon</th><td></td></tr>
              <tr><th>Adresse</th><td>Musterweg 1, 12345 Musterstadt</td></tr>
              <tr><th>Fax</th><td>ignored</td></tr>
            </table>
        "#};
        let contact = parse_contact(html).unwrap();
        assert_eq!(contact.email.as_deref(), Some("anna@schule.example"));
        assert_eq!(contact.phone, None);
        assert_eq!(
            contact.address.as_deref(),
            Some("Musterweg 1, 12345 Musterstadt")
        );
    }

    #[test]
    fn parses_roles_list() {
        let html = indoc! {r#"
            <ul id="role-list">
              <li>Lehrkraft</li>
              <li>Klassenleitung 8b</li>
            </ul>
        "#};
        assert_eq!(
            parse_roles(html).unwrap(),
            vec!["Lehrkraft".to_string(), "Klassenleitung 8b".to_string()]
        );
    }
}
