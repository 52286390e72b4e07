//! Authenticated portal session.
//!
//! The portal authenticates through its HTML login form and tracks the
//! session with a cookie. [`PortalSession::login`] fetches the form, lifts
//! the hidden CSRF token out of the markup, posts the credentials and
//! verifies the result; the cookie store on the underlying client carries
//! the session across every later call. All other modules go through the
//! `get_html` / `get_json` / `post_form` helpers here.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{PortalError, Result};
use crate::scrape::html::parse_selector;

/// Marker the dashboard (and every page rendered for a logged-in user)
/// carries.
const LOGOUT_MARKER: &str = "a#logout";
/// The login form, present on `/login` and on any page the portal renders
/// when the session has expired.
const LOGIN_FORM: &str = "form#login-form";
const LOGIN_ERROR: &str = ".login-error";
const FORM_TOKEN: &str = "input[name=\"formtoken\"]";

/// An authenticated session against one portal instance.
#[derive(Debug)]
pub struct PortalSession {
    client: Client,
    base: Url,
    username: String,
}

impl PortalSession {
    /// Log in with the given credentials and return a live session.
    pub async fn login(config: &Config, username: &str, password: &str) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let session = Self {
            client,
            base,
            username: username.to_string(),
        };

        let form_page = session.fetch_text(session.url("/login")?).await?;
        let token = extract_form_token(&form_page)?;

        tracing::debug!(username, "submitting login form");
        let fields = [
            ("login", username),
            ("password", password),
            ("formtoken", token.as_str()),
        ];
        let resp = session
            .client
            .post(session.url("/login")?)
            .form(&fields)
            .send()
            .await?;
        let body = resp.error_for_status()?.text().await?;

        if let Some(message) = login_error(&body) {
            tracing::warn!(username, "portal rejected credentials");
            return Err(PortalError::LoginFailed(message));
        }
        if !has_logout_marker(&body) {
            return Err(PortalError::UnexpectedMarkup {
                what: "login response carries neither an error nor the session marker".to_string(),
            });
        }

        tracing::info!(username, "logged in");
        Ok(session)
    }

    /// The login name this session was opened with.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Probe whether the session cookie is still accepted.
    pub async fn is_valid(&self) -> Result<bool> {
        let body = self.fetch_text(self.url("/dashboard")?).await?;
        Ok(has_logout_marker(&body))
    }

    /// End the session server-side.
    pub async fn logout(self) -> Result<()> {
        self.fetch_text(self.url("/logout")?).await?;
        tracing::info!(username = %self.username, "logged out");
        Ok(())
    }

    /// GET a server-rendered page, failing with [`PortalError::NotAuthenticated`]
    /// when the portal answers with the login form instead.
    pub(crate) async fn get_html(&self, path_and_query: &str) -> Result<String> {
        let url = self.url(path_and_query)?;
        tracing::debug!(%url, "GET html");
        let body = self.fetch_text(url).await?;
        if is_login_page(&body) {
            return Err(PortalError::NotAuthenticated);
        }
        Ok(body)
    }

    /// GET a JSON endpoint and decode the payload. Non-success statuses and
    /// `{"error": ...}` envelopes become [`PortalError::Api`].
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = self.url(path_and_query)?;
        tracing::debug!(%url, "GET json");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PortalError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        let value: serde_json::Value = resp.json().await?;
        if let Some(err) = value.get("error") {
            return Err(PortalError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// POST a form body and return the response page. The caller owns the
    /// interpretation of the markup that comes back.
    pub(crate) async fn post_form(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<String> {
        let url = self.url(path)?;
        tracing::debug!(%url, field_count = fields.len(), "POST form");
        let resp = self.client.post(url).form(fields).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PortalError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        let body = resp.text().await?;
        if is_login_page(&body) {
            return Err(PortalError::NotAuthenticated);
        }
        Ok(body)
    }

    /// Fetch the hidden CSRF token from a form page. Mutating endpoints
    /// require a fresh one per submission.
    pub(crate) async fn form_token(&self, path: &str) -> Result<String> {
        let page = self.get_html(path).await?;
        extract_form_token(&page)
    }

    fn url(&self, path_and_query: &str) -> Result<Url> {
        Ok(self.base.join(path_and_query)?)
    }

    async fn fetch_text(&self, url: Url) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        Ok(resp.error_for_status()?.text().await?)
    }
}

fn extract_form_token(html: &str) -> Result<String> {
    let doc = Html::parse_document(html);
    let selector = parse_selector(FORM_TOKEN)?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(|v| v.to_string())
        .ok_or_else(|| PortalError::UnexpectedMarkup {
            what: "form token input not found".to_string(),
        })
}

fn login_error(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(LOGIN_ERROR).ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn has_logout_marker(html: &str) -> bool {
    let doc = Html::parse_document(html);
    Selector::parse(LOGOUT_MARKER)
        .map(|s| doc.select(&s).next().is_some())
        .unwrap_or(false)
}

fn is_login_page(html: &str) -> bool {
    let doc = Html::parse_document(html);
    Selector::parse(LOGIN_FORM)
        .map(|s| doc.select(&s).next().is_some())
        .unwrap_or(false)
}
