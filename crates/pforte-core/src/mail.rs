//! Outbound mail over the school's SMTP relay.
//!
//! The portal itself has no send endpoint; mail leaves through SMTP with
//! the same credentials as the portal login. Message assembly and the SMTP
//! transaction are delegated to `lettre`.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::MailError;

/// One outbound message.
#[derive(Debug, Clone, Default)]
pub struct OutgoingMail {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// SMTP sender bound to one account.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Build a mailer from the relay config and the portal credentials.
    /// The sender address falls back to `<username>@<smtp host>` when the
    /// config does not pin one.
    pub fn new(config: &SmtpConfig, username: &str, password: &str) -> Result<Self, MailError> {
        let from_address = match &config.from_address {
            Some(addr) => addr.clone(),
            None => format!("{username}@{}", config.host),
        };
        let from: Mailbox = from_address.parse()?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        };
        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, from })
    }

    /// Send one message.
    pub async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = self.build_message(mail)?;
        self.transport.send(message).await?;
        tracing::info!(recipients = mail.to.len(), "mail sent");
        Ok(())
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(mail.subject.clone());
        for to in &mail.to {
            builder = builder.to(to.parse()?);
        }
        for cc in &mail.cc {
            builder = builder.cc(cc.parse()?);
        }
        Ok(builder.body(mail.body.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_mailer() -> Mailer {
        let config = SmtpConfig {
            host: "mail.schule.example".to_string(),
            port: 587,
            starttls: true,
            from_address: None,
        };
        Mailer::new(&config, "anna.m", "geheim").unwrap()
    }

    #[test]
    fn sender_falls_back_to_login_at_smtp_host() {
        let mailer = test_mailer();
        assert_eq!(mailer.from.email.to_string(), "anna.m@mail.schule.example");
    }

    #[test]
    fn builds_message_with_recipients_and_subject() {
        let mailer = test_mailer();
        let mail = OutgoingMail {
            to: vec!["eltern-8b@schule.example".to_string()],
            cc: vec!["sekretariat@schule.example".to_string()],
            subject: "Elternabend am 20.12.".to_string(),
            body: "Liebe Eltern, ...".to_string(),
        };
        let message = mailer.build_message(&mail).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("To: eltern-8b@schule.example"));
        assert!(rendered.contains("Cc: sekretariat@schule.example"));
        assert!(rendered.contains("Subject: Elternabend am 20.12."));
    }

    #[test]
    fn bad_recipient_address_is_rejected() {
        let mailer = test_mailer();
        let mail = OutgoingMail {
            to: vec!["not-an-address".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            mailer.build_message(&mail),
            Err(MailError::Address(_))
        ));
    }
}
