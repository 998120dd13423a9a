use crate::config::MailConfig;
use crate::error::{CarbonError, Result};
use crate::logic::report;
use crate::models::{EmissionBreakdown, HouseholdProfile, Suggestion};
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

const SENDER_NAME: &str = "Sustainability Assistant";

/// Everything needed to compose one footprint report.
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    pub to: &'a str,
    pub name: &'a str,
    pub emissions: EmissionBreakdown,
    pub profile: Option<&'a HouseholdProfile>,
    pub suggestions: &'a [Suggestion],
}

impl ReportRequest<'_> {
    fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "User"
        } else {
            name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailOutcome {
    pub success: bool,
    pub message: String,
}

impl MailOutcome {
    fn sent() -> Self {
        Self {
            success: true,
            message: "Email sent successfully!".into(),
        }
    }

    fn failed(error: &CarbonError) -> Self {
        Self {
            success: false,
            message: format!("Error sending email: {}", error),
        }
    }
}

/// Submits composed reports over authenticated SMTP (STARTTLS).
pub struct ReportMailer {
    config: Option<MailConfig>,
}

impl ReportMailer {
    pub fn new(config: Option<MailConfig>) -> Self {
        Self { config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.as_ref().is_some_and(MailConfig::is_configured)
    }

    fn config(&self) -> Result<&MailConfig> {
        self.config
            .as_ref()
            .filter(|c| c.is_configured())
            .ok_or_else(|| CarbonError::NotConfigured("SMTP mail settings".into()))
    }

    /// Build the MIME message without touching the network.
    pub fn build_message(&self, request: &ReportRequest<'_>) -> Result<Message> {
        let config = self.config()?;

        let to: Mailbox = request.to.trim().parse()?;
        let from = Mailbox::new(Some(SENDER_NAME.to_string()), config.sender().parse()?);

        let report = report::compose(
            request.display_name(),
            &request.emissions,
            request.profile,
            request.suggestions,
        );

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(report.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(report.body)?;

        Ok(message)
    }

    /// Compose and submit one report. Never fails; the outcome carries the
    /// message to show the user.
    pub async fn send(&self, request: &ReportRequest<'_>) -> MailOutcome {
        match self.try_send(request).await {
            Ok(()) => {
                tracing::info!("Report email sent");
                MailOutcome::sent()
            }
            Err(e) => {
                tracing::error!("Error sending email: {}", e);
                MailOutcome::failed(&e)
            }
        }
    }

    async fn try_send(&self, request: &ReportRequest<'_>) -> Result<()> {
        let message = self.build_message(request)?;
        let config = self.config()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::estimator::estimate;

    fn mail_config() -> MailConfig {
        MailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            username: "reports@example.com".into(),
            password: "app-password".into(),
            from_address: None,
            timeout_secs: 5,
        }
    }

    fn request<'a>(to: &'a str, profile: &'a HouseholdProfile) -> ReportRequest<'a> {
        ReportRequest {
            to,
            name: "  ",
            emissions: estimate(profile),
            profile: Some(profile),
            suggestions: &[],
        }
    }

    #[test]
    fn build_message_sets_envelope() {
        let profile = HouseholdProfile::default();
        let mailer = ReportMailer::new(Some(mail_config()));
        let message = mailer
            .build_message(&request("asha@example.com", &profile))
            .unwrap();

        let envelope = message.envelope();
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "asha@example.com");
        assert_eq!(
            envelope.from().map(|a| a.to_string()).as_deref(),
            Some("reports@example.com")
        );
    }

    #[test]
    fn blank_name_defaults_to_user() {
        let profile = HouseholdProfile::default();
        assert_eq!(request("a@b.com", &profile).display_name(), "User");
    }

    #[test]
    fn build_message_rejects_bad_address() {
        let profile = HouseholdProfile::default();
        let mailer = ReportMailer::new(Some(mail_config()));
        let result = mailer.build_message(&request("not-an-address", &profile));
        assert!(matches!(result, Err(CarbonError::Address(_))));
    }

    #[tokio::test]
    async fn send_without_config_fails_without_network() {
        let profile = HouseholdProfile::default();
        let mailer = ReportMailer::new(None);
        assert!(!mailer.is_configured());

        let outcome = mailer.send(&request("asha@example.com", &profile)).await;
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Error sending email:"));
        assert!(outcome.message.contains("SMTP mail settings"));
    }

    #[tokio::test]
    async fn send_with_bad_address_reports_failure() {
        let profile = HouseholdProfile::default();
        let mailer = ReportMailer::new(Some(mail_config()));

        let outcome = mailer.send(&request("nobody", &profile)).await;
        assert!(!outcome.success);
        assert!(outcome.message.contains("Invalid email address"));
    }
}
