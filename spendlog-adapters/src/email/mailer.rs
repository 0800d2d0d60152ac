use askama::Template;
use chrono::Utc;
use spendlog_core::{AccountMailer, Email, EmailClient, IssuedToken};

const VERIFICATION_SUBJECT: &str = "Verify Your Email - Spendlog";
const PASSWORD_RESET_SUBJECT: &str = "Reset Your Password - Spendlog";

#[derive(Template)]
#[template(path = "verification_email.html")]
struct VerificationEmailTemplate<'a> {
    first_name: &'a str,
    code: String,
    link: String,
    expiry_minutes: i64,
}

#[derive(Template)]
#[template(path = "password_reset_email.html")]
struct PasswordResetEmailTemplate<'a> {
    first_name: &'a str,
    link: String,
    expiry_minutes: i64,
}

/// Renders the account lifecycle mails and hands them to the transport.
///
/// The verification mail carries both the short code and the full-token
/// link; both redeem the same stored token.
#[derive(Clone)]
pub struct TemplateMailer<E>
where
    E: EmailClient,
{
    email_client: E,
    frontend_url: String,
}

impl<E> TemplateMailer<E>
where
    E: EmailClient,
{
    pub fn new(email_client: E, frontend_url: String) -> Self {
        Self {
            email_client,
            frontend_url: frontend_url.trim_end_matches('/').to_owned(),
        }
    }

    fn expiry_minutes(token: &IssuedToken) -> i64 {
        (token.expires_at() - Utc::now()).num_minutes().max(1)
    }
}

#[async_trait::async_trait]
impl<E> AccountMailer for TemplateMailer<E>
where
    E: EmailClient,
{
    #[tracing::instrument(name = "Sending verification email", skip_all)]
    async fn send_verification_email(
        &self,
        recipient: &Email,
        first_name: &str,
        token: &IssuedToken,
    ) -> Result<(), String> {
        let template = VerificationEmailTemplate {
            first_name,
            code: token.display_code(),
            link: format!("{}/verify-email?token={}", self.frontend_url, token.token()),
            expiry_minutes: Self::expiry_minutes(token),
        };
        let body = template.render().map_err(|e| e.to_string())?;

        self.email_client
            .send_email(recipient, VERIFICATION_SUBJECT, &body)
            .await
    }

    #[tracing::instrument(name = "Sending password reset email", skip_all)]
    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        first_name: &str,
        token: &IssuedToken,
    ) -> Result<(), String> {
        let template = PasswordResetEmailTemplate {
            first_name,
            link: format!(
                "{}/reset-password?token={}",
                self.frontend_url,
                token.token()
            ),
            expiry_minutes: Self::expiry_minutes(token),
        };
        let body = template.render().map_err(|e| e.to_string())?;

        self.email_client
            .send_email(recipient, PASSWORD_RESET_SUBJECT, &body)
            .await
    }
}
