pub mod mailer;
pub mod mock_email_client;
pub mod postmark_email_client;

pub use mailer::TemplateMailer;
pub use mock_email_client::MockEmailClient;
pub use postmark_email_client::PostmarkEmailClient;
