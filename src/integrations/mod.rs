pub mod gemini;
pub mod mailer;

pub use gemini::GeminiClient;
pub use mailer::{MailOutcome, ReportMailer, ReportRequest};
