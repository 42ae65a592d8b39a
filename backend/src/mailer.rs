use std::sync::Arc;

use anyhow::Result;
use mockall::automock;
use tracing::{info, warn};

#[automock]
pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Development mailer: writes the message to the log instead of talking SMTP.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        info!(to, subject, body, "Mail dispatched");
        Ok(())
    }
}

/// Fire-and-forget delivery: failures are logged and swallowed, never
/// surfaced to the caller.
pub fn send_best_effort(mailer: Arc<dyn Mailer>, to: String, subject: String, body: String) {
    tokio::spawn(async move {
        if let Err(err) = mailer.send(&to, &subject, &body) {
            warn!(error = ?err, to, "Failed to send email");
        }
    });
}
