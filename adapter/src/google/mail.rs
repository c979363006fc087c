use crate::google::GoogleClient;
use base64::{engine::general_purpose, Engine as _};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

const GMAIL_SEND_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

// 招待メールの送信。プラットフォーム自身のメールボックスから
// Gmail API 経由で送る
pub struct MailClient {
    google: Arc<GoogleClient>,
}

impl MailClient {
    pub fn new(google: Arc<GoogleClient>) -> Self {
        Self { google }
    }

    pub async fn send_invitation(&self, invitation_code: &str, bcc: &[String]) -> AppResult<()> {
        if bcc.is_empty() {
            return Ok(());
        }
        let access_token = self.google.service_access_token().await?;

        let subject = "You are invited to a court reservation";
        let body_text = format!(
            "You have been invited to join a court reservation.\r\n\
             Use the invitation code below to join:\r\n\r\n{}\r\n",
            invitation_code
        );
        let message_str = format!(
            "Bcc: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            bcc.join(", "),
            subject,
            body_text
        );
        let encoded_message = general_purpose::URL_SAFE_NO_PAD.encode(message_str.as_bytes());

        let res = self
            .google
            .http()
            .post(GMAIL_SEND_ENDPOINT)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "raw": encoded_message }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gmail error: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Gmail send returned {}",
                res.status()
            )));
        }
        tracing::info!(recipients = bcc.len(), "invitation mail sent");
        Ok(())
    }
}
