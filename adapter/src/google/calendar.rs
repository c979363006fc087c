use crate::google::GoogleClient;
use kernel::model::range::DateTimeRange;
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

const EVENTS_ENDPOINT: &str = "https://www.googleapis.com/calendar/v3/calendars/primary/events";

// Google アカウント連携済みユーザーのカレンダーへの予定の作成・更新。
// トークンは予約者（または管理者）のリフレッシュトークンから都度取得する
pub struct CalendarClient {
    google: Arc<GoogleClient>,
    time_zone: String,
}

#[derive(Deserialize)]
struct EventResponse {
    id: String,
    #[serde(default)]
    attendees: Vec<Attendee>,
}

#[derive(Deserialize, serde::Serialize, Clone)]
struct Attendee {
    email: String,
}

impl CalendarClient {
    pub fn new(google: Arc<GoogleClient>, time_zone: String) -> Self {
        Self { google, time_zone }
    }

    pub async fn insert_event(
        &self,
        refresh_token: &str,
        summary: &str,
        location: &str,
        range: &DateTimeRange,
    ) -> AppResult<String> {
        let access_token = self.google.access_token_from_refresh(refresh_token).await?;
        let res = self
            .google
            .http()
            .post(EVENTS_ENDPOINT)
            .bearer_auth(access_token)
            .json(&serde_json::json!({
                "summary": summary,
                "location": location,
                "start": self.event_time(range.start_time),
                "end": self.event_time(range.end_time),
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Calendar error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Calendar insert returned {}",
                res.status()
            )));
        }
        let event: EventResponse = res
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Calendar decode error: {e}")))?;
        Ok(event.id)
    }

    pub async fn patch_event(
        &self,
        refresh_token: &str,
        event_id: &str,
        range: &DateTimeRange,
    ) -> AppResult<()> {
        let access_token = self.google.access_token_from_refresh(refresh_token).await?;
        let res = self
            .google
            .http()
            .patch(format!("{}/{}", EVENTS_ENDPOINT, event_id))
            .bearer_auth(access_token)
            .json(&serde_json::json!({
                "start": self.event_time(range.start_time),
                "end": self.event_time(range.end_time),
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Calendar error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Calendar patch returned {}",
                res.status()
            )));
        }
        Ok(())
    }

    // 参加者をイベントに追加する。既存の attendees を取得して追記する
    pub async fn add_attendee(
        &self,
        refresh_token: &str,
        event_id: &str,
        email: &str,
    ) -> AppResult<()> {
        let access_token = self.google.access_token_from_refresh(refresh_token).await?;
        let url = format!("{}/{}", EVENTS_ENDPOINT, event_id);

        let res = self
            .google
            .http()
            .get(&url)
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Calendar error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Calendar get returned {}",
                res.status()
            )));
        }
        let event: EventResponse = res
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Calendar decode error: {e}")))?;

        let mut attendees = event.attendees;
        if attendees.iter().any(|a| a.email == email) {
            return Ok(());
        }
        attendees.push(Attendee {
            email: email.to_string(),
        });

        let res = self
            .google
            .http()
            .patch(&url)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "attendees": attendees }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Calendar error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Calendar patch returned {}",
                res.status()
            )));
        }
        Ok(())
    }

    fn event_time(&self, time: chrono::NaiveDateTime) -> serde_json::Value {
        serde_json::json!({
            "dateTime": time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "timeZone": self.time_zone,
        })
    }
}
