use crate::google::GoogleClient;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

// アルバム画像の保存先となる Cloud Storage クライアント。
// オブジェクト名はハンドラー側で UUID ベースの衝突しない値にするため、
// パスエンコードを気にせず URL に埋め込める
pub struct StorageClient {
    google: Arc<GoogleClient>,
    bucket: String,
}

impl StorageClient {
    pub fn new(google: Arc<GoogleClient>, bucket: String) -> Self {
        Self { google, bucket }
    }

    pub async fn upload(
        &self,
        object_path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<()> {
        let access_token = self.google.service_access_token().await?;
        let url = format!(
            "https://storage.googleapis.com/upload/storage/v1/b/{}/o",
            self.bucket
        );
        let res = self
            .google
            .http()
            .post(url)
            .query(&[("uploadType", "media"), ("name", object_path)])
            .bearer_auth(access_token)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Storage error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Storage upload returned {}",
                res.status()
            )));
        }
        Ok(())
    }

    pub async fn delete(&self, object_path: &str) -> AppResult<()> {
        let access_token = self.google.service_access_token().await?;
        let url = format!(
            "https://storage.googleapis.com/storage/v1/b/{}/o/{}",
            self.bucket, object_path
        );
        let res = self
            .google
            .http()
            .delete(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Storage error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Storage delete returned {}",
                res.status()
            )));
        }
        Ok(())
    }

    pub fn public_url(&self, object_path: &str) -> String {
        format!(
            "https://storage.googleapis.com/{}/{}",
            self.bucket, object_path
        )
    }
}
