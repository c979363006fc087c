use serde::Deserialize;
use shared::{
    config::GoogleConfig,
    error::{AppError, AppResult},
};

pub mod calendar;
pub mod mail;
pub mod storage;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const SCOPES: &str = "openid email profile https://www.googleapis.com/auth/calendar.events";

// Google API へのアクセスをまとめたクライアント。
// ユーザーの OAuth 認可コード交換と、リフレッシュトークンからの
// アクセストークン取得のみを担当し、各 API の呼び出しは
// mail / calendar / storage の各クライアントが行う
pub struct GoogleClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    service_refresh_token: String,
}

pub struct GoogleTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[derive(Deserialize)]
pub struct GoogleProfile {
    pub email: String,
    pub name: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

impl GoogleClient {
    pub fn new(config: &GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            service_refresh_token: config.service_refresh_token.clone(),
        }
    }

    // ユーザーをリダイレクトさせる認可 URL
    pub fn auth_url(&self) -> String {
        format!(
            "{}?response_type=code&access_type=offline&prompt=consent&client_id={}&redirect_uri={}&scope={}",
            AUTH_ENDPOINT, self.client_id, self.redirect_uri, SCOPES.replace(' ', "%20"),
        )
    }

    pub async fn exchange_code(&self, code: &str) -> AppResult<GoogleTokens> {
        let res: TokenResponse = self
            .post_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
                ("redirect_uri", &self.redirect_uri),
            ])
            .await?;
        Ok(GoogleTokens {
            access_token: res.access_token,
            refresh_token: res.refresh_token,
        })
    }

    pub async fn fetch_profile(&self, access_token: &str) -> AppResult<GoogleProfile> {
        let res = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("userinfo error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "userinfo returned {}",
                res.status()
            )));
        }
        res.json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("userinfo decode error: {e}")))
    }

    pub async fn access_token_from_refresh(&self, refresh_token: &str) -> AppResult<String> {
        let res: TokenResponse = self
            .post_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
            ])
            .await?;
        Ok(res.access_token)
    }

    // プラットフォーム自身のメールボックス・バケット用のアクセストークン
    pub async fn service_access_token(&self) -> AppResult<String> {
        let refresh_token = self.service_refresh_token.clone();
        self.access_token_from_refresh(&refresh_token).await
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    async fn post_token(&self, params: &[(&str, &str)]) -> AppResult<TokenResponse> {
        let res = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("token request error: {e}")))?;
        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "token endpoint returned {}",
                res.status()
            )));
        }
        res.json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("token decode error: {e}")))
    }
}
