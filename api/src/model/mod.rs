use serde::Serialize;

pub mod account;
pub mod album;
pub mod auth;
pub mod business_hour;
pub mod court;
pub mod reservation;
pub mod stadium;
pub mod venue;

// 成功レスポンスの共通エンベロープ。
// エラー時は AppError の IntoResponse が同じ形（data: null, error: 種別名）で返す
#[derive(Serialize)]
pub struct Envelope<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data, error: None }
    }
}
