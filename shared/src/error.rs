use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

// アプリケーション全体で使うエラー型。
// ルートハンドラーが返すエラーはすべてこの列挙型のいずれかにし、
// HTTP ステータスコードへの対応は status_code の静的な対応表で決める。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    IllegalInput(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    NoPermission(String),
    #[error("ログインに失敗しました")]
    LoginFailed,
    #[error("ログインの有効期限が切れています")]
    LoginExpired,
    #[error("認証情報が不正です")]
    Unauthenticated,
    #[error("{0}")]
    CourtReserved(String),
    #[error("{0}")]
    CourtUnreservable(String),
    #[error("{0}")]
    VenueUnreservable(String),
    #[error("{0}")]
    ReservationFull(String),
    #[error("{0}")]
    UniqueViolation(String),
    #[error("トランザクションを実行できませんでした")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理の実行中にエラーが発生しました")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    ExternalServiceError(String),
    #[error("{0}")]
    ConversionEntityError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // レスポンスの error フィールドに入れるエラー種別名
    pub fn kind(&self) -> &'static str {
        use AppError::*;
        match self {
            EntityNotFound(_) => "NotFound",
            IllegalInput(_) | ValidationError(_) => "IllegalInput",
            NoPermission(_) => "NoPermission",
            LoginFailed => "LoginFailed",
            LoginExpired => "LoginExpired",
            Unauthenticated => "Unauthenticated",
            CourtReserved(_) => "CourtReserved",
            CourtUnreservable(_) => "CourtUnreservable",
            VenueUnreservable(_) => "VenueUnreservable",
            ReservationFull(_) => "ReservationFull",
            UniqueViolation(_) => "UniqueViolationError",
            TransactionError(_) => "TransactionError",
            SpecificOperationError(_) => "SpecificOperationError",
            NoRowsAffectedError(_) => "NoRowsAffectedError",
            KeyValueStoreError(_) => "KeyValueStoreError",
            ExternalServiceError(_) => "ExternalServiceError",
            ConversionEntityError(_) => "ConversionEntityError",
        }
    }

    fn status_code(&self) -> StatusCode {
        use AppError::*;
        match self {
            EntityNotFound(_) => StatusCode::NOT_FOUND,
            IllegalInput(_) | ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NoPermission(_) => StatusCode::FORBIDDEN,
            LoginFailed | LoginExpired | Unauthenticated => StatusCode::UNAUTHORIZED,
            CourtReserved(_) | CourtUnreservable(_) | VenueUnreservable(_) | ReservationFull(_)
            | UniqueViolation(_) => StatusCode::CONFLICT,
            TransactionError(_)
            | SpecificOperationError(_)
            | NoRowsAffectedError(_)
            | KeyValueStoreError(_)
            | ExternalServiceError(_)
            | ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self, error.message = %self,
                "Unexpected error happened"
            );
        } else {
            tracing::warn!(
                error.cause_chain = ?self, error.message = %self,
                "Handled client error"
            );
        }
        // 成功時と同じ {data, error} エンベロープで返す
        (
            status_code,
            Json(json!({ "data": null, "error": self.kind() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_kinds_map_to_409() {
        let err = AppError::CourtReserved("t".into());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.kind(), "CourtReserved");
    }

    #[test]
    fn login_errors_map_to_401() {
        assert_eq!(AppError::LoginFailed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::LoginExpired.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
