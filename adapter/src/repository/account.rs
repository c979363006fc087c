use crate::database::{model::account::AccountRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    account::{
        event::{CreateAccount, UpdateAccountPassword, UpsertGoogleAccount},
        Account,
    },
    id::AccountId,
    role::Role,
};
use kernel::repository::account::AccountRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct AccountRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create(&self, event: CreateAccount) -> AppResult<AccountId> {
        let account_id = AccountId::new();
        let hashed = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        sqlx::query(
            r#"
                INSERT INTO accounts (account_id, name, email, password_hash, role)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(hashed)
        .bind(Role::default().as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            // メールアドレスの一意制約違反
            Some(de) if de.is_unique_violation() => {
                AppError::UniqueViolation("このメールアドレスは登録済みです".into())
            }
            _ => AppError::SpecificOperationError(e),
        })?;
        Ok(account_id)
    }

    async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
                SELECT account_id, name, email, role, google_refresh_token
                FROM accounts
                WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
                SELECT account_id, name, email, role, google_refresh_token
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(Account::try_from).transpose()
    }

    async fn update_password(&self, event: UpdateAccountPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let current_hash: Option<(String,)> = sqlx::query_as(
            r#"SELECT password_hash FROM accounts WHERE account_id = $1"#,
        )
        .bind(event.account_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let Some((current_hash,)) = current_hash else {
            return Err(AppError::EntityNotFound("アカウントが見つかりません".into()));
        };

        let valid = bcrypt::verify(&event.current_password, &current_hash)
            .map_err(|_| AppError::LoginFailed)?;
        if !valid {
            return Err(AppError::LoginFailed);
        }

        let new_hash = bcrypt::hash(&event.new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        sqlx::query(r#"UPDATE accounts SET password_hash = $2 WHERE account_id = $1"#)
            .bind(event.account_id)
            .bind(new_hash)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn upsert_google_account(&self, event: UpsertGoogleAccount) -> AppResult<AccountId> {
        // Google ログインで作られたアカウントはパスワードログイン不可
        let row: (AccountId,) = sqlx::query_as(
            r#"
                INSERT INTO accounts (account_id, name, email, password_hash, role, google_refresh_token)
                VALUES ($1, $2, $3, '', $4, $5)
                ON CONFLICT (email) DO UPDATE SET
                    google_refresh_token
                        = COALESCE($5, accounts.google_refresh_token)
                RETURNING account_id
            "#,
        )
        .bind(AccountId::new())
        .bind(&event.name)
        .bind(&event.email)
        .bind(Role::default().as_ref())
        .bind(&event.refresh_token)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.0)
    }

    async fn google_refresh_token(&self, account_id: AccountId) -> AppResult<Option<String>> {
        let row: Option<(Option<String>,)> = sqlx::query_as(
            r#"SELECT google_refresh_token FROM accounts WHERE account_id = $1"#,
        )
        .bind(account_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        Ok(row.and_then(|r| r.0))
    }

    async fn emails_of(&self, account_ids: &[AccountId]) -> AppResult<Vec<String>> {
        let raw_ids: Vec<uuid::Uuid> = account_ids.iter().map(|id| id.raw()).collect();
        sqlx::query_scalar(r#"SELECT email FROM accounts WHERE account_id = ANY($1)"#)
            .bind(&raw_ids)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}
