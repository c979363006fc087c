use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub google: GoogleConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse()?,
        };
        let google = GoogleConfig {
            client_id: std::env::var("GOOGLE_CLIENT_ID")?,
            client_secret: std::env::var("GOOGLE_CLIENT_SECRET")?,
            redirect_uri: std::env::var("GOOGLE_REDIRECT_URI")?,
            // プラットフォーム自身の送信用メールボックスのリフレッシュトークン
            service_refresh_token: std::env::var("GOOGLE_SERVICE_REFRESH_TOKEN")?,
            calendar_time_zone: std::env::var("GOOGLE_CALENDAR_TIME_ZONE")
                .unwrap_or_else(|_| "Asia/Taipei".into()),
        };
        let storage = StorageConfig {
            bucket: std::env::var("STORAGE_BUCKET")?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            google,
            storage,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    // アクセストークンの有効期限（秒）
    pub ttl: u64,
}

pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub service_refresh_token: String,
    pub calendar_time_zone: String,
}

pub struct StorageConfig {
    pub bucket: String,
}
