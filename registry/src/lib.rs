use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::google::{
    calendar::CalendarClient, mail::MailClient, storage::StorageClient, GoogleClient,
};
use adapter::redis::RedisClient;
use adapter::repository::account::AccountRepositoryImpl;
use adapter::repository::album::AlbumRepositoryImpl;
use adapter::repository::auth::AuthRepositoryImpl;
use adapter::repository::business_hour::BusinessHourRepositoryImpl;
use adapter::repository::court::CourtRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::{
    ReservationMemberRepositoryImpl, ReservationRepositoryImpl,
};
use adapter::repository::stadium::StadiumRepositoryImpl;
use adapter::repository::venue::VenueRepositoryImpl;
use kernel::repository::account::AccountRepository;
use kernel::repository::album::AlbumRepository;
use kernel::repository::auth::AuthRepository;
use kernel::repository::business_hour::BusinessHourRepository;
use kernel::repository::court::CourtRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::{ReservationMemberRepository, ReservationRepository};
use kernel::repository::stadium::StadiumRepository;
use kernel::repository::venue::VenueRepository;
use shared::config::AppConfig;

// DI コンテナ。ルートハンドラーはここから Arc<dyn Trait> を取り出して使う
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    account_repository: Arc<dyn AccountRepository>,
    stadium_repository: Arc<dyn StadiumRepository>,
    venue_repository: Arc<dyn VenueRepository>,
    court_repository: Arc<dyn CourtRepository>,
    business_hour_repository: Arc<dyn BusinessHourRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    reservation_member_repository: Arc<dyn ReservationMemberRepository>,
    album_repository: Arc<dyn AlbumRepository>,
    google_client: Arc<GoogleClient>,
    mail_client: Arc<MailClient>,
    calendar_client: Arc<CalendarClient>,
    storage_client: Arc<StorageClient>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let account_repository = Arc::new(AccountRepositoryImpl::new(pool.clone()));
        let stadium_repository = Arc::new(StadiumRepositoryImpl::new(pool.clone()));
        let venue_repository = Arc::new(VenueRepositoryImpl::new(pool.clone()));
        let court_repository = Arc::new(CourtRepositoryImpl::new(pool.clone()));
        let business_hour_repository = Arc::new(BusinessHourRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let reservation_member_repository =
            Arc::new(ReservationMemberRepositoryImpl::new(pool.clone()));
        let album_repository = Arc::new(AlbumRepositoryImpl::new(pool.clone()));

        let google_client = Arc::new(GoogleClient::new(&app_config.google));
        let mail_client = Arc::new(MailClient::new(google_client.clone()));
        let calendar_client = Arc::new(CalendarClient::new(
            google_client.clone(),
            app_config.google.calendar_time_zone.clone(),
        ));
        let storage_client = Arc::new(StorageClient::new(
            google_client.clone(),
            app_config.storage.bucket.clone(),
        ));

        Self {
            health_check_repository,
            auth_repository,
            account_repository,
            stadium_repository,
            venue_repository,
            court_repository,
            business_hour_repository,
            reservation_repository,
            reservation_member_repository,
            album_repository,
            google_client,
            mail_client,
            calendar_client,
            storage_client,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn account_repository(&self) -> Arc<dyn AccountRepository> {
        self.account_repository.clone()
    }

    pub fn stadium_repository(&self) -> Arc<dyn StadiumRepository> {
        self.stadium_repository.clone()
    }

    pub fn venue_repository(&self) -> Arc<dyn VenueRepository> {
        self.venue_repository.clone()
    }

    pub fn court_repository(&self) -> Arc<dyn CourtRepository> {
        self.court_repository.clone()
    }

    pub fn business_hour_repository(&self) -> Arc<dyn BusinessHourRepository> {
        self.business_hour_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn reservation_member_repository(&self) -> Arc<dyn ReservationMemberRepository> {
        self.reservation_member_repository.clone()
    }

    pub fn album_repository(&self) -> Arc<dyn AlbumRepository> {
        self.album_repository.clone()
    }

    pub fn google_client(&self) -> Arc<GoogleClient> {
        self.google_client.clone()
    }

    pub fn mail_client(&self) -> Arc<MailClient> {
        self.mail_client.clone()
    }

    pub fn calendar_client(&self) -> Arc<CalendarClient> {
        self.calendar_client.clone()
    }

    pub fn storage_client(&self) -> Arc<StorageClient> {
        self.storage_client.clone()
    }
}
