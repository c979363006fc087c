use crate::model::{
    id::{AccountId, CourtId, ReservationId},
    range::DateTimeRange,
    reservation::{
        event::{
            CancelReservation, CreateReservation, JoinReservation, LeaveReservation,
            RejectInvitation, UpdateReservation,
        },
        InvitationCode, Reservation, ReservationMember, ReservationMemberWithName,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約操作を行う。ヴェニューの予約可否・予約可能期間・営業時間の有無・
    // 既存予約との衝突をすべて確認したうえで、予約レコードと
    // メンバーレコード（作成者は manager / joined、招待者は invited）を挿入する
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    async fn find_by_code(&self, code: &InvitationCode) -> AppResult<Option<Reservation>>;
    // コートに紐づくキャンセルされていない予約を取得する。
    // window を指定するとその区間に重なるものへ絞り込む
    async fn find_by_court_id(
        &self,
        court_id: CourtId,
        window: Option<DateTimeRange>,
    ) -> AppResult<Vec<Reservation>>;
    // アカウントが参加（または招待）されている予約の一覧
    async fn find_by_account_id(&self, account_id: AccountId) -> AppResult<Vec<Reservation>>;
    // 時間帯の変更を伴う場合は衝突を再検証する
    async fn update(&self, event: UpdateReservation) -> AppResult<()>;
    async fn cancel(&self, event: CancelReservation) -> AppResult<()>;
    async fn set_google_event_id(
        &self,
        reservation_id: ReservationId,
        event_id: &str,
    ) -> AppResult<()>;
}

#[async_trait]
pub trait ReservationMemberRepository: Send + Sync {
    async fn find(
        &self,
        reservation_id: ReservationId,
        account_id: AccountId,
    ) -> AppResult<Option<ReservationMember>>;
    async fn find_with_names(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Vec<ReservationMemberWithName>>;
    // 招待コードでの参加。満員なら ReservationFull
    async fn join(&self, event: JoinReservation) -> AppResult<ReservationId>;
    // 離脱。管理者が抜けた場合は残りの最小アカウント ID へ引き継ぎ、
    // 最後の 1 人が抜けた場合は予約自体を削除する
    async fn leave(&self, event: LeaveReservation) -> AppResult<()>;
    // 招待の辞退。invited のメンバー本人のみ可
    async fn reject(&self, event: RejectInvitation) -> AppResult<()>;
}
