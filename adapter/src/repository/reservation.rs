use crate::database::{
    model::{
        reservation::{MemberRow, MemberWithNameRow, ReservationRow},
        venue::VenueRow,
    },
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::availability;
use kernel::model::{
    id::{AccountId, CourtId, ReservationId, StadiumId, VenueId},
    range::DateTimeRange,
    reservation::{
        event::{
            CancelReservation, CreateReservation, JoinReservation, LeaveReservation,
            RejectInvitation, UpdateReservation,
        },
        InvitationCode, MemberSource, MemberStatus, Reservation, ReservationMember,
        ReservationMemberWithName, Vacancy,
    },
    venue::Venue,
};
use kernel::repository::reservation::{ReservationMemberRepository, ReservationRepository};
use shared::error::{AppError, AppResult};
use sqlx::{PgConnection, Postgres, Transaction};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

const RESERVATION_COLUMNS: &str = r#"
    reservation_id, court_id, venue_id, stadium_id,
    start_time, end_time, member_count, vacancy,
    technical_level, remark, invitation_code, is_cancelled, google_event_id
"#;

// 予約作成と参加はチェックと書き込みの間に他のトランザクションが
// 割り込むと不変条件が壊れるため、SERIALIZABLE で直列化する。
// 競合した側は TransactionError で失敗する
async fn set_serializable(tx: &mut Transaction<'_, Postgres>) -> AppResult<()> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut **tx)
        .await
        .map_err(AppError::TransactionError)?;
    Ok(())
}

async fn fetch_venue(conn: &mut PgConnection, venue_id: VenueId) -> AppResult<Venue> {
    let row: Option<VenueRow> = sqlx::query_as(
        r#"
            SELECT
                venue_id, stadium_id, name, is_reservable,
                reservation_interval, court_count, capacity
            FROM venues
            WHERE venue_id = $1
        "#,
    )
    .bind(venue_id)
    .fetch_optional(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;
    row.map(Venue::from).ok_or_else(|| {
        AppError::EntityNotFound(format!("ヴェニュー（{venue_id}）が見つかりませんでした"))
    })
}

// 営業時間が 1 件も登録されていない場所は予約を受け付けない。
// ヴェニュー側になければスタジアム側へフォールバックする
async fn has_business_hours(
    conn: &mut PgConnection,
    venue_id: VenueId,
    stadium_id: StadiumId,
) -> AppResult<bool> {
    let (exists,): (bool,) = sqlx::query_as(
        r#"
            SELECT EXISTS (
                SELECT 1 FROM business_hours
                WHERE (place_type = 'venue' AND place_id = $1)
                   OR (place_type = 'stadium' AND place_id = $2)
            )
        "#,
    )
    .bind(venue_id.raw())
    .bind(stadium_id.raw())
    .fetch_one(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;
    Ok(exists)
}

// 既存のキャンセルされていない予約との重なりを SQL 側で判定する。
// 半開区間なので端が接しているだけの予約は引っかからない
async fn find_overlapping(
    conn: &mut PgConnection,
    court_id: CourtId,
    window: &DateTimeRange,
    exclude: Option<ReservationId>,
) -> AppResult<Option<ReservationId>> {
    let row: Option<(ReservationId,)> = sqlx::query_as(
        r#"
            SELECT reservation_id
            FROM reservations
            WHERE court_id = $1
                AND is_cancelled = FALSE
                AND start_time < $3
                AND end_time > $2
                AND ($4::UUID IS NULL OR reservation_id <> $4)
            LIMIT 1
        "#,
    )
    .bind(court_id)
    .bind(window.start_time)
    .bind(window.end_time)
    .bind(exclude)
    .fetch_optional(conn)
    .await
    .map_err(AppError::SpecificOperationError)?;
    Ok(row.map(|(id,)| id))
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;
        set_serializable(&mut tx).await?;

        // 非公開のコートは存在しないものとして扱う
        let court: Option<(VenueId, bool)> =
            sqlx::query_as(r#"SELECT venue_id, is_published FROM courts WHERE court_id = $1"#)
                .bind(event.court_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let venue_id = match court {
            Some((venue_id, true)) => venue_id,
            _ => {
                return Err(AppError::EntityNotFound(format!(
                    "コート（{}）が見つかりませんでした",
                    event.court_id
                )))
            }
        };
        let venue = fetch_venue(&mut *tx, venue_id).await?;

        if !has_business_hours(&mut *tx, venue.venue_id, venue.stadium_id).await? {
            return Err(AppError::EntityNotFound(
                "営業時間が登録されていないため予約できません".into(),
            ));
        }

        // エラーの優先順位は固定：
        // VenueUnreservable -> CourtUnreservable -> CourtReserved -> IllegalInput
        availability::check_bookable(&venue, &event.range, event.requested_at)?;
        if find_overlapping(&mut *tx, event.court_id, &event.range, None)
            .await?
            .is_some()
        {
            return Err(AppError::CourtReserved(
                "指定の時間帯はすでに予約されています".into(),
            ));
        }
        availability::check_window(&event.range, event.requested_at)?;

        let reservation_id = ReservationId::new();
        let invitation_code = InvitationCode::generate();
        let technical_level: Vec<String> = event
            .technical_level
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect();
        sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, court_id, venue_id, stadium_id,
                start_time, end_time, member_count, vacancy,
                technical_level, remark, invitation_code)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(reservation_id)
        .bind(event.court_id)
        .bind(venue.venue_id)
        .bind(venue.stadium_id)
        .bind(event.range.start_time)
        .bind(event.range.end_time)
        .bind(event.member_count)
        .bind(event.vacancy.into_column())
        .bind(&technical_level)
        .bind(&event.remark)
        .bind(invitation_code.as_str())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 作成者は manager かつ joined、招待されたメンバーは invited
        sqlx::query(
            r#"
                INSERT INTO reservation_members
                (reservation_id, account_id, is_manager, status, source)
                VALUES ($1, $2, TRUE, $3, $4)
            "#,
        )
        .bind(reservation_id)
        .bind(event.reserved_by)
        .bind(MemberStatus::Joined.as_ref())
        .bind(MemberSource::Booking.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        for account_id in &event.member_ids {
            sqlx::query(
                r#"
                    INSERT INTO reservation_members
                    (reservation_id, account_id, is_manager, status, source)
                    VALUES ($1, $2, FALSE, $3, $4)
                "#,
            )
            .bind(reservation_id)
            .bind(account_id)
            .bind(MemberStatus::Invited.as_ref())
            .bind(MemberSource::Invitation.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(reservation_id)
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            r#"SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = $1"#
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_code(&self, code: &InvitationCode) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS} FROM reservations
                WHERE invitation_code = $1 AND is_cancelled = FALSE
            "#
        ))
        .bind(code.as_str())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_court_id(
        &self,
        court_id: CourtId,
        window: Option<DateTimeRange>,
    ) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            r#"
                SELECT {RESERVATION_COLUMNS} FROM reservations
                WHERE court_id = $1
                    AND is_cancelled = FALSE
                    AND ($2::TIMESTAMP IS NULL OR (start_time < $3 AND end_time > $2))
                ORDER BY start_time ASC
            "#
        ))
        .bind(court_id)
        .bind(window.as_ref().map(|w| w.start_time))
        .bind(window.as_ref().map(|w| w.end_time))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_account_id(&self, account_id: AccountId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            r#"
                SELECT
                    r.reservation_id, r.court_id, r.venue_id, r.stadium_id,
                    r.start_time, r.end_time, r.member_count, r.vacancy,
                    r.technical_level, r.remark, r.invitation_code,
                    r.is_cancelled, r.google_event_id
                FROM reservations AS r
                INNER JOIN reservation_members AS m
                    ON r.reservation_id = m.reservation_id
                WHERE m.account_id = $1
                    AND m.status <> '{rejected}'
                    AND r.is_cancelled = FALSE
                ORDER BY r.start_time ASC
            "#,
            rejected = MemberStatus::Rejected.as_ref()
        ))
        .bind(account_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_serializable(&mut tx).await?;

        let current = fetch_active(&mut tx, event.reservation_id).await?;
        check_manager(&mut tx, event.reservation_id, event.requested_user).await?;

        // 時間帯を変える場合は作成時と同じ検証をやり直す（自分自身は除外）
        if let Some(range) = &event.range {
            let venue = fetch_venue(&mut *tx, current.venue_id).await?;
            availability::check_bookable(&venue, range, event.requested_at)?;
            if find_overlapping(&mut *tx, current.court_id, range, Some(event.reservation_id))
                .await?
                .is_some()
            {
                return Err(AppError::CourtReserved(
                    "指定の時間帯はすでに予約されています".into(),
                ));
            }
            availability::check_window(range, event.requested_at)?;
        }

        let range = event.range.unwrap_or(current.range);
        let technical_level: Vec<String> = event
            .technical_level
            .unwrap_or(current.technical_level)
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect();
        let remark = event.remark.unwrap_or(current.remark);
        let vacancy = event.vacancy.unwrap_or(current.vacancy);

        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET start_time = $2, end_time = $3,
                    technical_level = $4, remark = $5, vacancy = $6
                WHERE reservation_id = $1 AND is_cancelled = FALSE
            "#,
        )
        .bind(event.reservation_id)
        .bind(range.start_time)
        .bind(range.end_time)
        .bind(&technical_level)
        .bind(&remark)
        .bind(vacancy.into_column())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        fetch_active(&mut tx, event.reservation_id).await?;
        check_manager(&mut tx, event.reservation_id, event.requested_user).await?;

        let res = sqlx::query(
            r#"
                UPDATE reservations SET is_cancelled = TRUE
                WHERE reservation_id = $1 AND is_cancelled = FALSE
            "#,
        )
        .bind(event.reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    async fn set_google_event_id(
        &self,
        reservation_id: ReservationId,
        event_id: &str,
    ) -> AppResult<()> {
        sqlx::query(r#"UPDATE reservations SET google_event_id = $2 WHERE reservation_id = $1"#)
            .bind(reservation_id)
            .bind(event_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

async fn fetch_active(
    tx: &mut Transaction<'_, Postgres>,
    reservation_id: ReservationId,
) -> AppResult<Reservation> {
    let row: Option<ReservationRow> = sqlx::query_as(&format!(
        r#"
            SELECT {RESERVATION_COLUMNS} FROM reservations
            WHERE reservation_id = $1 AND is_cancelled = FALSE
        "#
    ))
    .bind(reservation_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;
    let Some(row) = row else {
        return Err(AppError::EntityNotFound(format!(
            "予約（{reservation_id}）が見つかりませんでした"
        )));
    };
    Reservation::try_from(row)
}

// 予約の変更・キャンセルは管理者のみ行える
async fn check_manager(
    tx: &mut Transaction<'_, Postgres>,
    reservation_id: ReservationId,
    requested_user: AccountId,
) -> AppResult<()> {
    let row: Option<(bool,)> = sqlx::query_as(
        r#"
            SELECT is_manager FROM reservation_members
            WHERE reservation_id = $1 AND account_id = $2
        "#,
    )
    .bind(reservation_id)
    .bind(requested_user)
    .fetch_optional(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;
    match row {
        Some((true,)) => Ok(()),
        _ => Err(AppError::NoPermission(
            "予約の管理者のみ操作できます".into(),
        )),
    }
}

#[derive(new)]
pub struct ReservationMemberRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationMemberRepository for ReservationMemberRepositoryImpl {
    async fn find(
        &self,
        reservation_id: ReservationId,
        account_id: AccountId,
    ) -> AppResult<Option<ReservationMember>> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, account_id, is_manager, status, source
                FROM reservation_members
                WHERE reservation_id = $1 AND account_id = $2
            "#,
        )
        .bind(reservation_id)
        .bind(account_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        row.map(ReservationMember::try_from).transpose()
    }

    async fn find_with_names(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Vec<ReservationMemberWithName>> {
        let rows: Vec<MemberWithNameRow> = sqlx::query_as(
            r#"
                SELECT
                    m.reservation_id, m.account_id, m.is_manager,
                    m.status, m.source,
                    a.name AS account_name, a.email
                FROM reservation_members AS m
                INNER JOIN accounts AS a ON m.account_id = a.account_id
                WHERE m.reservation_id = $1
                ORDER BY m.created_at ASC
            "#,
        )
        .bind(reservation_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        rows.into_iter()
            .map(ReservationMemberWithName::try_from)
            .collect()
    }

    async fn join(&self, event: JoinReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;
        set_serializable(&mut tx).await?;

        let row: Option<(ReservationId, i32)> = sqlx::query_as(
            r#"
                SELECT reservation_id, vacancy FROM reservations
                WHERE invitation_code = $1 AND is_cancelled = FALSE
            "#,
        )
        .bind(event.invitation_code.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let Some((reservation_id, vacancy)) = row else {
            return Err(AppError::EntityNotFound(
                "招待コードに対応する予約が見つかりませんでした".into(),
            ));
        };
        let vacancy = Vacancy::from_column(vacancy);

        let existing: Option<(String,)> = sqlx::query_as(
            r#"
                SELECT status FROM reservation_members
                WHERE reservation_id = $1 AND account_id = $2
            "#,
        )
        .bind(reservation_id)
        .bind(event.account_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        match existing.as_ref().map(|(s,)| s.as_str()) {
            // 辞退したメンバーは同じ招待コードで参加し直せない
            Some(s) if s == MemberStatus::Rejected.as_ref() => {
                return Err(AppError::NoPermission(
                    "辞退済みの予約には参加できません".into(),
                ));
            }
            Some(s) if s == MemberStatus::Joined.as_ref() => {
                return Err(AppError::UniqueViolation(
                    "すでに参加している予約です".into(),
                ));
            }
            Some(_) => {
                // 招待されていたメンバーの参加
                if !vacancy.has_opening() {
                    return Err(AppError::ReservationFull(
                        "募集人数に達しています".into(),
                    ));
                }
                sqlx::query(
                    r#"
                        UPDATE reservation_members SET status = $3
                        WHERE reservation_id = $1 AND account_id = $2
                    "#,
                )
                .bind(reservation_id)
                .bind(event.account_id)
                .bind(MemberStatus::Joined.as_ref())
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            }
            None => {
                if !vacancy.has_opening() {
                    return Err(AppError::ReservationFull(
                        "募集人数に達しています".into(),
                    ));
                }
                sqlx::query(
                    r#"
                        INSERT INTO reservation_members
                        (reservation_id, account_id, is_manager, status, source)
                        VALUES ($1, $2, FALSE, $3, $4)
                    "#,
                )
                .bind(reservation_id)
                .bind(event.account_id)
                .bind(MemberStatus::Joined.as_ref())
                .bind(MemberSource::InvitationCode.as_ref())
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            }
        }

        // 番兵値（-1 = 無制限）はそのまま
        sqlx::query(
            r#"
                UPDATE reservations SET vacancy = vacancy - 1
                WHERE reservation_id = $1 AND vacancy > 0
            "#,
        )
        .bind(reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(reservation_id)
    }

    async fn leave(&self, event: LeaveReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_serializable(&mut tx).await?;

        let row: Option<MemberRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, account_id, is_manager, status, source
                FROM reservation_members
                WHERE reservation_id = $1 AND account_id = $2
            "#,
        )
        .bind(event.reservation_id)
        .bind(event.account_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let Some(row) = row else {
            return Err(AppError::EntityNotFound(
                "予約のメンバーではありません".into(),
            ));
        };
        let leaving = ReservationMember::try_from(row)?;

        sqlx::query(
            r#"
                DELETE FROM reservation_members
                WHERE reservation_id = $1 AND account_id = $2
            "#,
        )
        .bind(event.reservation_id)
        .bind(event.account_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 参加していたメンバーが抜けた分だけ募集枠を戻す（無制限はそのまま）。
        // 予約作成者は作成時に募集枠を消費していないので、抜けても枠は戻さない
        if leaving.status == MemberStatus::Joined && leaving.source != MemberSource::Booking {
            sqlx::query(
                r#"
                    UPDATE reservations SET vacancy = vacancy + 1
                    WHERE reservation_id = $1 AND vacancy >= 0
                "#,
            )
            .bind(event.reservation_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        let remaining: Vec<MemberRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, account_id, is_manager, status, source
                FROM reservation_members
                WHERE reservation_id = $1
            "#,
        )
        .bind(event.reservation_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let remaining = remaining
            .into_iter()
            .map(ReservationMember::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        if remaining.is_empty() {
            // メンバーが誰もいなくなった予約は消す
            sqlx::query(r#"DELETE FROM reservations WHERE reservation_id = $1"#)
                .bind(event.reservation_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        } else if leaving.is_manager {
            if let Some(next) = availability::next_manager(&remaining) {
                sqlx::query(
                    r#"
                        UPDATE reservation_members SET is_manager = TRUE
                        WHERE reservation_id = $1 AND account_id = $2
                    "#,
                )
                .bind(event.reservation_id)
                .bind(next)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }

    // チェックと更新の間に管理者の引き継ぎが割り込むと、
    // 管理者になった直後のメンバーが辞退できてしまうため直列化する
    async fn reject(&self, event: RejectInvitation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        set_serializable(&mut tx).await?;

        let row: Option<(bool, String)> = sqlx::query_as(
            r#"
                SELECT is_manager, status FROM reservation_members
                WHERE reservation_id = $1 AND account_id = $2
            "#,
        )
        .bind(event.reservation_id)
        .bind(event.account_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let Some((is_manager, status)) = row else {
            return Err(AppError::EntityNotFound(
                "招待が見つかりませんでした".into(),
            ));
        };
        if is_manager || status != MemberStatus::Invited.as_ref() {
            return Err(AppError::NoPermission(
                "招待中のメンバーのみ辞退できます".into(),
            ));
        }

        sqlx::query(
            r#"
                UPDATE reservation_members SET status = $3
                WHERE reservation_id = $1 AND account_id = $2
                    AND status = $4 AND is_manager = FALSE
            "#,
        )
        .bind(event.reservation_id)
        .bind(event.account_id)
        .bind(MemberStatus::Rejected.as_ref())
        .bind(MemberStatus::Invited.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime};
    use kernel::model::reservation::TechnicalLevel;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn range(start: &str, end: &str) -> DateTimeRange {
        DateTimeRange::new(dt(start), dt(end))
    }

    struct Fixture {
        owner: AccountId,
        venue_id: VenueId,
        court_id: CourtId,
    }

    // アカウント・スタジアム・ヴェニュー（コート 1 面）・全曜日の営業時間を用意する
    async fn setup(pool: &sqlx::PgPool) -> Fixture {
        let owner = seed_account(pool, "owner", "owner@example.com").await;
        let stadium_id = StadiumId::new();
        sqlx::query(
            "INSERT INTO stadiums (stadium_id, owned_by, name) VALUES ($1, $2, 'Arena')",
        )
        .bind(stadium_id)
        .bind(owner)
        .execute(pool)
        .await
        .unwrap();
        let venue_id = VenueId::new();
        sqlx::query(
            r#"
                INSERT INTO venues
                (venue_id, stadium_id, name, reservation_interval, court_count)
                VALUES ($1, $2, 'Main Hall', 14, 1)
            "#,
        )
        .bind(venue_id)
        .bind(stadium_id)
        .execute(pool)
        .await
        .unwrap();
        let court_id = CourtId::new();
        sqlx::query(
            r#"
                INSERT INTO courts (court_id, venue_id, number, is_published)
                VALUES ($1, $2, 1, TRUE)
            "#,
        )
        .bind(court_id)
        .bind(venue_id)
        .execute(pool)
        .await
        .unwrap();
        for weekday in 0..7i16 {
            sqlx::query(
                r#"
                    INSERT INTO business_hours
                    (place_type, place_id, weekday, start_time, end_time)
                    VALUES ('venue', $1, $2, $3, $4)
                "#,
            )
            .bind(venue_id.raw())
            .bind(weekday)
            .bind(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
            .bind(NaiveTime::from_hms_opt(22, 0, 0).unwrap())
            .execute(pool)
            .await
            .unwrap();
        }
        Fixture {
            owner,
            venue_id,
            court_id,
        }
    }

    async fn seed_account(pool: &sqlx::PgPool, name: &str, email: &str) -> AccountId {
        let account_id = AccountId::new();
        sqlx::query(
            "INSERT INTO accounts (account_id, name, email, password_hash) VALUES ($1, $2, $3, '')",
        )
        .bind(account_id)
        .bind(name)
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
        account_id
    }

    fn create_event(
        fixture: &Fixture,
        window: DateTimeRange,
        vacancy: Vacancy,
    ) -> CreateReservation {
        CreateReservation::new(
            fixture.court_id,
            window,
            4,
            vacancy,
            vec![TechnicalLevel::Intermediate],
            "練習試合".into(),
            fixture.owner,
            vec![],
            dt("2023-11-01 09:00"),
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn create_rejects_overlap_but_allows_touching(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let id = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 10:00", "2023-11-02 12:00"),
                Vacancy::Remaining(2),
            ))
            .await
            .unwrap();
        let created = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(created.vacancy, Vacancy::Remaining(2));
        assert!(!created.is_cancelled);

        // 途中から重なる時間帯は拒否
        let err = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 11:00", "2023-11-02 13:00"),
                Vacancy::Unlimited,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CourtReserved(_)));

        // 端が接しているだけなら予約できる
        repo.create(create_event(
            &fixture,
            range("2023-11-02 12:00", "2023-11-02 13:00"),
            Vacancy::Unlimited,
        ))
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn create_rejects_window_beyond_horizon(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        // reservation_interval = 14、リクエストは 11/01 なので 11/20 は不可
        let err = repo
            .create(create_event(
                &fixture,
                range("2023-11-20 10:00", "2023-11-20 12:00"),
                Vacancy::Unlimited,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CourtUnreservable(_)));
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn create_rejects_unreservable_venue(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        sqlx::query("UPDATE venues SET is_reservable = FALSE WHERE venue_id = $1")
            .bind(fixture.venue_id)
            .execute(&pool)
            .await
            .unwrap();
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let err = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 10:00", "2023-11-02 12:00"),
                Vacancy::Unlimited,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::VenueUnreservable(_)));
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn create_requires_business_hours(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        sqlx::query("DELETE FROM business_hours WHERE place_id = $1")
            .bind(fixture.venue_id.raw())
            .execute(&pool)
            .await
            .unwrap();
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let err = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 10:00", "2023-11-02 12:00"),
                Vacancy::Unlimited,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn join_decrements_vacancy_until_full(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let members = ReservationMemberRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let id = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 10:00", "2023-11-02 12:00"),
                Vacancy::Remaining(1),
            ))
            .await
            .unwrap();
        let code = repo.find_by_id(id).await.unwrap().unwrap().invitation_code;

        let alice = seed_account(&pool, "alice", "alice@example.com").await;
        let joined = members
            .join(JoinReservation::new(code.clone(), alice))
            .await
            .unwrap();
        assert_eq!(joined, id);
        let after = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.vacancy, Vacancy::Remaining(0));

        // 満員になったら次の参加は拒否
        let bob = seed_account(&pool, "bob", "bob@example.com").await;
        let err = members
            .join(JoinReservation::new(code.clone(), bob))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReservationFull(_)));

        // 参加済みメンバーの再参加は重複
        let err = members
            .join(JoinReservation::new(code, alice))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UniqueViolation(_)));
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn leave_restores_vacancy_only_for_joiners(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let members = ReservationMemberRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let id = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 10:00", "2023-11-02 12:00"),
                Vacancy::Remaining(1),
            ))
            .await
            .unwrap();
        let code = repo.find_by_id(id).await.unwrap().unwrap().invitation_code;

        let alice = seed_account(&pool, "alice", "alice@example.com").await;
        members
            .join(JoinReservation::new(code.clone(), alice))
            .await
            .unwrap();
        assert_eq!(
            repo.find_by_id(id).await.unwrap().unwrap().vacancy,
            Vacancy::Remaining(0)
        );

        // 招待コードで参加したメンバーが抜けると枠が戻る
        members.leave(LeaveReservation::new(id, alice)).await.unwrap();
        assert_eq!(
            repo.find_by_id(id).await.unwrap().unwrap().vacancy,
            Vacancy::Remaining(1)
        );

        // 作成者は枠を消費していないため、抜けても枠は増えない
        members.join(JoinReservation::new(code, alice)).await.unwrap();
        members
            .leave(LeaveReservation::new(id, fixture.owner))
            .await
            .unwrap();
        assert_eq!(
            repo.find_by_id(id).await.unwrap().unwrap().vacancy,
            Vacancy::Remaining(0)
        );
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn promoted_invitee_cannot_reject(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let alice = seed_account(&pool, "alice", "alice@example.com").await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let members = ReservationMemberRepositoryImpl::new(ConnectionPool::new(pool));

        let mut event = create_event(
            &fixture,
            range("2023-11-02 10:00", "2023-11-02 12:00"),
            Vacancy::Unlimited,
        );
        event.member_ids = vec![alice];
        let id = repo.create(event).await.unwrap();

        // 作成者が抜けると、招待中のメンバーでも管理者を引き継ぐ
        members
            .leave(LeaveReservation::new(id, fixture.owner))
            .await
            .unwrap();
        let promoted = members.find(id, alice).await.unwrap().unwrap();
        assert!(promoted.is_manager);
        assert_eq!(promoted.status, MemberStatus::Invited);

        // 管理者になった以上、招待中のままでも辞退はできない
        let err = members
            .reject(RejectInvitation::new(id, alice))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoPermission(_)));
        let after = members.find(id, alice).await.unwrap().unwrap();
        assert_eq!(after.status, MemberStatus::Invited);
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn manager_leave_promotes_lowest_account_id(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let members = ReservationMemberRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let id = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 10:00", "2023-11-02 12:00"),
                Vacancy::Unlimited,
            ))
            .await
            .unwrap();
        let code = repo.find_by_id(id).await.unwrap().unwrap().invitation_code;

        let alice = seed_account(&pool, "alice", "alice@example.com").await;
        let bob = seed_account(&pool, "bob", "bob@example.com").await;
        members
            .join(JoinReservation::new(code.clone(), alice))
            .await
            .unwrap();
        members.join(JoinReservation::new(code, bob)).await.unwrap();

        members
            .leave(LeaveReservation::new(id, fixture.owner))
            .await
            .unwrap();

        let expected = alice.min(bob);
        let promoted = members.find(id, expected).await.unwrap().unwrap();
        assert!(promoted.is_manager);
        let other = members.find(id, alice.max(bob)).await.unwrap().unwrap();
        assert!(!other.is_manager);
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn last_member_leave_deletes_reservation(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let members = ReservationMemberRepositoryImpl::new(ConnectionPool::new(pool));

        let id = repo
            .create(create_event(
                &fixture,
                range("2023-11-02 10:00", "2023-11-02 12:00"),
                Vacancy::Unlimited,
            ))
            .await
            .unwrap();

        members
            .leave(LeaveReservation::new(id, fixture.owner))
            .await
            .unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn reject_is_limited_to_invited_members(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let alice = seed_account(&pool, "alice", "alice@example.com").await;
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let members = ReservationMemberRepositoryImpl::new(ConnectionPool::new(pool));

        let mut event = create_event(
            &fixture,
            range("2023-11-02 10:00", "2023-11-02 12:00"),
            Vacancy::Unlimited,
        );
        event.member_ids = vec![alice];
        let id = repo.create(event).await.unwrap();

        // 管理者（joined）は辞退できない
        let err = members
            .reject(RejectInvitation::new(id, fixture.owner))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoPermission(_)));

        members
            .reject(RejectInvitation::new(id, alice))
            .await
            .unwrap();
        let rejected = members.find(id, alice).await.unwrap().unwrap();
        assert_eq!(rejected.status, MemberStatus::Rejected);

        // 辞退は終端。参加し直しもできない
        let code = repo.find_by_id(id).await.unwrap().unwrap().invitation_code;
        let err = members
            .join(JoinReservation::new(code, alice))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoPermission(_)));
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn concurrent_bookings_cannot_both_win(pool: sqlx::PgPool) {
        let fixture = setup(&pool).await;
        let repo_a = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let repo_b = ReservationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let window = range("2023-11-02 10:00", "2023-11-02 12:00");
        let (a, b) = tokio::join!(
            repo_a.create(create_event(&fixture, window, Vacancy::Unlimited)),
            repo_b.create(create_event(&fixture, window, Vacancy::Unlimited)),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert!(successes <= 1);
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reservations WHERE court_id = $1")
                .bind(fixture.court_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count as usize, successes);
    }
}
