use chrono::NaiveDate;
use sqlx::error::DatabaseError;

use crate::db::{queries, DbPool};
use crate::error::CheckinError;
use crate::models::checkin::{CheckinRecord, NewCheckin};

pub async fn find_on_day_by_driver(
    pool: &DbPool,
    id_driver: &str,
    day: NaiveDate,
) -> Result<Option<CheckinRecord>, sqlx::Error> {
    sqlx::query_as::<_, CheckinRecord>(queries::SELECT_CHECKIN_BY_DRIVER_ON_DAY)
        .bind(id_driver)
        .bind(day)
        .fetch_optional(pool)
        .await
}

pub async fn find_on_day_by_device(
    pool: &DbPool,
    device_id: &str,
    day: NaiveDate,
) -> Result<Option<CheckinRecord>, sqlx::Error> {
    sqlx::query_as::<_, CheckinRecord>(queries::SELECT_CHECKIN_BY_DEVICE_ON_DAY)
        .bind(device_id)
        .bind(day)
        .fetch_optional(pool)
        .await
}

/// Insert a single check-in row.
///
/// The driver/day uniqueness is ultimately guaranteed by
/// `uq_checkins_driver_day`, not by the pre-insert lookups, so a concurrent
/// duplicate surfaces here and is reported exactly like the pre-check would
/// have reported it.
pub async fn insert(pool: &DbPool, rec: &NewCheckin) -> Result<(), CheckinError> {
    let result = sqlx::query(queries::INSERT_CHECKIN)
        .bind(rec.checkin_id)
        .bind(&rec.id_driver)
        .bind(rec.lat)
        .bind(rec.lng)
        .bind(rec.accuracy)
        .bind(rec.distance_km)
        .bind(rec.geofence_status.as_str())
        .bind(&rec.device_id)
        .bind(&rec.user_agent)
        .bind(rec.checkin_date)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err)) if is_driver_day_conflict(db_err.as_ref()) => {
            Err(CheckinError::AlreadyCheckedInToday)
        }
        Err(e) => Err(CheckinError::PersistenceUnavailable(e)),
    }
}

// PostgreSQL unique violation: error code 23505
fn is_driver_day_conflict(err: &dyn DatabaseError) -> bool {
    err.code().as_deref() == Some("23505")
        && err.constraint() == Some("uq_checkins_driver_day")
}
