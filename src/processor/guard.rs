use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use tracing::warn;

use crate::error::CheckinError;
use crate::models::checkin::CheckinRecord;

/// The hub-local calendar day a given instant falls on. Check-ins are
/// deduplicated per day in the hub's timezone, not in UTC.
pub fn local_day(now: DateTime<Utc>, tz_offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&tz_offset).date_naive()
}

/// Decide whether today's prior records conflict with this attempt.
///
/// `same_driver` / `same_device` are today's accepted records looked up by
/// driver ID and device ID respectively. A device conflict only exists when
/// the device was used by a *different* driver; the same driver re-using
/// their own device is already covered by the driver check.
pub fn evaluate(
    driver_id: &str,
    same_driver: Option<&CheckinRecord>,
    same_device: Option<&CheckinRecord>,
) -> Result<(), CheckinError> {
    if same_driver.is_some() {
        return Err(CheckinError::AlreadyCheckedInToday);
    }

    if let Some(rec) = same_device {
        if rec.id_driver != driver_id {
            return Err(CheckinError::DeviceAlreadyUsed {
                other_id: rec.id_driver.clone(),
            });
        }
    }

    Ok(())
}

/// Apply the configured failure policy to a duplicate-lookup result.
///
/// Fail-closed (default) turns a lookup error into `PersistenceUnavailable`
/// so the attempt is rejected. Fail-open logs and treats the lookup as
/// "no conflict"; the driver/day unique index still backstops duplicates.
pub fn resolve_lookup<T>(
    fail_open: bool,
    lookup: &str,
    result: Result<Option<T>, sqlx::Error>,
) -> Result<Option<T>, CheckinError> {
    match result {
        Ok(found) => Ok(found),
        Err(e) if fail_open => {
            warn!(lookup, error = %e, "duplicate lookup failed; proceeding (fail-open)");
            Ok(None)
        }
        Err(e) => Err(CheckinError::PersistenceUnavailable(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn record(id_driver: &str, device_id: Option<&str>) -> CheckinRecord {
        CheckinRecord {
            checkin_id: Uuid::new_v4(),
            id_driver: id_driver.to_string(),
            lat: -22.79999,
            lng: -43.35049,
            accuracy: Some(12.0),
            distance_km: 0.0,
            geofence_status: "INSIDE".to_string(),
            device_id: device_id.map(str::to_string),
            user_agent: None,
            checkin_date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_priors_means_no_conflict() {
        assert!(evaluate("4721", None, None).is_ok());
    }

    #[test]
    fn same_driver_today_conflicts() {
        let prior = record("4721", Some("web-a"));
        let err = evaluate("4721", Some(&prior), None).unwrap_err();
        assert!(matches!(err, CheckinError::AlreadyCheckedInToday));
    }

    #[test]
    fn device_used_by_another_driver_conflicts_and_names_it() {
        let prior = record("4721", Some("web-a"));
        let err = evaluate("9999", None, Some(&prior)).unwrap_err();
        match err {
            CheckinError::DeviceAlreadyUsed { other_id } => assert_eq!(other_id, "4721"),
            other => panic!("expected DeviceAlreadyUsed, got {other:?}"),
        }
    }

    #[test]
    fn own_device_record_alone_does_not_conflict() {
        // Covers the fail-open case where the driver lookup errored but the
        // device lookup returned the driver's own record.
        let prior = record("4721", Some("web-a"));
        assert!(evaluate("4721", None, Some(&prior)).is_ok());
    }

    #[test]
    fn day_rolls_over_at_local_midnight_not_utc() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();

        // 01:30 UTC is still the previous day at UTC-3.
        let before = Utc.with_ymd_and_hms(2026, 8, 5, 1, 30, 0).unwrap();
        assert_eq!(
            local_day(before, offset),
            NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
        );

        // 03:00 UTC is local midnight of the new day.
        let after = Utc.with_ymd_and_hms(2026, 8, 5, 3, 0, 0).unwrap();
        assert_eq!(
            local_day(after, offset),
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
        );
    }

    #[test]
    fn consecutive_days_use_distinct_windows() {
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let day1 = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        assert_ne!(local_day(day1, offset), local_day(day2, offset));
    }

    #[test]
    fn fail_open_swallows_lookup_errors_fail_closed_propagates() {
        let failed: Result<Option<()>, sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let resolved = resolve_lookup(true, "driver", failed).unwrap();
        assert!(resolved.is_none());

        let failed: Result<Option<()>, sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let err = resolve_lookup(false, "driver", failed).unwrap_err();
        assert!(matches!(err, CheckinError::PersistenceUnavailable(_)));
    }
}
