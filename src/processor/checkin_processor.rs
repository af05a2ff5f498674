use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db;
use crate::error::CheckinError;
use crate::models::checkin::{GeofenceStatus, NewCheckin};
use crate::models::payload::CheckinPayload;
use crate::processor::{guard, normalizer, policy};

/// Outcome of an accepted check-in, echoed back to the client.
#[derive(Debug)]
pub struct AcceptedCheckin {
    pub driver_id: String,
    pub distance_km: f64,
}

/// Run one check-in attempt end to end:
/// normalize → geofence policy → duplicate guard → record.
pub async fn handle_checkin(
    pool: &db::DbPool,
    config: &AppConfig,
    payload: CheckinPayload,
) -> Result<AcceptedCheckin, CheckinError> {
    let req = normalizer::normalize(&payload, &config.validation)?;

    let (decision, rejection) = policy::evaluate(&req, &config.hub);
    let day = guard::local_day(Utc::now(), config.tz_offset);

    info!(
        driver = %req.driver_id,
        distance_km = decision.distance_km,
        within_radius = decision.within_radius,
        accuracy_ok = decision.accuracy_ok,
        "geofence evaluated"
    );

    if let Some(reason) = rejection {
        if config.record_out_of_range {
            if let CheckinError::OutOfRange { .. } = reason {
                record_outside_attempt(pool, &req, &decision, day).await;
            }
        }
        return Err(reason);
    }

    let same_driver = guard::resolve_lookup(
        config.duplicate_check_fail_open,
        "driver",
        db::checkins::find_on_day_by_driver(pool, &req.driver_id, day).await,
    )?;
    let same_device = match &req.device_id {
        Some(device) => guard::resolve_lookup(
            config.duplicate_check_fail_open,
            "device",
            db::checkins::find_on_day_by_device(pool, device, day).await,
        )?,
        None => None,
    };
    guard::evaluate(&req.driver_id, same_driver.as_ref(), same_device.as_ref())?;

    let rec = build_record(&req, &decision, GeofenceStatus::Inside, day);
    db::checkins::insert(pool, &rec).await?;

    info!(driver = %req.driver_id, checkin_id = %rec.checkin_id, "check-in recorded");

    Ok(AcceptedCheckin {
        driver_id: req.driver_id,
        distance_km: decision.distance_km,
    })
}

/// Persist a rejected-but-outside reading for diagnostics. Never changes the
/// outcome of the attempt.
async fn record_outside_attempt(
    pool: &db::DbPool,
    req: &normalizer::NormalizedCheckin,
    decision: &policy::GeofenceDecision,
    day: NaiveDate,
) {
    let rec = build_record(req, decision, GeofenceStatus::Outside, day);
    if let Err(e) = db::checkins::insert(pool, &rec).await {
        warn!(driver = %req.driver_id, error = %e, "failed to record out-of-range attempt");
    }
}

fn build_record(
    req: &normalizer::NormalizedCheckin,
    decision: &policy::GeofenceDecision,
    status: GeofenceStatus,
    day: NaiveDate,
) -> NewCheckin {
    NewCheckin {
        checkin_id: Uuid::new_v4(),
        id_driver: req.driver_id.clone(),
        lat: req.lat,
        lng: req.lng,
        accuracy: req.accuracy_m,
        distance_km: decision.distance_km,
        geofence_status: status,
        device_id: req.device_id.clone(),
        user_agent: req.user_agent.clone(),
        checkin_date: day,
    }
}
