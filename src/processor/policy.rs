use crate::config::HubConfig;
use crate::error::CheckinError;
use crate::geo;
use crate::processor::normalizer::NormalizedCheckin;

/// Deterministic geofence evaluation of one reading against the hub.
#[derive(Debug, Clone, Copy)]
pub struct GeofenceDecision {
    pub distance_km: f64,
    pub within_radius: bool,
    pub accuracy_ok: bool,
}

/// Evaluate accuracy and distance for a normalized check-in.
///
/// The decision is always fully computed, including the distance of rejected
/// readings, so callers can log it. Accuracy is checked before distance: a
/// weak fix makes the distance meaningless, and the accuracy problem is the
/// one the user can act on. An unknown accuracy skips the accuracy check.
/// The radius comparison is inclusive, plus the configured slack.
pub fn evaluate(
    req: &NormalizedCheckin,
    hub: &HubConfig,
) -> (GeofenceDecision, Option<CheckinError>) {
    let distance_km = geo::haversine_km(req.lat, req.lng, hub.base_lat, hub.base_lng);
    let accuracy_ok = req.accuracy_m.is_none_or(|a| a <= hub.min_accuracy_m);
    let within_radius = distance_km <= hub.radius_km + hub.radius_slack_km;

    let decision = GeofenceDecision {
        distance_km,
        within_radius,
        accuracy_ok,
    };

    let rejection = match req.accuracy_m {
        Some(a) if a > hub.min_accuracy_m => Some(CheckinError::WeakSignal { accuracy_m: a }),
        _ if !within_radius => Some(CheckinError::OutOfRange { distance_km }),
        _ => None,
    };

    (decision, rejection)
}
