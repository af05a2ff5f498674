use crate::config::ValidationConfig;
use crate::error::CheckinError;
use crate::models::payload::{CheckinPayload, RawNumber};

/// A check-in request after validation, ready for the geofence policy.
#[derive(Debug, Clone)]
pub struct NormalizedCheckin {
    pub driver_id: String,
    pub lat: f64,
    pub lng: f64,
    pub accuracy_m: Option<f64>,
    pub device_id: Option<String>,
    pub user_agent: Option<String>,
}

pub fn normalize(
    payload: &CheckinPayload,
    cfg: &ValidationConfig,
) -> Result<NormalizedCheckin, CheckinError> {
    let driver_id = normalize_id(payload.id.as_deref().unwrap_or(""), cfg.strict_id_format);
    if driver_id.is_empty() {
        return Err(CheckinError::MissingId);
    }

    let lat = payload
        .lat
        .as_ref()
        .and_then(RawNumber::as_finite_f64)
        .ok_or(CheckinError::InvalidLocation)?;
    let lng = payload
        .lng
        .as_ref()
        .and_then(RawNumber::as_finite_f64)
        .ok_or(CheckinError::InvalidLocation)?;

    let device_id = non_empty(payload.device_id.as_deref());
    if cfg.require_device_id && device_id.is_none() {
        return Err(CheckinError::MissingDevice);
    }

    Ok(NormalizedCheckin {
        driver_id,
        lat,
        lng,
        accuracy_m: payload.acc.as_ref().and_then(parse_accuracy),
        device_id,
        user_agent: non_empty(payload.ua.as_deref()),
    })
}

fn normalize_id(raw: &str, strict: bool) -> String {
    if strict {
        raw.chars().filter(char::is_ascii_alphanumeric).collect()
    } else {
        raw.trim().to_string()
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accuracy arrives as a number or as a string with a unit suffix
/// (`"13.2m"`). A reading with no parseable number is unknown, not invalid.
fn parse_accuracy(raw: &RawNumber) -> Option<f64> {
    match raw {
        RawNumber::Float(f) if f.is_finite() => Some(*f),
        RawNumber::Float(_) => None,
        RawNumber::Text(s) => {
            let numeric: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
                .collect();
            numeric.parse::<f64>().ok().filter(|f| f.is_finite())
        }
    }
}
