use anyhow::{anyhow, Result};
use chrono::FixedOffset;
use dotenvy::dotenv;
use std::env;

/// Hub geofence parameters, immutable after startup.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub base_lat: f64,
    pub base_lng: f64,
    pub radius_km: f64,
    /// Extra distance tolerated past the radius before rejecting.
    pub radius_slack_km: f64,
    /// Worst GPS accuracy (meters) still accepted when the reading reports one.
    pub min_accuracy_m: f64,
}

/// Input normalization rules. Deployments diverge here, so both knobs are
/// configuration rather than code.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Strip non-alphanumeric characters from the ID instead of only trimming.
    pub strict_id_format: bool,
    pub require_device_id: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_host: String,
    pub http_port: u16,
    pub database_url: String,
    pub hub: HubConfig,
    pub validation: ValidationConfig,
    /// Hub-local timezone as a fixed UTC offset; defines the check-in day.
    pub tz_offset: FixedOffset,
    /// On duplicate-lookup I/O failure: true = log and proceed, false = reject.
    pub duplicate_check_fail_open: bool,
    /// Also persist OUTSIDE readings (diagnostics) when a check-in is rejected
    /// for distance.
    pub record_out_of_range: bool,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let http_host = env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let hub = HubConfig {
            base_lat: parse_env_f64("HUB_LAT", -22.79999),
            base_lng: parse_env_f64("HUB_LNG", -43.35049),
            radius_km: parse_env_f64("RADIUS_KM", 2.0),
            radius_slack_km: parse_env_f64("RADIUS_SLACK_KM", 0.0),
            min_accuracy_m: parse_env_f64("MIN_ACCURACY_M", 50.0),
        };

        let validation = ValidationConfig {
            strict_id_format: parse_env_bool("STRICT_ID_FORMAT", true),
            require_device_id: parse_env_bool("REQUIRE_DEVICE_ID", false),
        };

        let tz_offset_hours: i32 = env::var("TZ_OFFSET_HOURS")
            .unwrap_or_else(|_| "-3".to_string())
            .parse()
            .unwrap_or(-3);
        let tz_offset = FixedOffset::east_opt(tz_offset_hours * 3600)
            .ok_or_else(|| anyhow!("TZ_OFFSET_HOURS out of range: {tz_offset_hours}"))?;

        let duplicate_check_fail_open = parse_env_bool("DUPLICATE_CHECK_FAIL_OPEN", false);
        let record_out_of_range = parse_env_bool("RECORD_OUT_OF_RANGE", false);

        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let db_name = env::var("DB_DATABASE").unwrap_or_else(|_| "checkin_hub".to_string());
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "checkin".to_string());
        let db_pwd = env::var("DB_PWD").unwrap_or_else(|_| "checkin".to_string());

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            http_host,
            http_port,
            database_url,
            hub,
            validation,
            tz_offset,
            duplicate_check_fail_open,
            record_out_of_range,
            log_level,
        })
    }
}

fn parse_env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}
