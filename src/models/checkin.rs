use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Where the reading fell relative to the hub geofence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceStatus {
    Inside,
    Outside,
}

impl GeofenceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GeofenceStatus::Inside => "INSIDE",
            GeofenceStatus::Outside => "OUTSIDE",
        }
    }
}

/// A persisted check-in row. Append-only, never updated.
#[derive(Debug, FromRow)]
#[allow(dead_code)]
pub struct CheckinRecord {
    pub checkin_id: Uuid,
    pub id_driver: String,
    pub lat: f64,
    pub lng: f64,
    pub accuracy: Option<f64>, // DDL says float8 NULL
    pub distance_km: f64,
    pub geofence_status: String, // 'INSIDE' | 'OUTSIDE' in DB, map to String
    pub device_id: Option<String>,
    pub user_agent: Option<String>,
    pub checkin_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Values for a single insert into `checkins`. `created_at` is set by the DB.
#[derive(Debug)]
pub struct NewCheckin {
    pub checkin_id: Uuid,
    pub id_driver: String,
    pub lat: f64,
    pub lng: f64,
    pub accuracy: Option<f64>,
    pub distance_km: f64,
    pub geofence_status: GeofenceStatus,
    pub device_id: Option<String>,
    pub user_agent: Option<String>,
    pub checkin_date: NaiveDate,
}
