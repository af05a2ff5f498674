pub const SELECT_CHECKIN_BY_DRIVER_ON_DAY: &str = r#"
SELECT checkin_id, id_driver, lat, lng, accuracy, distance_km, geofence_status,
       device_id, user_agent, checkin_date, created_at
FROM checkins
WHERE id_driver = $1 AND checkin_date = $2 AND geofence_status = 'INSIDE'
LIMIT 1;
"#;

pub const SELECT_CHECKIN_BY_DEVICE_ON_DAY: &str = r#"
SELECT checkin_id, id_driver, lat, lng, accuracy, distance_km, geofence_status,
       device_id, user_agent, checkin_date, created_at
FROM checkins
WHERE device_id = $1 AND checkin_date = $2 AND geofence_status = 'INSIDE'
ORDER BY created_at
LIMIT 1;
"#;

pub const INSERT_CHECKIN: &str = r#"
INSERT INTO checkins (
    checkin_id, id_driver, lat, lng, accuracy, distance_km,
    geofence_status, device_id, user_agent, checkin_date
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10);
"#;
