const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two lat/lng pairs (degrees).
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUB_LAT: f64 = -22.79999;
    const HUB_LNG: f64 = -43.35049;

    #[test]
    fn zero_distance_for_identical_points() {
        let d = haversine_km(HUB_LAT, HUB_LNG, HUB_LAT, HUB_LNG);
        assert!(d.abs() < 1e-9, "expected 0, got {d}");
    }

    #[test]
    fn symmetric() {
        let (lat2, lng2) = (-22.9068, -43.1729); // Rio centro
        let ab = haversine_km(HUB_LAT, HUB_LNG, lat2, lng2);
        let ba = haversine_km(lat2, lng2, HUB_LAT, HUB_LNG);
        assert!((ab - ba).abs() / ab < 1e-6);
    }

    #[test]
    fn two_km_along_meridian() {
        // Along a meridian the haversine reduces to R * dlat, so a point
        // 2/R radians north is exactly 2 km away.
        let dlat = (2.0_f64 / EARTH_RADIUS_KM).to_degrees();
        let d = haversine_km(HUB_LAT, HUB_LNG, HUB_LAT + dlat, HUB_LNG);
        assert!((d - 2.0).abs() < 1e-6, "expected 2.0 km, got {d}");
    }

    #[test]
    fn known_city_pair_sanity() {
        // Rio de Janeiro centro to São Paulo Sé, ~357 km great-circle.
        let d = haversine_km(-22.9068, -43.1729, -23.5505, -46.6333);
        assert!((350.0..365.0).contains(&d), "got {d}");
    }
}
