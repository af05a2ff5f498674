use serde::Deserialize;

/// Raw body of `POST /api/checkin` as sent by the browser client.
///
/// Everything is optional at this layer; the normalizer decides what is
/// actually required. Numeric fields arrive as JSON numbers or as strings
/// depending on the client build, so they are captured untyped.
#[derive(Debug, Default, Deserialize)]
pub struct CheckinPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub lat: Option<RawNumber>,
    #[serde(default)]
    pub lng: Option<RawNumber>,
    #[serde(default)]
    pub acc: Option<RawNumber>,
    #[serde(default, rename = "deviceId")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub ua: Option<String>,
}

/// A JSON number or a string carrying a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Strict interpretation: finite number, or a string that parses to one.
    pub fn as_finite_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Float(f) if f.is_finite() => Some(*f),
            RawNumber::Float(_) => None,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_client_body() {
        let body = r#"
        {
            "id": "4721",
            "lat": -22.799913,
            "lng": -43.350602,
            "acc": 12,
            "deviceId": "web-k3j9x2ab",
            "ua": "Mozilla/5.0 (Linux; Android 13)"
        }
        "#;

        let p: CheckinPayload = serde_json::from_str(body).unwrap();
        assert_eq!(p.id.as_deref(), Some("4721"));
        assert_eq!(p.lat.as_ref().and_then(RawNumber::as_finite_f64), Some(-22.799913));
        assert_eq!(p.acc.as_ref().and_then(RawNumber::as_finite_f64), Some(12.0));
        assert_eq!(p.device_id.as_deref(), Some("web-k3j9x2ab"));
    }

    #[test]
    fn parses_stringified_coordinates() {
        let body = r#"{"id":"9","lat":"-22.80","lng":"-43.35"}"#;
        let p: CheckinPayload = serde_json::from_str(body).unwrap();
        assert_eq!(p.lat.as_ref().and_then(RawNumber::as_finite_f64), Some(-22.80));
        assert!(p.device_id.is_none());
    }

    #[test]
    fn non_numeric_text_is_not_a_number() {
        let n = RawNumber::Text("abc".into());
        assert_eq!(n.as_finite_f64(), None);
    }
}
