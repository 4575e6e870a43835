use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather snapshot as served by the weather endpoint.
///
/// The `location`, `current` and `current.condition` objects must be present;
/// every leaf inside them is optional and renders as a placeholder when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDocument {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tz_id: Option<String>,
    pub localtime_epoch: Option<i64>,
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: Option<String>,
    pub icon: Option<String>,
    pub code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub last_updated_epoch: Option<i64>,
    pub last_updated: Option<String>,
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    pub is_day: Option<i64>,
    pub condition: Condition,
    pub wind_mph: Option<f64>,
    pub wind_kph: Option<f64>,
    pub wind_degree: Option<f64>,
    pub wind_dir: Option<String>,
    pub pressure_mb: Option<f64>,
    pub pressure_in: Option<f64>,
    pub precip_mm: Option<f64>,
    pub precip_in: Option<f64>,
    pub humidity: Option<f64>,
    pub cloud: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub feelslike_f: Option<f64>,
    pub windchill_c: Option<f64>,
    pub windchill_f: Option<f64>,
    pub heatindex_c: Option<f64>,
    pub heatindex_f: Option<f64>,
    pub dewpoint_c: Option<f64>,
    pub dewpoint_f: Option<f64>,
    pub vis_km: Option<f64>,
    pub vis_miles: Option<f64>,
    pub uv: Option<f64>,
    pub gust_mph: Option<f64>,
    pub gust_kph: Option<f64>,
}

impl WeatherDocument {
    /// Parse a document from raw JSON text.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

impl Current {
    /// Observation time taken from `last_updated_epoch`, if present and in range.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated_epoch.and_then(unix_to_utc)
    }
}

/// A single hit from the weatherapi.com location search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
}

impl std::fmt::Display for LocationMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} ({}, {})",
            self.name, self.region, self.country, self.lat, self.lon
        )
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_weatherapi_payload() {
        let doc = WeatherDocument::from_json(fixtures::MELBOURNE).expect("fixture should parse");

        assert_eq!(doc.location.name.as_deref(), Some("Melbourne"));
        assert_eq!(doc.current.condition.text.as_deref(), Some("Partly cloudy"));
        assert_eq!(doc.current.humidity, Some(60.0));
        assert_eq!(doc.current.wind_dir.as_deref(), Some("SSW"));
    }

    #[test]
    fn missing_leaves_are_none() {
        let doc = WeatherDocument::from_json(
            r#"{"location": {}, "current": {"condition": {}, "uv": null}}"#,
        )
        .expect("leaves are optional");

        assert_eq!(doc.current.uv, None);
        assert_eq!(doc.current.temp_c, None);
        assert_eq!(doc.location.country, None);
    }

    #[test]
    fn missing_current_object_is_rejected() {
        let err = WeatherDocument::from_json(r#"{"location": {"name": "X"}}"#).unwrap_err();
        assert!(err.to_string().contains("current"));
    }

    #[test]
    fn missing_condition_object_is_rejected() {
        let err = WeatherDocument::from_json(r#"{"location": {}, "current": {"temp_c": 1}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("condition"));
    }

    #[test]
    fn wrong_leaf_type_is_rejected() {
        assert!(
            WeatherDocument::from_json(
                r#"{"location": {}, "current": {"condition": {}, "temp_c": {"v": 1}}}"#
            )
            .is_err()
        );
    }

    #[test]
    fn last_updated_at_converts_epoch() {
        let doc = WeatherDocument::from_json(fixtures::MELBOURNE).unwrap();
        let at = doc.current.last_updated_at().expect("epoch present");
        assert_eq!(at.timestamp(), 1760399100);
    }

    #[test]
    fn location_match_display() {
        let hit = LocationMatch {
            id: Some(1),
            name: "Melbourne".into(),
            region: "Victoria".into(),
            country: "Australia".into(),
            lat: -37.82,
            lon: 144.97,
        };
        assert_eq!(hit.to_string(), "Melbourne, Victoria, Australia (-37.82, 144.97)");
    }
}
