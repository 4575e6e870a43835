use std::fmt::Display;

use crate::{model::WeatherDocument, presenter::number};

/// One row of the extended weather table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Every `current` field with its human label, in table order.
pub fn extended_rows(doc: &WeatherDocument, placeholder: &str) -> Vec<Row> {
    let c = &doc.current;
    let cell = |value: Option<String>| value.unwrap_or_else(|| placeholder.to_string());

    let rows: [(&'static str, &'static str, Option<String>); 30] = [
        ("last_updated_epoch", "Last Updated (Epoch)", s(&c.last_updated_epoch)),
        ("last_updated", "Last Updated", s(&c.last_updated)),
        ("temp_c", "Temperature (°C)", n(&c.temp_c)),
        ("temp_f", "Temperature (°F)", n(&c.temp_f)),
        ("feelslike_c", "Feels Like (°C)", n(&c.feelslike_c)),
        ("feelslike_f", "Feels Like (°F)", n(&c.feelslike_f)),
        ("humidity", "Humidity (%)", n(&c.humidity)),
        ("wind_mph", "Wind Speed (mph)", n(&c.wind_mph)),
        ("wind_kph", "Wind Speed (kph)", n(&c.wind_kph)),
        ("wind_degree", "Wind Direction (°)", n(&c.wind_degree)),
        ("wind_dir", "Wind Direction", s(&c.wind_dir)),
        ("pressure_mb", "Pressure (mb)", n(&c.pressure_mb)),
        ("pressure_in", "Pressure (inHg)", n(&c.pressure_in)),
        ("precip_mm", "Precipitation (mm)", n(&c.precip_mm)),
        ("precip_in", "Precipitation (in)", n(&c.precip_in)),
        ("uv", "UV Index", n(&c.uv)),
        ("gust_mph", "Gust Speed (mph)", n(&c.gust_mph)),
        ("gust_kph", "Gust Speed (kph)", n(&c.gust_kph)),
        ("condition_text", "Condition Text", s(&c.condition.text)),
        ("condition_code", "Condition Code", s(&c.condition.code)),
        ("windchill_c", "Wind Chill (°C)", n(&c.windchill_c)),
        ("windchill_f", "Wind Chill (°F)", n(&c.windchill_f)),
        ("heatindex_c", "Heat Index (°C)", n(&c.heatindex_c)),
        ("heatindex_f", "Heat Index (°F)", n(&c.heatindex_f)),
        ("dewpoint_c", "Dew Point (°C)", n(&c.dewpoint_c)),
        ("dewpoint_f", "Dew Point (°F)", n(&c.dewpoint_f)),
        ("cloud", "Cloud Cover (%)", n(&c.cloud)),
        ("vis_km", "Visibility (km)", n(&c.vis_km)),
        ("vis_miles", "Visibility (miles)", n(&c.vis_miles)),
        ("is_day", "Daytime Flag", s(&c.is_day)),
    ];

    rows.into_iter()
        .map(|(key, label, value)| Row { key, label, value: cell(value) })
        .collect()
}

fn s<T: Display>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

fn n(value: &Option<f64>) -> Option<String> {
    value.map(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn covers_every_current_field_once() {
        let doc = WeatherDocument::from_json(fixtures::MELBOURNE).unwrap();
        let rows = extended_rows(&doc, "--");

        assert_eq!(rows.len(), 30);
        let mut keys: Vec<&str> = rows.iter().map(|r| r.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 30);
    }

    #[test]
    fn values_are_rendered_verbatim() {
        let doc = WeatherDocument::from_json(fixtures::MELBOURNE).unwrap();
        let rows = extended_rows(&doc, "--");
        let find = |key: &str| rows.iter().find(|r| r.key == key).map(|r| r.value.as_str());

        assert_eq!(find("condition_code"), Some("1003"));
        assert_eq!(find("wind_dir"), Some("SSW"));
        assert_eq!(find("vis_km"), Some("10"));
        assert_eq!(find("is_day"), Some("1"));
    }

    #[test]
    fn missing_fields_use_placeholder() {
        let body = r#"{"location": {}, "current": {"condition": {}}}"#;
        let doc = WeatherDocument::from_json(body).unwrap();
        let rows = extended_rows(&doc, "n/a");

        assert!(rows.iter().all(|r| r.value == "n/a"));
        assert_eq!(rows[0].label, "Last Updated (Epoch)");
    }
}
