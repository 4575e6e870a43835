use serde::{Serialize, Serializer};
use std::fmt;

/// Named display destinations, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotName {
    Country,
    City,
    Temp,
    Summary,
    Wind,
    Pressure,
    Precip,
    Humidity,
    Cloud,
    FeelsLike,
    WindChill,
    HeatIndex,
    DewPoint,
    Visibility,
    Uv,
    Gust,
}

impl SlotName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Country => "country",
            SlotName::City => "city",
            SlotName::Temp => "temp",
            SlotName::Summary => "summary",
            SlotName::Wind => "wind",
            SlotName::Pressure => "pressure",
            SlotName::Precip => "precip",
            SlotName::Humidity => "humidity",
            SlotName::Cloud => "cloud",
            SlotName::FeelsLike => "feelslike",
            SlotName::WindChill => "windchill",
            SlotName::HeatIndex => "heatindex",
            SlotName::DewPoint => "dewpoint",
            SlotName::Visibility => "visibility",
            SlotName::Uv => "uv",
            SlotName::Gust => "gust",
        }
    }

    /// Human-facing label used by terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            SlotName::Country => "Country",
            SlotName::City => "City",
            SlotName::Temp => "Temperature",
            SlotName::Summary => "Summary",
            SlotName::Wind => "Wind",
            SlotName::Pressure => "Pressure",
            SlotName::Precip => "Precipitation",
            SlotName::Humidity => "Humidity",
            SlotName::Cloud => "Cloud cover",
            SlotName::FeelsLike => "Feels like",
            SlotName::WindChill => "Wind chill",
            SlotName::HeatIndex => "Heat index",
            SlotName::DewPoint => "Dew point",
            SlotName::Visibility => "Visibility",
            SlotName::Uv => "UV index",
            SlotName::Gust => "Gust",
        }
    }

    pub const fn all() -> &'static [SlotName] {
        &[
            SlotName::Country,
            SlotName::City,
            SlotName::Temp,
            SlotName::Summary,
            SlotName::Wind,
            SlotName::Pressure,
            SlotName::Precip,
            SlotName::Humidity,
            SlotName::Cloud,
            SlotName::FeelsLike,
            SlotName::WindChill,
            SlotName::HeatIndex,
            SlotName::DewPoint,
            SlotName::Visibility,
            SlotName::Uv,
            SlotName::Gust,
        ]
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SlotName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl TryFrom<&str> for SlotName {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        SlotName::all()
            .iter()
            .copied()
            .find(|slot| slot.as_str() == lower)
            .ok_or_else(|| {
                let known: Vec<&str> = SlotName::all().iter().map(SlotName::as_str).collect();
                anyhow::anyhow!("Unknown slot '{value}'. Known slots: {}.", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_name_as_str_roundtrip() {
        for slot in SlotName::all() {
            let parsed = SlotName::try_from(slot.as_str()).expect("roundtrip should succeed");
            assert_eq!(*slot, parsed);
        }
    }

    #[test]
    fn there_are_sixteen_slots_in_order() {
        let all = SlotName::all();
        assert_eq!(all.len(), 16);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!(SlotName::try_from("FeelsLike").unwrap(), SlotName::FeelsLike);
    }

    #[test]
    fn unknown_slot_error() {
        let err = SlotName::try_from("rainbow").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown slot 'rainbow'"));
        assert!(msg.contains("humidity"));
    }
}
