use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::{model::WeatherDocument, sink::DisplaySink, slot::SlotName};

pub const DEFAULT_PLACEHOLDER: &str = "--";

/// Formatted text for every slot, iterated in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Presentation(BTreeMap<SlotName, String>);

impl Presentation {
    pub fn get(&self, slot: SlotName) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotName, &str)> {
        self.0.iter().map(|(slot, text)| (*slot, text.as_str()))
    }
}

/// Turns a [`WeatherDocument`] into display strings and pushes them into a sink.
#[derive(Debug, Clone)]
pub struct WeatherPresenter {
    placeholder: String,
}

impl Default for WeatherPresenter {
    fn default() -> Self {
        Self { placeholder: DEFAULT_PLACEHOLDER.to_string() }
    }
}

impl WeatherPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text rendered in place of any value missing from the document.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self { placeholder: placeholder.into() }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn present(&self, doc: &WeatherDocument) -> Presentation {
        let slots = SlotName::all().iter().map(|slot| (*slot, self.format_slot(*slot, doc)));
        Presentation(slots.collect())
    }

    /// Present `doc` and write every slot into `sink` in display order.
    pub fn display(
        &self,
        doc: &WeatherDocument,
        sink: &mut dyn DisplaySink,
    ) -> Result<Presentation> {
        let presentation = self.present(doc);
        for (slot, text) in presentation.iter() {
            sink.write_slot(slot, text)?;
        }
        tracing::debug!(slots = presentation.len(), "weather slots written");
        Ok(presentation)
    }

    fn text(&self, value: &Option<String>) -> String {
        value.clone().unwrap_or_else(|| self.placeholder.clone())
    }

    fn num(&self, value: &Option<f64>) -> String {
        value.map_or_else(|| self.placeholder.clone(), number)
    }

    fn format_slot(&self, slot: SlotName, doc: &WeatherDocument) -> String {
        let loc = &doc.location;
        let cur = &doc.current;

        match slot {
            SlotName::Country => self.text(&loc.country),
            SlotName::City => self.text(&loc.name),
            SlotName::Temp => format!("{} °C", self.num(&cur.temp_c)),
            SlotName::Summary => self.text(&cur.condition.text),
            SlotName::Wind => format!(
                "{} mph ({} kph) {} ({}°)",
                self.num(&cur.wind_mph),
                self.num(&cur.wind_kph),
                self.text(&cur.wind_dir),
                self.num(&cur.wind_degree),
            ),
            SlotName::Pressure => {
                format!("{} mb ({} in)", self.num(&cur.pressure_mb), self.num(&cur.pressure_in))
            }
            SlotName::Precip => {
                format!("{} mm ({} in)", self.num(&cur.precip_mm), self.num(&cur.precip_in))
            }
            SlotName::Humidity => format!("{}%", self.num(&cur.humidity)),
            SlotName::Cloud => format!("{}%", self.num(&cur.cloud)),
            SlotName::FeelsLike => {
                format!("{} °C ({} °F)", self.num(&cur.feelslike_c), self.num(&cur.feelslike_f))
            }
            SlotName::WindChill => {
                format!("{} °C ({} °F)", self.num(&cur.windchill_c), self.num(&cur.windchill_f))
            }
            SlotName::HeatIndex => {
                format!("{} °C ({} °F)", self.num(&cur.heatindex_c), self.num(&cur.heatindex_f))
            }
            SlotName::DewPoint => {
                format!("{} °C ({} °F)", self.num(&cur.dewpoint_c), self.num(&cur.dewpoint_f))
            }
            SlotName::Visibility => {
                format!("{} km ({} miles)", self.num(&cur.vis_km), self.num(&cur.vis_miles))
            }
            SlotName::Uv => self.num(&cur.uv),
            SlotName::Gust => {
                format!("{} mph ({} kph)", self.num(&cur.gust_mph), self.num(&cur.gust_kph))
            }
        }
    }
}

/// Shortest round-trip form of `x`, with negative zero shown as `0`.
pub(crate) fn number(x: f64) -> String {
    (x + 0.0).to_string()
}
