use cwa_temperature_core::ForecastRecord;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// cwaopendata.resources.resource.data.agrWeatherForecasts.weatherForecasts.location[]
#[derive(Deserialize)]
struct Document {
    cwaopendata: OpenData,
}

#[derive(Deserialize)]
struct OpenData {
    resources: Resources,
}

#[derive(Deserialize)]
struct Resources {
    resource: Resource,
}

#[derive(Deserialize)]
struct Resource {
    data: ResourceData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceData {
    agr_weather_forecasts: AgrWeatherForecasts,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgrWeatherForecasts {
    weather_forecasts: WeatherForecasts,
}

#[derive(Deserialize)]
struct WeatherForecasts {
    location: Vec<Location>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    location_name: String,
    weather_elements: WeatherElements,
}

#[derive(Deserialize)]
struct WeatherElements {
    #[serde(rename = "MaxT")]
    max_t: DailySeries,
    #[serde(rename = "MinT")]
    min_t: DailySeries,
}

#[derive(Deserialize)]
struct DailySeries {
    daily: Vec<DailyValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyValue {
    data_date: String,
    #[serde(default, deserialize_with = "temperature_text")]
    temperature: Option<String>,
}

/// Temperatures arrive as strings, occasionally as bare numbers, sometimes not at all.
fn temperature_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("forecast document does not match the expected schema: {0}")]
    SchemaMismatch(#[from] serde_json::Error),
}

/// A location whose MaxT and MinT daily series have different lengths.
/// Only the first `min(max_len, min_len)` days were emitted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesMismatch {
    pub area: String,
    pub max_len: usize,
    pub min_len: usize,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ForecastRecord>,
    pub mismatches: Vec<SeriesMismatch>,
}

/// Flatten the agricultural forecast document into one record per location per day.
///
/// Output follows upstream order: locations as listed, days in series order.
/// The date of each record comes from the MaxT series.
pub fn extract_records(document: &Value) -> Result<Extraction, ExtractError> {
    let parsed = Document::deserialize(document)?;
    let locations = parsed
        .cwaopendata
        .resources
        .resource
        .data
        .agr_weather_forecasts
        .weather_forecasts
        .location;

    let mut extraction = Extraction::default();
    for location in locations {
        let Location {
            location_name,
            weather_elements,
        } = location;
        let max_daily = weather_elements.max_t.daily;
        let min_daily = weather_elements.min_t.daily;

        if max_daily.len() != min_daily.len() {
            extraction.mismatches.push(SeriesMismatch {
                area: location_name.clone(),
                max_len: max_daily.len(),
                min_len: min_daily.len(),
            });
        }

        for (max, min) in max_daily.into_iter().zip(min_daily) {
            extraction.records.push(ForecastRecord::new(
                location_name.clone(),
                max.data_date,
                max.temperature,
                min.temperature,
            ));
        }
    }

    Ok(extraction)
}
