use serde::{Deserialize, Serialize};

/// One daily max/min temperature reading for a location, as stored.
///
/// Temperatures stay in their upstream textual form; coercion to numbers
/// happens on the read side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub area: String,
    pub date: String,
    #[serde(rename = "maxT")]
    pub max_t: Option<String>,
    #[serde(rename = "minT")]
    pub min_t: Option<String>,
}

impl ForecastRecord {
    pub fn new(
        area: impl Into<String>,
        date: impl Into<String>,
        max_t: Option<String>,
        min_t: Option<String>,
    ) -> Self {
        Self {
            area: area.into(),
            date: date.into(),
            max_t,
            min_t,
        }
    }
}
